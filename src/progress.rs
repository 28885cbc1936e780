use atomic_counter::{AtomicCounter, RelaxedCounter};
use indicatif::{ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How often the drawn bar catches up with the counter.
const REFRESH: Duration = Duration::from_millis(100);

/// Something that can be ticked from any of the integration threads.
pub trait ProgressBar: Sync {
    /// Mark one atom as done.
    fn tick(&self);
}

/// An indicatif bar over the atoms being integrated. Worker threads only bump
/// a RelaxedCounter, a background thread copies it to the bar.
pub struct Bar {
    counter: Arc<RelaxedCounter>,
    pbar: Arc<indicatif::ProgressBar>,
    started: Instant,
}

impl Bar {
    /// A bar over `atoms` atoms, drawn on stderr when `visible` so stdout only
    /// carries the results.
    pub fn new(atoms: u64, prefix: &str, visible: bool) -> Self {
        let progress_bar = indicatif::ProgressBar::hidden();
        progress_bar.set_length(atoms);
        progress_bar.set_prefix(String::from(prefix));
        progress_bar.set_style(ProgressStyle::default_bar()
            .template("{prefix}[{bar:40}] [{elapsed_precise}] {pos}/{len} atoms")
            .progress_chars("=>-"));
        if visible {
            progress_bar.set_draw_target(ProgressDrawTarget::stderr());
        }
        let pbar = Arc::new(progress_bar);
        let counter = Arc::new(RelaxedCounter::new(0));
        {
            let pbar = pbar.clone();
            let counter = counter.clone();
            // runs until the Bar is finished or dropped
            thread::spawn(move || {
                while Arc::strong_count(&counter) > 1 && !pbar.is_finished() {
                    pbar.set_position(counter.get() as u64);
                    thread::sleep(REFRESH);
                }
            });
        }
        Self { counter,
               pbar,
               started: Instant::now() }
    }

    /// Number of atoms ticked off so far.
    pub fn count(&self) -> usize {
        self.counter.get()
    }

    /// Clears the bar and returns how long it was running.
    pub fn finish(&self) -> Duration {
        self.pbar.set_position(self.counter.get() as u64);
        self.pbar.finish_and_clear();
        self.started.elapsed()
    }
}

impl ProgressBar for Bar {
    fn tick(&self) {
        self.counter.inc();
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        if !self.pbar.is_finished() {
            self.pbar.finish_and_clear();
        }
    }
}

/// A progress bar that does nothing, for library callers and tests.
pub struct HiddenBar {}

impl ProgressBar for HiddenBar {
    fn tick(&self) {}
}
