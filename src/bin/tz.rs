use anyhow::{Context, Result};
use tz::analysis::tz_analysis;
use tz::arguments::{Args, ClapApp, Source};
use tz::field::{ScalarField, VectorField};
use tz::io::output::tz_report;
use tz::io::vasp::Vasp;
use tz::io::FileFormat;
use tz::progress::Bar;

fn main() -> Result<()> {
    // argument parsing
    let app = ClapApp::get();
    let args = Args::new(app.get_matches())?;
    // print splash, stdout is reserved for the results
    eprintln!("Spin-dipole Tz Integration ({})", env!("CARGO_PKG_VERSION"));
    eprintln!("Running on {} threads.", args.threads);
    // read the spin density components into a vector field
    let (field, file_atoms) = match &args.source {
        Source::Components { x, y, z, file_type } => {
            let reader = file_type.reader();
            let read = |filename: &str| -> Result<ScalarField> {
                eprintln!("Reading {} as {} format.", filename, reader.name());
                let mut volumetric = reader.read(filename)
                                           .with_context(|| format!("Failed to read {}", filename))?;
                volumetric.scalar_field(0)
            };
            let field = VectorField::from_components(read(x.as_str())?,
                                                     read(y.as_str())?,
                                                     read(z.as_str())?)
                .context("The spin density components cannot be combined")?;
            (field, None)
        }
        Source::Chgcar(filename) => {
            eprintln!("Reading {} as VASP format.", filename);
            let mut volumetric = Vasp {}.read(filename)
                                        .with_context(|| format!("Failed to read {}", filename))?;
            let atoms = volumetric.atoms.take();
            let (x, y, z) = volumetric.spin_components()
                                      .with_context(|| format!("{} is not a non-collinear density", filename))?;
            let field = VectorField::from_components(x, y, z)
                .context("The spin density components cannot be combined")?;
            (field, atoms)
        }
    };
    // the sphere centres
    let atoms = match (&args.poscar, file_atoms) {
        (Some(poscar), _) => Vasp {}.read_structure(poscar)?,
        (None, Some(atoms)) => atoms,
        (None, None) => Vasp {}.read_structure("POSCAR")?,
    };
    eprintln!("Integrating {} atoms on a {}x{}x{} grid.",
              atoms.len(),
              field.grid.size.x,
              field.grid.size.y,
              field.grid.size.z);
    let pbar = Bar::new(atoms.len() as u64, "Integrating Tz: ", true);
    let analysis = tz_analysis(&field,
                               &atoms,
                               &args.radii,
                               args.boundary,
                               args.threads,
                               &pbar)?;
    eprintln!("Integrated {} atoms in {:.2?}.", atoms.len(), pbar.finish());
    print!("{}", tz_report(&analysis, args.multiplier, args.verbose));
    Ok(())
}
