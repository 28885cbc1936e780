use crate::analysis::{Analysis, AtomTz};
use crate::io::Scientific;

/// A single atom's line, `  1 Co   Tz = -1.23450e-03 μB`.
pub fn atom_line(atom: &AtomTz) -> String {
    format!("{:3} {:2}   Tz = {} μB", atom.index, atom.symbol, Scientific(atom.tz))
}

/// The atom line followed by the sphere used, for checking radii.
pub fn verbose_atom_line(atom: &AtomTz) -> String {
    format!("{}   (r = {:.3} Å, {} voxels)",
            atom_line(atom),
            atom.radius,
            atom.voxels)
}

/// The full report: a line per atom, a blank line, the cell total and the
/// scaled cell total.
pub fn tz_report(analysis: &Analysis, multiplier: f64, verbose: bool) -> String {
    let mut report = analysis.atoms
                             .iter()
                             .map(|atom| {
                                 if verbose {
                                     verbose_atom_line(atom)
                                 } else {
                                     atom_line(atom)
                                 }
                             })
                             .collect::<Vec<String>>()
                             .join("\n");
    if !report.is_empty() {
        report.push('\n');
    }
    report.push_str(&format!("\nCell-total Tz  = {} μB\n",
                             Scientific(analysis.cell_total)));
    report.push_str(&format!("Cell-total {} Tz = {} μB\n",
                             multiplier,
                             Scientific(analysis.scaled_total(multiplier))));
    report
}
