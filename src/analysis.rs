use crate::atoms::Atoms;
use crate::field::VectorField;
use crate::progress::ProgressBar;
use crate::radii::RadiusTable;
use crate::utils::{subtract, vdot};
use anyhow::{anyhow, Result};
use crossbeam_utils::thread;

/// How the displacement between a voxel and an atom is measured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary {
    /// Plain displacement inside the cell, voxels across a cell face are
    /// never seen by an atom.
    Open,
    /// Every image of the atom whose sphere reaches the cell is integrated.
    Periodic,
}

/// The Tz of a single atom.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomTz {
    /// 1-based position of the atom in the structure file.
    pub index: usize,
    pub symbol: String,
    /// The sphere radius used, in Å.
    pub radius: f64,
    /// Number of voxels that fell inside the sphere.
    pub voxels: usize,
    /// The spin-dipole term, in μB.
    pub tz: f64,
}

/// Tz of every atom and the cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub atoms: Vec<AtomTz>,
    /// Sum of the atomic Tz, in atom order.
    pub cell_total: f64,
}

impl Analysis {
    /// The cell total scaled, ie. from a formula unit to a supercell.
    pub fn scaled_total(&self, multiplier: f64) -> f64 {
        multiplier * self.cell_total
    }
}

/// The unit vector along `d`, or zero when `d` has no length.
#[inline]
pub fn unit_radial(d: [f64; 3], r2: f64) -> [f64; 3] {
    if r2 > 0.0 {
        let r = r2.sqrt();
        [d[0] / r, d[1] / r, d[2] / r]
    } else {
        [0.0; 3]
    }
}

/// The dipole integrand ½ [m_z − 3 r̂_z (r̂·m)] at a single voxel.
#[inline]
pub fn dipole_kernel(r_hat: [f64; 3], m: [f64; 3]) -> f64 {
    0.5 * (m[2] - 3.0 * r_hat[2] * vdot(r_hat, m))
}

/// Which voxels of the field lie strictly within `radius` of `centre`.
pub fn sphere_mask(field: &VectorField, centre: [f64; 3], radius: f64) -> Vec<bool> {
    let radius2 = radius * radius;
    field.grid
         .coordinates
         .iter()
         .map(|c| {
             let d = subtract(*c, centre);
             vdot(d, d) < radius2
         })
         .collect()
}

/// Integrates the dipole kernel over the sphere around `centre`.
/// Returns the Tz and the number of voxels (images included) in the sphere.
/// The voxels are summed in index order so the result does not depend on how
/// the atoms were split between threads.
pub fn atom_tz(field: &VectorField,
               centre: [f64; 3],
               radius: f64,
               boundary: Boundary)
               -> (f64, usize) {
    let radius2 = radius * radius;
    let shifts = match boundary {
        Boundary::Open => vec![[0f64; 3]],
        Boundary::Periodic => field.grid.lattice.images(centre, radius),
    };
    let mut sum = 0.0;
    let mut voxels = 0;
    for (c, m) in field.grid.coordinates.iter().zip(&field.data) {
        for shift in shifts.iter() {
            let d = [c[0] - (centre[0] + shift[0]),
                     c[1] - (centre[1] + shift[1]),
                     c[2] - (centre[2] + shift[2])];
            let r2 = vdot(d, d);
            if r2 < radius2 {
                sum += dipole_kernel(unit_radial(d, r2), *m);
                voxels += 1;
            }
        }
    }
    (sum * field.grid.voxel_volume(), voxels)
}

/// Calculates the Tz for a chunk of atoms, `offset` is the index of the first
/// atom of the chunk within the structure.
fn atoms_tz(chunk: &[(String, [f64; 3])],
            offset: usize,
            field: &VectorField,
            radii: &RadiusTable,
            boundary: Boundary,
            progress_bar: &dyn ProgressBar)
            -> Vec<AtomTz> {
    chunk.iter()
         .enumerate()
         .map(|(i, (symbol, position))| {
             let radius = radii.get(symbol);
             let (tz, voxels) = atom_tz(field, *position, radius, boundary);
             progress_bar.tick();
             AtomTz { index: offset + i + 1,
                      symbol: symbol.clone(),
                      radius,
                      voxels,
                      tz }
         })
         .collect()
}

/// Integrate Tz in the sphere of every atom and sum the cell total.
/// Threading splits the atoms into chunks and operates on each chunk in
/// parallel, the cell total is always summed in atom order.
pub fn tz_analysis(field: &VectorField,
                   atoms: &Atoms,
                   radii: &RadiusTable,
                   boundary: Boundary,
                   threads: usize,
                   progress_bar: &dyn ProgressBar)
                   -> Result<Analysis> {
    let sites = atoms.iter()
                     .map(|(s, p)| (String::from(s), p))
                     .collect::<Vec<(String, [f64; 3])>>();
    let mut results = Vec::with_capacity(sites.len());
    match threads.cmp(&1) {
        std::cmp::Ordering::Greater if sites.len() > 1 => {
            let chunk_size =
                (sites.len() / threads) + (sites.len() % threads).min(1);
            thread::scope(|s| {
                let spawned_threads =
                    sites.chunks(chunk_size)
                         .enumerate()
                         .map(|(index, chunk)| {
                             s.spawn(move |_| {
                                  atoms_tz(chunk,
                                           index * chunk_size,
                                           field,
                                           radii,
                                           boundary,
                                           progress_bar)
                              })
                         })
                         .collect::<Vec<_>>();
                // handles are joined in spawn order so the chunks stay sorted
                for thread in spawned_threads {
                    match thread.join() {
                        Ok(chunk) => results.extend(chunk),
                        Err(_) => return Err(anyhow!("Failed to join thread in Tz analysis.")),
                    }
                }
                Ok(())
            }).map_err(|_| anyhow!("A Tz analysis thread panicked."))??;
        }
        _ => {
            results = atoms_tz(&sites, 0, field, radii, boundary, progress_bar);
        }
    }
    let cell_total = results.iter().map(|a| a.tz).sum::<f64>();
    Ok(Analysis { atoms: results,
                  cell_total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::Lattice;
    use crate::grid::Grid;
    use crate::progress::HiddenBar;

    const CUBIC: [[f64; 3]; 3] = [[2., 0., 0.], [0., 2., 0.], [0., 0., 2.]];

    fn uniform(grid: [usize; 3], lattice: [[f64; 3]; 3], m: [f64; 3]) -> VectorField {
        let grid = Grid::new(grid, lattice).unwrap();
        let data = vec![m; grid.size.total];
        VectorField::new(grid, data).unwrap()
    }

    fn atoms(lattice: [[f64; 3]; 3], sites: &[(&str, [f64; 3])]) -> Atoms {
        Atoms::new(Lattice::new(lattice).unwrap(),
                   sites.iter().map(|(s, _)| String::from(*s)).collect(),
                   sites.iter().map(|(_, p)| *p).collect(),
                   String::new())
    }

    #[test]
    fn analysis_unit_radial_zero() {
        assert_eq!(unit_radial([0., 0., 0.], 0.), [0., 0., 0.]);
    }

    #[test]
    fn analysis_unit_radial_normalised() {
        let field = uniform([5, 6, 7], [[2., 0., 0.], [1., 3., 0.], [0., 0.5, 2.5]], [0., 0., 1.]);
        let centre = [1.3, 0.7, 1.1];
        for c in field.grid.coordinates.iter() {
            let d = [c[0] - centre[0], c[1] - centre[1], c[2] - centre[2]];
            let r2 = vdot(d, d);
            if r2 > 0.0 && r2 < 1.5 * 1.5 {
                let r_hat = unit_radial(d, r2);
                assert!((vdot(r_hat, r_hat).sqrt() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn analysis_dipole_kernel() {
        // along z the kernel is ½ (1 - 3) m_z
        assert_eq!(dipole_kernel([0., 0., 1.], [0., 0., 2.]), -2.);
        // perpendicular to z the radial term vanishes
        assert_eq!(dipole_kernel([1., 0., 0.], [0., 0., 2.]), 1.);
        assert_eq!(dipole_kernel([0., 0., 0.], [3., 1., 2.]), 1.);
    }

    #[test]
    fn analysis_cubic_scenario() {
        // 2 Å cell on a 4x4x4 grid, atom at the centre with a 1 Å sphere.
        // The sphere holds the 27 voxels within ±0.5 Å on each axis. With
        // m = z the shells of 1, 2 and 3 non-zero offsets each sum to zero,
        // leaving only the centre voxel at ½ m_z, times 0.125 Å³.
        let field = uniform([4, 4, 4], CUBIC, [0., 0., 1.]);
        let (tz, voxels) = atom_tz(&field, [1., 1., 1.], 1.0, Boundary::Open);
        assert_eq!(voxels, 27);
        assert!((tz - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn analysis_cubic_scenario_by_hand() {
        let field = uniform([4, 4, 4], CUBIC, [0., 0., 1.]);
        let offsets = [-1.0f64, -0.5, 0.0, 0.5];
        let mut expected = 0.0;
        for dx in offsets.iter() {
            for dy in offsets.iter() {
                for dz in offsets.iter() {
                    let r2 = dx * dx + dy * dy + dz * dz;
                    if r2 < 1.0 {
                        let rz2 = if r2 > 0.0 { dz * dz / r2 } else { 0.0 };
                        expected += 0.5 * (1.0 - 3.0 * rz2);
                    }
                }
            }
        }
        expected *= 0.125;
        let (tz, _) = atom_tz(&field, [1., 1., 1.], 1.0, Boundary::Open);
        assert!((tz - expected).abs() < 1e-12);
    }

    #[test]
    fn analysis_zero_field() {
        let field = uniform([6, 6, 6], CUBIC, [0., 0., 0.]);
        let atoms = atoms(CUBIC, &[("Co", [1., 1., 1.]), ("Pd", [0., 0., 0.])]);
        let analysis = tz_analysis(&field,
                                   &atoms,
                                   &RadiusTable::default(),
                                   Boundary::Open,
                                   1,
                                   &HiddenBar {}).unwrap();
        assert!(analysis.atoms.iter().all(|a| a.tz == 0.0));
        assert_eq!(analysis.cell_total, 0.0);
    }

    #[test]
    fn analysis_singular_point() {
        // in plane spin, only the coincident voxel could blow up
        let field = uniform([4, 4, 4], CUBIC, [1., 0., 0.]);
        let (tz, voxels) = atom_tz(&field, [1., 1., 1.], 0.4, Boundary::Open);
        assert_eq!(voxels, 1);
        assert_eq!(tz, 0.0);
        let (tz, _) = atom_tz(&field, [1., 1., 1.], 1.0, Boundary::Open);
        assert!(tz.is_finite());
    }

    #[test]
    fn analysis_mask_monotonic() {
        let field = uniform([8, 8, 8], CUBIC, [0., 0., 1.]);
        let centre = [0.9, 1.1, 0.7];
        let radii = [0.2, 0.5, 0.75, 1.0, 1.6];
        for pair in radii.windows(2) {
            let inner = sphere_mask(&field, centre, pair[0]);
            let outer = sphere_mask(&field, centre, pair[1]);
            assert!(inner.iter().zip(&outer).all(|(i, o)| !*i || *o));
            let n_inner = inner.iter().filter(|i| **i).count();
            let n_outer = outer.iter().filter(|o| **o).count();
            assert!(n_inner <= n_outer);
        }
    }

    #[test]
    fn analysis_additivity() {
        let grid = Grid::new([6, 6, 6], CUBIC).unwrap();
        let data = grid.coordinates
                       .iter()
                       .map(|c| [c[1] - 1.0, 0.5 * c[0], c[2] * c[2]])
                       .collect();
        let field = VectorField::new(grid, data).unwrap();
        let atoms = atoms(CUBIC,
                          &[("Co", [1., 1., 1.]),
                            ("Pd", [0.5, 0.5, 0.5]),
                            ("Fe", [1.5, 0.5, 1.0])]);
        let mut radii = RadiusTable::empty(0.6);
        radii.insert("Co", 0.8);
        radii.insert("Pd", 0.9);
        let analysis =
            tz_analysis(&field, &atoms, &radii, Boundary::Open, 1, &HiddenBar {}).unwrap();
        let sum = analysis.atoms.iter().map(|a| a.tz).sum::<f64>();
        assert_eq!(analysis.cell_total, sum);
        assert!((analysis.scaled_total(7.0) - 7.0 * sum).abs() < 1e-12);
        assert_eq!(analysis.atoms.iter().map(|a| a.index).collect::<Vec<_>>(),
                   vec![1, 2, 3]);
    }

    #[test]
    fn analysis_threads_match() {
        let grid = Grid::new([8, 8, 8], CUBIC).unwrap();
        let data = grid.coordinates
                       .iter()
                       .map(|c| [c[2].sin(), c[0] * c[1], 1.0 - c[2]])
                       .collect();
        let field = VectorField::new(grid, data).unwrap();
        let sites = (0..7).map(|i| ("Co", [0.2 * i as f64 + 0.3, 1.0, 0.9]))
                          .collect::<Vec<_>>();
        let atoms = atoms(CUBIC, &sites);
        let radii = RadiusTable::empty(0.7);
        let serial =
            tz_analysis(&field, &atoms, &radii, Boundary::Open, 1, &HiddenBar {}).unwrap();
        let threaded =
            tz_analysis(&field, &atoms, &radii, Boundary::Open, 3, &HiddenBar {}).unwrap();
        assert_eq!(serial, threaded);
    }

    #[test]
    fn analysis_default_radius() {
        let field = uniform([4, 4, 4], CUBIC, [0., 0., 1.]);
        let atoms = atoms(CUBIC, &[("Co", [1., 1., 1.]), ("Xx", [1., 1., 1.])]);
        let mut radii = RadiusTable::empty(1.0);
        radii.insert("Co", 0.6);
        let analysis =
            tz_analysis(&field, &atoms, &radii, Boundary::Open, 1, &HiddenBar {}).unwrap();
        assert_eq!(analysis.atoms[0].voxels, 7);
        assert_eq!(analysis.atoms[1].radius, 1.0);
        assert_eq!(analysis.atoms[1].voxels, 27);
        let explicit = sphere_mask(&field, [1., 1., 1.], 1.0);
        assert_eq!(explicit.iter().filter(|m| **m).count(), 27);
    }

    #[test]
    fn analysis_periodic_interior() {
        let field = uniform([8, 8, 8], CUBIC, [0.3, -0.2, 1.]);
        let open = atom_tz(&field, [1., 1., 1.], 0.6, Boundary::Open);
        let periodic = atom_tz(&field, [1., 1., 1.], 0.6, Boundary::Periodic);
        assert_eq!(open, periodic);
    }

    #[test]
    fn analysis_periodic_corner() {
        // an atom on the origin only sees one octant of its sphere without
        // periodic images
        let field = uniform([4, 4, 4], CUBIC, [0., 0., 1.]);
        let (_, open) = atom_tz(&field, [0., 0., 0.], 1.0, Boundary::Open);
        let (tz, periodic) = atom_tz(&field, [0., 0., 0.], 1.0, Boundary::Periodic);
        assert_eq!(open, 8);
        assert_eq!(periodic, 27);
        assert!((tz - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn analysis_periodic_sphere_wider_than_cell() {
        let m = [1., 0., 1.];
        let field = uniform([4, 4, 4], CUBIC, m);
        let radius: f64 = 2.6;
        let (tz, voxels) = atom_tz(&field, [0., 0., 0.], radius, Boundary::Periodic);
        // every voxel translated by every cell within a generous range
        let mut expected_tz = 0.0;
        let mut expected_voxels = 0;
        for c in field.grid.coordinates.iter() {
            for na in -4..=4 {
                for nb in -4..=4 {
                    for nc in -4..=4 {
                        let d = [c[0] + 2. * na as f64,
                                 c[1] + 2. * nb as f64,
                                 c[2] + 2. * nc as f64];
                        let r2 = vdot(d, d);
                        if r2 < radius * radius {
                            expected_tz += dipole_kernel(unit_radial(d, r2), m);
                            expected_voxels += 1;
                        }
                    }
                }
            }
        }
        assert_eq!(expected_voxels, 619);
        assert_eq!(voxels, expected_voxels);
        assert!((tz - expected_tz * 0.125).abs() < 1e-10);
    }
}
