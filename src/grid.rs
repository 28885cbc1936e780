use crate::atoms::Lattice;
use crate::utils::dot;
use anyhow::{bail, Result};

/// Structure for the voxels on which the spin density is stored.
pub struct Grid {
    /// The 3d size of the data.
    pub size: Size,
    /// The cell the grid spans.
    pub lattice: Lattice,
    /// Information on the voxel basis, row i is lattice vector i / N_i.
    pub voxel_lattice: Lattice,
    /// Cartesian position of every voxel, index . voxel_lattice, flattened in
    /// the same order as the densities.
    pub coordinates: Vec<[f64; 3]>,
}

impl Grid {
    /// Initialises a grid structure. Computes the voxel_lattice from the grid
    /// and lattice then places every voxel in cartesian space. Voxels are not
    /// wrapped or shifted to their centres, voxel (0, 0, 0) sits at the origin.
    pub fn new(grid: [usize; 3], lattice: [[f64; 3]; 3]) -> Result<Self> {
        if grid.iter().any(|n| *n == 0) {
            bail!("Grid {:?} contains no voxels.", grid);
        }
        let size = Size::new(grid[0], grid[1], grid[2])?;
        let mut voxel_lattice = [[0f64; 3]; 3];
        for (i, row) in voxel_lattice.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = lattice[i][j] / grid[i] as f64;
            }
        }
        let voxel_lattice = Lattice::new(voxel_lattice)?;
        let lattice = Lattice::new(lattice)?;
        let coordinates = (0..size.total).map(|p| {
                                             let [x, y, z] = size.to_3d(p);
                                             dot([x as f64, y as f64, z as f64],
                                                 voxel_lattice.to_cartesian)
                                         })
                                         .collect();
        Ok(Self { size,
                  lattice,
                  voxel_lattice,
                  coordinates })
    }

    /// The volume element of the integration.
    pub fn voxel_volume(&self) -> f64 {
        self.voxel_lattice.volume
    }
}

/// Size of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    /// Number of voxels in the x-direction.
    pub x: usize,
    /// Number of voxels in the y-direction.
    pub y: usize,
    /// Number of voxels in the z-direction.
    pub z: usize,
    /// Total number of voxels.
    pub total: usize,
}

impl Size {
    /// The length of the flattened array for the density data in 3d
    fn new(x: usize, y: usize, z: usize) -> Result<Self> {
        let total = match x.checked_mul(y).and_then(|xy| xy.checked_mul(z)) {
            Some(xyz) => xyz,
            None => bail!("Grid size is too large!"),
        };
        Ok(Self { x, y, z, total })
    }

    /// Converts a 1D index of the array into a 3D index
    pub fn to_3d(&self, p: usize) -> [usize; 3] {
        let x = p / (self.y * self.z);
        let y = (p / self.z) % self.y;
        let z = p % self.z;
        [x, y, z]
    }

    /// Converts a 3D index into the 1D index of the array, z runs fastest
    pub fn to_1d(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.y + y) * self.z + z
    }
}
