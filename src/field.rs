use crate::errors::GridMismatchError;
use crate::grid::Grid;
use crate::utils::all_close;
use anyhow::{bail, Result};

/// A single scalar density sampled on a grid, as read from one file.
pub struct ScalarField {
    /// Number of voxels along each lattice vector.
    pub grid: [usize; 3],
    /// The cell, rows are the lattice vectors in Å.
    pub lattice: [[f64; 3]; 3],
    /// Flattened density with z running fastest.
    pub data: Vec<f64>,
}

/// The spin density vector field (mx, my, mz) at every voxel of a [`Grid`].
pub struct VectorField {
    pub grid: Grid,
    pub data: Vec<[f64; 3]>,
}

impl VectorField {
    /// Stacks the x, y and z components into a single vector field.
    /// Every component must share the grid and lattice of the x component.
    pub fn from_components(x: ScalarField,
                           y: ScalarField,
                           z: ScalarField)
                           -> Result<Self> {
        for (label, component) in [('y', &y), ('z', &z)] {
            if component.grid != x.grid {
                return Err(GridMismatchError::Dimensions(label,
                                                         x.grid,
                                                         component.grid).into());
            }
            if !all_close(&component.lattice, &x.lattice) {
                return Err(GridMismatchError::Lattice(label,
                                                      x.lattice,
                                                      component.lattice).into());
            }
        }
        let grid = Grid::new(x.grid, x.lattice)?;
        for (label, component) in [('x', &x), ('y', &y), ('z', &z)] {
            if component.data.len() != grid.size.total {
                bail!("The {} component holds {} values but the grid {:?} needs {}.",
                      label,
                      component.data.len(),
                      x.grid,
                      grid.size.total);
            }
        }
        let data = x.data
                    .iter()
                    .zip(&y.data)
                    .zip(&z.data)
                    .map(|((mx, my), mz)| [*mx, *my, *mz])
                    .collect();
        Ok(Self { grid, data })
    }

    /// Builds a vector field directly from the grid and per voxel vectors.
    pub fn new(grid: Grid, data: Vec<[f64; 3]>) -> Result<Self> {
        if data.len() != grid.size.total {
            bail!("Vector field holds {} values but the grid needs {}.",
                  data.len(),
                  grid.size.total);
        }
        Ok(Self { grid, data })
    }
}
