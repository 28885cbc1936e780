use crate::atoms::Atoms;
use crate::errors::ParseError;
use crate::field::ScalarField;
use anyhow::Result;
use std::fmt::{Display, Formatter};

pub mod cube;
pub mod output;
pub mod reader;
pub mod vasp;

/// Everything read from a volumetric file.
pub struct Volumetric {
    /// Number of voxels along each lattice vector.
    pub grid: [usize; 3],
    /// The cell, rows are the lattice vectors in Å.
    pub lattice: [[f64; 3]; 3],
    /// The structure, if the format stores one that can be used.
    pub atoms: Option<Atoms>,
    /// Each density in the file, flattened with z running fastest.
    pub densities: Vec<Vec<f64>>,
}

impl Volumetric {
    /// Take a single density out of the file as a [`ScalarField`].
    pub fn scalar_field(&mut self, index: usize) -> Result<ScalarField> {
        if index >= self.densities.len() {
            return Err(ParseError::new("volumetric",
                                       format!("density {} requested but the file holds {}.",
                                               index + 1,
                                               self.densities.len())).into());
        }
        Ok(ScalarField { grid: self.grid,
                         lattice: self.lattice,
                         data: std::mem::take(&mut self.densities[index]) })
    }

    /// Split a non-collinear file (total, mx, my, mz) into its spin components.
    pub fn spin_components(mut self)
                           -> Result<(ScalarField, ScalarField, ScalarField)> {
        if self.densities.len() != 4 {
            return Err(ParseError::new("volumetric",
                                       format!("expected 4 densities for a non-collinear \
                                                spin density, found {}.",
                                               self.densities.len())).into());
        }
        Ok((self.scalar_field(1)?,
            self.scalar_field(2)?,
            self.scalar_field(3)?))
    }
}

/// Trait to be implemented by each volumetric file format.
pub trait FileFormat {
    /// Read the file, returning the grid, lattice and densities.
    fn read(&self, filename: &str) -> Result<Volumetric>;

    /// Name used in messages.
    fn name(&self) -> &'static str;
}

/// The supported volumetric file types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FileType {
    Cube,
    Vasp,
}

impl FileType {
    /// Guess the file type from the file name, anything that isn't obviously a
    /// cube is read as VASP.
    pub fn infer(filename: &str) -> Self {
        if filename.to_lowercase().contains("cube") {
            Self::Cube
        } else {
            Self::Vasp
        }
    }

    /// The reader for this file type.
    pub fn reader(&self) -> Box<dyn FileFormat> {
        match self {
            Self::Cube => Box::new(cube::Cube {}),
            Self::Vasp => Box::new(vasp::Vasp {}),
        }
    }
}

/// Formats a float like `{: .5e}` in Python and C, a sign or a space followed
/// by the mantissa and an exponent with a sign and at least two digits.
pub struct Scientific(pub f64);

impl Display for Scientific {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let precision = f.precision().unwrap_or(5);
        let sign = if self.0.is_sign_negative() { "-" } else { " " };
        if !self.0.is_finite() {
            let text = if self.0.is_nan() { "nan" } else { "inf" };
            let sign = if self.0.is_nan() { " " } else { sign };
            return write!(f, "{}{}", sign, text);
        }
        let formatted = format!("{:.*e}", precision, self.0.abs());
        let (mantissa, exponent) = match formatted.split_once('e') {
            Some(split) => split,
            None => (formatted.as_str(), "0"),
        };
        let exponent = exponent.parse::<i32>().map_err(|_| std::fmt::Error)?;
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        write!(f,
               "{}{}e{}{:02}",
               sign,
               mantissa,
               exp_sign,
               exponent.abs())
    }
}
