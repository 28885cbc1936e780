use std::fmt::{Debug, Display};

/// The three spin density grids do not describe the same voxels.
pub enum GridMismatchError {
    /// Dimensions(component, expected, found)
    Dimensions(char, [usize; 3], [usize; 3]),
    /// Lattice(component, expected, found)
    Lattice(char, [[f64; 3]; 3], [[f64; 3]; 3]),
}

impl Display for GridMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dimensions(c, expected, found) => write!(
                f,
                "Grid of the {} component {:?} differs from the x component {:?}.",
                c, found, expected
            ),
            Self::Lattice(c, expected, found) => write!(
                f,
                "Lattice of the {} component {:?} differs from the x component {:?}.",
                c, found, expected
            ),
        }
    }
}

impl Debug for GridMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for GridMismatchError {}

/// The lattice, or the voxel lattice derived from it, does not span 3D space.
pub struct LatticeError {
    pub lattice: [[f64; 3]; 3],
}

impl Display for LatticeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lattice {:?} doesn't span 3D space.", self.lattice)
    }
}

impl Debug for LatticeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for LatticeError {}

/// An input file that could be opened but not understood.
pub struct ParseError {
    /// The format the file was being read as.
    pub format: &'static str,
    /// What went wrong.
    pub reason: String,
}

impl ParseError {
    pub fn new(format: &'static str, reason: impl Into<String>) -> Self {
        Self { format,
               reason: reason.into() }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unable to read as {} format: {}", self.format, self.reason)
    }
}

impl Debug for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for ParseError {}

/// Error for reading of Arguments.
pub enum ArgumentError {
    /// Passed a value that isn't parsable.
    /// Unparsable(flag, value, type)
    Unparsable(String, String, String),
    /// Passed a radius that cannot contain any voxel.
    /// NotPositive(flag, value)
    NotPositive(String, f64),
    /// Passed an unvalid value for the flag.
    /// NotValidValue(flag, value)
    NotValidValue(String, String),
}

impl Display for ArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparsable(flag, value, typ) => write!(
                f,
                "The supplied value \"{}\" for the option \"{}\" is unparsable as a {}.",
                value, flag, typ
            ),
            Self::NotPositive(flag, value) => write!(
                f,
                "The option \"{}\" requires a positive value, got {}.",
                flag, value
            ),
            Self::NotValidValue(flag, value) => write!(
                f,
                "The value \"{}\" is not valid input for the option \"{}\".",
                value, flag
            ),
        }
    }
}

impl Debug for ArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for ArgumentError {}
