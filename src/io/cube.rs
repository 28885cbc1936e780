use crate::errors::ParseError;
use crate::io::reader::HeaderReader;
use crate::io::{FileFormat, Volumetric};
use anyhow::Result;

/// Å per Bohr.
pub const LENGTH_UNITS: f64 = 0.52917721067;

/// The Gaussian cube format. Densities are read as written, the spin density
/// cubes are expected to already be in μB/Å³.
pub struct Cube {}

fn parse_f64(token: &str, what: &str) -> Result<f64, ParseError> {
    token.parse::<f64>().map_err(|_| {
                            ParseError::new("cube",
                                            format!("cannot parse \"{}\" in the {}.",
                                                    token, what))
                        })
}

impl FileFormat for Cube {
    /// Read a cube formatted density.
    fn read(&self, filename: &str) -> Result<Volumetric> {
        let mut reader = HeaderReader::open(filename, self.name())?;
        // first two lines are comments
        for _ in 0..2 {
            reader.next_line("comment lines")?;
        }
        let natoms = {
            let text = reader.next_line("atom count")?;
            let split = text.split_whitespace().collect::<Vec<&str>>();
            if split.len() < 4 {
                return Err(ParseError::new("cube",
                                           "atom count line needs the count and origin.").into());
            }
            if split.len() == 5 && parse_f64(split[4], "atom count line")? != 1.0 {
                return Err(ParseError::new("cube",
                                           "multiple values per voxel are unsupported.").into());
            }
            let natoms = split[0].parse::<isize>().map_err(|_| {
                                                      ParseError::new("cube",
                                                                      format!("cannot parse \"{}\" as an atom count.",
                                                                              split[0]))
                                                  })?;
            if natoms < 0 {
                return Err(ParseError::new("cube",
                                           "multiple values per voxel are unsupported.").into());
            }
            natoms as usize
        };
        let mut grid = [0usize; 3];
        let mut lattice = [[0f64; 3]; 3];
        for i in 0..3 {
            let text = reader.next_line("voxel vectors")?;
            let split = text.split_whitespace().collect::<Vec<&str>>();
            if split.len() < 4 {
                return Err(ParseError::new("cube",
                                           format!("voxel vector {} is incomplete.", i + 1)).into());
            }
            let n = split[0].parse::<isize>().map_err(|_| {
                                                 ParseError::new("cube",
                                                                 format!("cannot parse \"{}\" as a grid size.",
                                                                         split[0]))
                                             })?;
            // a negative voxel count means the vectors are already in Å
            let units = if n < 0 { 1.0 } else { LENGTH_UNITS };
            grid[i] = n.unsigned_abs();
            for j in 0..3 {
                lattice[i][j] = parse_f64(split[j + 1], "voxel vectors")?
                                * units
                                * grid[i] as f64;
            }
        }
        for _ in 0..natoms {
            reader.next_line("atom positions")?;
        }
        let density = reader.read_rest()?
                            .split_whitespace()
                            .map(|x| parse_f64(x, "density"))
                            .collect::<Result<Vec<f64>, ParseError>>()?;
        let total = grid.iter().product::<usize>();
        if density.len() != total {
            return Err(ParseError::new("cube",
                                       format!("expected {} density values for grid {:?}, found {}.",
                                               total,
                                               grid,
                                               density.len())).into());
        }
        Ok(Volumetric { grid,
                        lattice,
                        atoms: None,
                        densities: vec![density] })
    }

    fn name(&self) -> &'static str {
        "cube"
    }
}
