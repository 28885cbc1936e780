use crate::atoms::{Atoms, Lattice};
use crate::errors::ParseError;
use crate::io::{FileFormat, Volumetric};
use crate::utils;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;

/// The coordinate system.
enum Coord {
    /// Fractional coordinates.
    Fractional,
    /// Cartesian coordinates.
    Cartesian,
}

/// The VASP file format for reading CHG, PARCHG and CHGCARs and the
/// POSCAR/CONTCAR structures at their head.
pub struct Vasp {}

/// Shorthand for the errors raised while reading VASP files.
fn error(reason: impl Into<String>) -> ParseError {
    ParseError::new("VASP", reason)
}

/// Parse every token of a line as a float.
fn floats(line: &str, what: &str) -> Result<Vec<f64>, ParseError> {
    line.split_whitespace()
        .map(|x| {
            x.parse::<f64>()
             .map_err(|_| error(format!("cannot parse \"{}\" in the {}.", x, what)))
        })
        .collect()
}

/// Byte offset of the end of the first `n` whitespace separated columns.
fn column_end(line: &str, n: usize) -> usize {
    let mut columns = 0;
    let mut in_column = false;
    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if in_column {
                columns += 1;
                if columns == n {
                    return i;
                }
            }
            in_column = false;
        } else {
            in_column = true;
        }
    }
    line.len()
}

/// Line iterator that keeps a copy of what it has handed out.
struct Lines<'a> {
    lines: std::str::Lines<'a>,
    text: String,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self { lines: text.lines(),
               text: String::new() }
    }

    fn next(&mut self, what: &str) -> Result<&'a str, ParseError> {
        match self.lines.next() {
            Some(line) => {
                self.text.push_str(line);
                self.text.push('\n');
                Ok(line)
            }
            None => Err(error(format!("file ended before the {}.", what))),
        }
    }
}

impl Vasp {
    /// Read atom information from the POSCAR formatted head of `lines`.
    fn to_atoms(&self, lines: &mut Lines) -> Result<Atoms> {
        let comment = lines.next("comment line")?;
        let mut scale = floats(lines.next("scale factor")?, "scale factor")?;
        let mut lattice = [[0f64; 3]; 3];
        for (i, row) in lattice.iter_mut().enumerate() {
            let v = floats(lines.next("lattice vectors")?, "lattice vectors")?;
            if v.len() < 3 {
                return Err(error(format!("lattice vector {} is incomplete.", i + 1)).into());
            }
            row.copy_from_slice(&v[..3]);
        }
        // the scale can be negative and this means that it is the volume of the cell
        // it can also be 3 values which is a multiplier for each lattice vector
        match scale.len() {
            1 => {
                if scale[0] < 0f64 {
                    let volume = utils::determinant(&lattice).abs();
                    scale[0] = (-scale[0] / volume).cbrt();
                }
                scale.push(scale[0]);
                scale.push(scale[0]);
            }
            3 => (),
            _ => return Err(error("the scale factor needs 1 or 3 values.").into()),
        }
        // three scale values multiply the cartesian components of every vector
        for row in lattice.iter_mut() {
            for (j, v) in row.iter_mut().enumerate() {
                *v *= scale[j];
            }
        }
        let lattice = Lattice::new(lattice)?;
        // VASP 5 has a line of element symbols before the counts
        let dubious = lines.next("element counts")?;
        let counts_only = dubious.split_whitespace().all(|x| x.parse::<usize>().is_ok());
        let (species, counts) = if counts_only {
            (comment.split_whitespace().collect::<Vec<&str>>(), dubious)
        } else {
            (dubious.split_whitespace().collect(), lines.next("element counts")?)
        };
        let counts = counts.split_whitespace()
                           .map(|x| {
                               x.parse::<usize>()
                                .map_err(|_| error(format!("cannot parse \"{}\" as an atom count.", x)))
                           })
                           .collect::<Result<Vec<usize>, ParseError>>()?;
        if species.len() != counts.len() {
            let source = if counts_only { "the comment line" } else { "the symbol line" };
            return Err(error(format!("{} species counted but {} has {} element symbols.",
                                     counts.len(),
                                     source,
                                     species.len())).into());
        }
        let symbols = species.iter()
                             .zip(&counts)
                             .flat_map(|(s, n)| {
                                 // POTCAR style symbols such as Pd_pv or Co/abc
                                 let s = s.split(|c: char| c == '_' || c == '/')
                                          .next()
                                          .unwrap_or(*s);
                                 std::iter::repeat(String::from(s)).take(*n)
                             })
                             .collect::<Vec<String>>();
        let selective = Regex::new(r"^\s*[sS]")?;
        let cartesian = Regex::new(r"^\s*[cCkK]")?;
        let mut dubious = lines.next("coordinate mode")?;
        if selective.is_match(dubious) {
            dubious = lines.next("coordinate mode")?;
        }
        let coord = if cartesian.is_match(dubious) {
            Coord::Cartesian
        } else {
            Coord::Fractional
        };
        let mut positions = Vec::with_capacity(symbols.len());
        for _ in 0..symbols.len() {
            // selective dynamics flags follow the first 3 columns
            let line = lines.next("atom positions")?;
            let p = floats(line.get(..column_end(line, 3)).unwrap_or(line),
                           "atom positions")?;
            if p.len() < 3 {
                return Err(error("an atom position is incomplete.").into());
            }
            positions.push(match coord {
                               Coord::Fractional => lattice.cartesian([p[0], p[1], p[2]]),
                               Coord::Cartesian => [p[0] * scale[0],
                                                    p[1] * scale[1],
                                                    p[2] * scale[2]],
                           });
        }
        Ok(Atoms::new(lattice, symbols, positions, lines.text.clone()))
    }

    /// Read a POSCAR or CONTCAR structure.
    pub fn read_structure(&self, filename: &str) -> Result<Atoms> {
        let text = fs::read_to_string(filename).with_context(|| {
                                                   format!("Unable to open {}", filename)
                                               })?;
        let mut lines = Lines::new(&text);
        self.to_atoms(&mut lines)
            .with_context(|| format!("Unable to read the structure in {}", filename))
    }
}

/// Read `total` values from the lines, VASP writes x fastest so the values are
/// reordered to run z fastest and divided by the cell volume.
fn read_density(lines: &mut Lines,
                grid: [usize; 3],
                volume: f64)
                -> Result<Vec<f64>, ParseError> {
    let total = grid.iter().product::<usize>();
    let mut raw = Vec::with_capacity(total);
    // density lines are not kept in the header text
    while raw.len() < total {
        let line = lines.lines
                        .next()
                        .ok_or_else(|| error("file ended before the density."))?;
        raw.extend(floats(line, "density")?);
    }
    if raw.len() != total {
        return Err(error(format!("density holds {} values but the grid {:?} needs {}.",
                                 raw.len(),
                                 grid,
                                 total)));
    }
    let [nx, ny, nz] = grid;
    let mut density = vec![0f64; total];
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                density[(x * ny + y) * nz + z] = raw[x + nx * (y + ny * z)] / volume;
            }
        }
    }
    Ok(density)
}

/// Parse a grid size line, None if the line isn't three integers.
fn grid_line(line: &str) -> Option<[usize; 3]> {
    let sizes = line.split_whitespace()
                    .map(|x| x.parse::<usize>().ok())
                    .collect::<Option<Vec<usize>>>()?;
    match sizes[..] {
        [x, y, z] => Some([x, y, z]),
        _ => None,
    }
}

impl FileFormat for Vasp {
    /// Read a VASP density. Every block after the first starts with a repeat
    /// of the grid line, anything else in between (augmentation occupancies,
    /// magnetic moments) is skipped.
    fn read(&self, filename: &str) -> Result<Volumetric> {
        let text = fs::read_to_string(filename).with_context(|| {
                                                   format!("Unable to open {}", filename)
                                               })?;
        let mut lines = Lines::new(&text);
        let atoms = self.to_atoms(&mut lines)
                        .with_context(|| format!("Unable to read the structure in {}", filename))?;
        // lets find the start
        let grid = loop {
            let line = lines.next("grid size")?;
            if line.trim().is_empty() {
                continue;
            }
            match grid_line(line) {
                Some(grid) => break grid,
                None => return Err(error(format!("expected the grid size, found \"{}\".",
                                                 line.trim())).into()),
            }
        };
        let volume = atoms.lattice.volume;
        // there could be a maximum of 4 densities 1 total and then 1 or 3 spin
        let mut densities = Vec::with_capacity(4);
        densities.push(read_density(&mut lines, grid, volume)?);
        while let Some(line) = lines.lines.next() {
            if grid_line(line) == Some(grid) {
                densities.push(read_density(&mut lines, grid, volume)?);
            }
        }
        Ok(Volumetric { grid,
                        lattice: atoms.lattice.to_cartesian,
                        atoms: Some(atoms),
                        densities })
    }

    fn name(&self) -> &'static str {
        "VASP"
    }
}
