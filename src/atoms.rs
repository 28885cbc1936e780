use crate::errors::LatticeError;
use crate::utils;

/// The sphere centres: element symbols and Cartesian positions (Å) in file
/// order, with the cell they were read in. `text` keeps the structure header
/// as it appeared in the file.
pub struct Atoms {
    pub lattice: Lattice,
    pub symbols: Vec<String>,
    pub positions: Vec<[f64; 3]>,
    pub text: String,
}

impl Atoms {
    pub fn new(lattice: Lattice,
               symbols: Vec<String>,
               positions: Vec<[f64; 3]>,
               text: String)
               -> Self {
        Self { lattice,
               symbols,
               positions,
               text }
    }

    /// Iterate over (symbol, position) pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, [f64; 3])> {
        self.symbols
            .iter()
            .map(|s| s.as_str())
            .zip(self.positions.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A periodic cell, rows of `to_cartesian` are the lattice vectors.
///
/// `reciprocal` holds the reciprocal vectors as rows, without the 2π, so
/// reciprocal[i] . lattice[j] is 1 for i == j and 0 otherwise. The length of
/// reciprocal[i] is the inverse of the spacing between the lattice planes
/// normal to it.
#[derive(Clone, Debug)]
pub struct Lattice {
    pub to_cartesian: [[f64; 3]; 3],
    pub reciprocal: [[f64; 3]; 3],
    pub volume: f64,
}

impl Lattice {
    /// Fails for a lattice whose vectors don't span 3D space.
    pub fn new(lattice: [[f64; 3]; 3]) -> Result<Self, LatticeError> {
        let determinant = utils::determinant(&lattice);
        let volume = determinant.abs();
        if !volume.is_finite() || volume < 1e-16 {
            return Err(LatticeError { lattice });
        }
        let [a, b, c] = lattice;
        let reciprocal = [utils::cross(b, c), utils::cross(c, a), utils::cross(a, b)]
            .map(|v| v.map(|x| x / determinant));
        Ok(Self { to_cartesian: lattice,
                  reciprocal,
                  volume })
    }

    /// Converts a cartesian coordinate into fractional.
    pub fn fractional(&self, cartesian: [f64; 3]) -> [f64; 3] {
        self.reciprocal.map(|b| utils::vdot(cartesian, b))
    }

    /// Cartesian translations of every image of `centre` whose sphere of
    /// `radius` reaches a point of the home cell, fractional [0, 1) on each
    /// axis. The home translation is included, na runs slowest and nc fastest.
    pub fn images(&self, centre: [f64; 3], radius: f64) -> Vec<[f64; 3]> {
        let fractional = self.fractional(centre);
        let range = [0, 1, 2].map(|i| {
                                 // the sphere spans this many plane spacings
                                 let reach = radius * utils::vdot(self.reciprocal[i],
                                                                  self.reciprocal[i])
                                                            .sqrt();
                                 let low = (-fractional[i] - reach).floor() as isize;
                                 let high = (1.0 - fractional[i] + reach).ceil() as isize;
                                 (low, high)
                             });
        let mut images = Vec::new();
        for na in range[0].0..=range[0].1 {
            for nb in range[1].0..=range[1].1 {
                for nc in range[2].0..=range[2].1 {
                    images.push(utils::dot([na as f64, nb as f64, nc as f64],
                                           self.to_cartesian));
                }
            }
        }
        images
    }

    /// Converts a fractional coordinate into cartesian.
    pub fn cartesian(&self, fractional: [f64; 3]) -> [f64; 3] {
        utils::dot(fractional, self.to_cartesian)
    }
}
