use crate::errors::ArgumentError;
use rustc_hash::FxHashMap;

/// Radius used for any element missing from the table, in Å.
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Integration sphere radii, in Å, keyed by element symbol.
#[derive(Clone, Debug)]
pub struct RadiusTable {
    radii: FxHashMap<String, f64>,
    pub default: f64,
}

impl Default for RadiusTable {
    /// The Pd/Co radii with a 2 Å fallback.
    fn default() -> Self {
        let mut table = Self::empty(DEFAULT_RADIUS);
        table.insert("Pd", 2.710);
        table.insert("Co", 2.100);
        table
    }
}

impl RadiusTable {
    /// A table with no entries, every atom uses `default`.
    pub fn empty(default: f64) -> Self {
        Self { radii: FxHashMap::default(),
               default }
    }

    /// Adds or replaces the radius of an element.
    pub fn insert(&mut self, symbol: &str, radius: f64) {
        self.radii.insert(String::from(symbol), radius);
    }

    /// The radius for an element, falling back to the default.
    pub fn get(&self, symbol: &str) -> f64 {
        self.radii.get(symbol).copied().unwrap_or(self.default)
    }

    /// Whether the element has an explicit entry.
    pub fn contains(&self, symbol: &str) -> bool {
        self.radii.contains_key(symbol)
    }

    /// Parses and inserts an entry of the form `Sym=radius`.
    pub fn insert_str(&mut self, entry: &str) -> Result<(), ArgumentError> {
        let (symbol, radius) = match entry.split_once('=') {
            Some((s, r)) if !s.trim().is_empty() => (s.trim(), r.trim()),
            _ => {
                return Err(ArgumentError::NotValidValue(String::from("radius"),
                                                        String::from(entry)))
            }
        };
        let radius = radius.parse::<f64>().map_err(|_| {
                                               ArgumentError::Unparsable(String::from("radius"),
                                                                         String::from(radius),
                                                                         String::from("float"))
                                           })?;
        if radius.is_nan() || radius <= 0.0 {
            return Err(ArgumentError::NotPositive(String::from("radius"),
                                                  radius));
        }
        self.insert(symbol, radius);
        Ok(())
    }
}
