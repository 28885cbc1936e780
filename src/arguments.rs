use crate::analysis::Boundary;
use crate::errors::ArgumentError;
use crate::io::FileType;
use crate::radii::{RadiusTable, DEFAULT_RADIUS};
use clap::{crate_authors, crate_version, Arg, ArgMatches, Command};

/// Where the three spin density components are read from.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    /// One file per component.
    Components {
        x: String,
        y: String,
        z: String,
        file_type: FileType,
    },
    /// A single non-collinear VASP file holding total, mx, my and mz.
    Chgcar(String),
}

/// Create a container for dealing with clap and being able to test arg parsing
pub enum ClapApp {
    App,
}

impl ClapApp {
    /// Create and return the clap::Command
    pub fn get() -> Command<'static> {
        Command::new("Spin-dipole Tz Integration")
            .author(crate_authors!())
            .version(crate_version!())
            .about("Integrates the spin-dipole term Tz of a non-collinear spin density \
                    in a sphere around each atom.")
            .arg(Arg::new("x")
                .index(1)
                .help("The x component of the spin density. [default: Mx.cube]"))
            .arg(Arg::new("y")
                .index(2)
                .help("The y component of the spin density. [default: My.cube]"))
            .arg(Arg::new("z")
                .index(3)
                .help("The z component of the spin density. [default: Mz.cube]"))
            .arg(Arg::new("chgcar")
                .short('c')
                .long("chgcar")
                .takes_value(true)
                .conflicts_with_all(&["x", "y", "z", "file type"])
                .help("A non-collinear VASP density holding all three components.")
                .long_help(
"Read the spin density from a single non-collinear CHGCAR (or CHG) instead of
three component files. The file must hold four densities: the total charge and
the x, y and z magnetisation. Unless --poscar is passed the structure at the
head of this file is used for the atoms."))
            .arg(Arg::new("file type")
                .short('t')
                .long("type")
                .takes_value(true)
                .possible_values(["cube", "vasp"])
                .help("The file type of the component files.")
                .long_help(
"The file type of the component files. If this is not supplied the type will
be infered from the filename of the x component."))
            .arg(Arg::new("poscar")
                .short('p')
                .long("poscar")
                .takes_value(true)
                .help("The structure file giving the sphere centres. [default: POSCAR]"))
            .arg(Arg::new("radius")
                .short('r')
                .long("radius")
                .takes_value(true)
                .multiple_occurrences(true)
                .number_of_values(1)
                .help("Sphere radius for an element as SYMBOL=RADIUS in Å.")
                .long_help(
"Sphere radius for an element, in Å, passed as SYMBOL=RADIUS. The flag can be
repeated (tz -r Pd=2.71 -r Co=2.1). Entries replace the built-in radii of
Pd (2.710) and Co (2.100), any other element uses the default radius."))
            .arg(Arg::new("default radius")
                .short('d')
                .long("default-radius")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Sphere radius in Å for elements without an entry. [default: 2.0]"))
            .arg(Arg::new("multiplier")
                .short('m')
                .long("multiplier")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("7")
                .help("Factor applied to the cell total for the final line."))
            .arg(Arg::new("periodic")
                .long("periodic")
                .takes_value(false)
                .help("Include the periodic images of each atom.")
                .long_help(
"By default the displacement between a voxel and an atom is not wrapped, so a
sphere that crosses a cell face loses the voxels on the far side. With this flag
every periodic image of an atom whose sphere reaches into the cell is
integrated too, however many cells the sphere spans."))
            .arg(Arg::new("verbose")
                .short('v')
                .long("verbose")
                .takes_value(false)
                .help("Print the radius and voxel count of every sphere."))
            .arg(Arg::new("threads")
                .short('J')
                .long("threads")
                .takes_value(true)
                .default_value("0")
                .help("Number of threads to distribute the calculation over.")
                .long_help(
"The number of threads to be used by the program. A default value of 0 is used
to allow the program to best decide how to use the available hardware."))
    }
}

/// Holds the arguments passed to the program from the command-line
pub struct Args {
    pub source: Source,
    pub poscar: Option<String>,
    pub radii: RadiusTable,
    pub multiplier: f64,
    pub boundary: Boundary,
    pub threads: usize,
    pub verbose: bool,
}

/// Parse a float flag.
fn parse_float(arguments: &ArgMatches, flag: &str) -> Result<Option<f64>, ArgumentError> {
    match arguments.value_of(flag) {
        Some(s) => s.parse::<f64>().map(Some).map_err(|_| {
                                                 ArgumentError::Unparsable(String::from(flag),
                                                                           String::from(s),
                                                                           String::from("float"))
                                             }),
        None => Ok(None),
    }
}

impl Args {
    /// Initialises the structure from the command-line arguments.
    pub fn new(arguments: ArgMatches) -> Result<Self, ArgumentError> {
        let source = match arguments.value_of("chgcar") {
            Some(f) => Source::Chgcar(String::from(f)),
            None => {
                let x = String::from(arguments.value_of("x").unwrap_or("Mx.cube"));
                let y = String::from(arguments.value_of("y").unwrap_or("My.cube"));
                let z = String::from(arguments.value_of("z").unwrap_or("Mz.cube"));
                let file_type = match arguments.value_of("file type") {
                    Some("cube") => FileType::Cube,
                    Some("vasp") => FileType::Vasp,
                    Some(t) => {
                        return Err(ArgumentError::NotValidValue(String::from("type"),
                                                                String::from(t)))
                    }
                    None => FileType::infer(&x),
                };
                Source::Components { x,
                                     y,
                                     z,
                                     file_type }
            }
        };
        let poscar = arguments.value_of("poscar").map(String::from);
        let default_radius =
            parse_float(&arguments, "default radius")?.unwrap_or(DEFAULT_RADIUS);
        if default_radius.is_nan() || default_radius <= 0.0 {
            return Err(ArgumentError::NotPositive(String::from("default-radius"),
                                                  default_radius));
        }
        let mut radii = RadiusTable::default();
        radii.default = default_radius;
        if let Some(entries) = arguments.values_of("radius") {
            for entry in entries {
                radii.insert_str(entry)?;
            }
        }
        let multiplier = parse_float(&arguments, "multiplier")?.unwrap_or(7.0);
        let boundary = if arguments.is_present("periodic") {
            Boundary::Periodic
        } else {
            Boundary::Open
        };
        let threads = match arguments.value_of("threads") {
            Some(s) => s.parse::<usize>().map_err(|_| {
                                             ArgumentError::Unparsable(String::from("threads"),
                                                                       String::from(s),
                                                                       String::from("integer"))
                                         })?,
            None => 0,
        };
        let threads = if threads == 0 { num_cpus::get() } else { threads };
        Ok(Self { source,
                  poscar,
                  radii,
                  multiplier,
                  boundary,
                  threads,
                  verbose: arguments.is_present("verbose") })
    }
}
