//! A multi-threaded binary and library for integrating the atomic spin-dipole
//! term, Tz, from the spin density of a non-collinear (spin-orbit coupled)
//! calculation. The magnetisation density is integrated in a sphere around
//! each atom with the kernel ½ [m_z − 3 r̂_z (r̂·m)] and the atomic values are
//! summed to a cell total.
//!
//! ## Building
//! ```sh
//! $ cargo build --release
//! ```
//! The executable is written to ./target/release/tz.
//!
//! ## Method
//! Voxel positions are the grid index times the voxel edges (lattice vector
//! over grid points), with no origin offset. A voxel belongs to an atom when
//! it lies strictly inside the sphere, and the integral is the sum of the
//! kernel times the voxel volume. At the voxel sitting exactly on an atom the
//! radial unit vector is taken as zero. Displacements are not wrapped unless
//! --periodic is passed, in which case every image of an atom whose sphere
//! reaches into the cell is integrated too.
//!
//! ## Usage
//! The program takes the x, y and z components of the spin density as three
//! [cube] files (Mx.cube, My.cube and Mz.cube by default) and the atomic
//! positions from a [VASP] POSCAR.
//! ```sh
//! $ tz Mx.cube My.cube Mz.cube -p POSCAR
//! ```
//! A non-collinear CHGCAR already holds all three components and the structure.
//! ```sh
//! $ tz --chgcar CHGCAR
//! ```
//! Sphere radii are set per element and every other element uses the default
//! radius.
//! ```sh
//! $ tz -r Pd=2.71 -r Co=2.1 -d 2.0
//! ```
//! For a detailed list of usage options run
//! ```sh
//! $ tz --help
//! ```
//! ## Output
//! One line per atom with its Tz in μB, followed by the cell total and the cell
//! total multiplied by 7 (see --multiplier).
//! ## License
//! MIT
//!
//! [VASP]: <https://www.vasp.at/>
//! [cube]: <https://gaussian.com/>

/// Integrates Tz in the sphere of every atom.
pub mod analysis;
/// For parsing command-line arguments.
pub mod arguments;
/// Contains [Atoms](atoms::Atoms) for storing the element and position of
/// each sphere centre. Also contains [Lattice](atoms::Lattice) for storing
/// information about the cell in which the density is stored.
pub mod atoms;
/// Provides custom errors types.
pub mod errors;
/// Contains [VectorField](field::VectorField), the three spin density
/// components stacked on a shared grid.
pub mod field;
/// Contains [Grid](grid::Grid) for the voxel basis and the cartesian position
/// of every voxel.
pub mod grid;
/// Handles the File I/O for the density files, structure files and results.
/// Provides a [FileFormat](io::FileFormat) trait to be implemented by modules designed to
/// cover a specific file format of a density file.
pub mod io;
/// Provides a [visible](progress::Bar) and [hidden](progress::HiddenBar) implementation of the
/// trait [ProgressBar](progress::ProgressBar).
pub mod progress;
/// The integration sphere radius of each element.
pub mod radii;
/// Misc functions mainly for vector and matrix manipulation.
pub mod utils;
