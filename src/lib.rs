//! Probability density maps of an adsorbate from the snapshots of a Grand
//! Canonical Monte Carlo (GCMC) calculation, written as cube files.
//!
//! Two trajectories, one from before and one from after a step of the
//! calculation (for instance two points of an isotherm), are binned onto a
//! grid spanning the unit cell. Each density is min-max normalised, the
//! before density is subtracted from the after density and the difference is
//! smoothed with a local average. All four grids are written out.
//!
//! ## Installing the binary
//! ### From Source
//! ```sh
//! $ cargo build --verbose --release
//! ```
//! which will create the ./target/release/pdc executable.
//!
//! ## Usage
//! The program takes the two trajectories, in the PDB "movie" format written
//! by codes such as RASPA, as input.
//! ```sh
//! $ pdc Movie_6000.pdb Movie_10000.pdb --element Ar --grid 200 --cell 50.256 --padding 15
//! ```
//! For a detailed list of usage options run
//! ```sh
//! $ pdc --help
//! ```
//! Logging is controlled by the RUST_LOG environment variable.
//! ## Output
//! Four cube files are written, `prob_density_<element>_before_step.cube`,
//! `prob_density_<element>_after_step.cube`,
//! `prob_density_<element>_difference.cube` and
//! `prob_density_<element>_difference_filtered.cube`. Either all four are
//! written or, on any error, none of them are.
//! ## License
//! MIT

/// For parsing command-line arguments.
pub mod arguments;
/// Contains [Atoms](atoms::Atoms) for storing the selected positions read
/// from a trajectory and [Lattice](atoms::Lattice) for storing information on
/// the cell.
pub mod atoms;
/// Bins positions into a normalised probability density.
pub mod density;
/// Provides custom errors types.
pub mod errors;
/// The boundary aware local average used to smooth the difference density.
pub mod filter;
/// Contains [Grid](grid::Grid), a scalar field on a 3d grid.
pub mod grid;
/// Handles the File I/O for both the trajectories and the cube files.
/// Provides a [FileFormat](io::FileFormat) trait to be implemented by modules
/// designed to write a specific volumetric format.
pub mod io;
/// Runs the whole calculation from a [Config](pipeline::Config).
pub mod pipeline;
/// Provides a [visible](progress::Bar) and [hidden](progress::HiddenBar)
/// implementation of the trait [ProgressBar](progress::ProgressBar).
pub mod progress;
