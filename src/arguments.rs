use crate::errors::Error;
use crate::pipeline::Config;
use clap::{crate_authors, value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Create a container for dealing with clap and being able to test arg parsing
pub struct ClapApp {}

impl ClapApp {
    /// Create and return the clap::Command
    pub fn get() -> Command<'static> {
        Command::new("Probability Density Cubes")
            .author(crate_authors!())
            .version(env!("CARGO_PKG_VERSION"))
            .about("Builds probability density cube files of an adsorbate from GCMC snapshots.")
            .arg(Arg::new("before")
                .required(true)
                .index(1)
                .value_parser(value_parser!(PathBuf))
                .help("The trajectory before the step."))
            .arg(Arg::new("after")
                .required(true)
                .index(2)
                .value_parser(value_parser!(PathBuf))
                .help("The trajectory after the step."))
            .arg(Arg::new("grid size")
                .short('g')
                .long("grid")
                .takes_value(true)
                .value_parser(value_parser!(usize))
                .default_value("200")
                .help("Number of bins along each axis of the cell."))
            .arg(Arg::new("cell")
                .short('a')
                .long("cell")
                .takes_value(true)
                .value_parser(value_parser!(f64))
                .default_value("50.256")
                .help("Edge length of the cubic cell in Angstrom.")
                .long_help(
"Edge length of the cubic cell, in Angstrom, written to the cube files. The
density itself is binned over the cell read from the CRYST1 record of each
trajectory."))
            .arg(Arg::new("element")
                .short('e')
                .long("element")
                .takes_value(true)
                .value_parser(value_parser!(String))
                .default_value("Ar")
                .help("Atomic symbol of the adsorbate."))
            .arg(Arg::new("padding")
                .short('n')
                .long("padding")
                .takes_value(true)
                .value_parser(value_parser!(usize))
                .default_value("15")
                .help("Radius, in voxels, of the smoothing window.")
                .long_help(
"Each voxel of the difference density is replaced by the mean of every voxel
no more than this many steps away along each axis. Near the edges of the grid
only the voxels that exist are averaged. A value of 0 disables smoothing."))
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .takes_value(true)
                .value_parser(value_parser!(PathBuf))
                .default_value(".")
                .help("Directory to write the cube files to."))
            .arg(Arg::new("threads")
                .short('J')
                .long("threads")
                .takes_value(true)
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Number of threads to distribute the calculation over.")
                .long_help(
"The number of threads to be used by the program. A default value of 0 is used
to allow the program to best decide how to use the available hardware."))
            .arg(Arg::new("silent")
                .short('s')
                .long("silent")
                .action(ArgAction::SetTrue)
                .help("Hide the progress bars."))
    }
}

/// Holds the arguments passed to the program from the command-line
pub struct Args {
    pub before: PathBuf,
    pub after: PathBuf,
    pub grid_size: usize,
    pub cell_a: f64,
    pub element: String,
    pub padding_n: usize,
    pub output: PathBuf,
    pub threads: usize,
    pub silent: bool,
}

impl Args {
    /// Initialises the structure from the command-line arguments.
    // safe to unwrap as each argument is either required or has a default
    pub fn new(arguments: ArgMatches) -> Self {
        let before = arguments.get_one::<PathBuf>("before").unwrap().clone();
        let after = arguments.get_one::<PathBuf>("after").unwrap().clone();
        let grid_size = *arguments.get_one::<usize>("grid size").unwrap();
        let cell_a = *arguments.get_one::<f64>("cell").unwrap();
        let element = arguments.get_one::<String>("element").unwrap().clone();
        let padding_n = *arguments.get_one::<usize>("padding").unwrap();
        let output = arguments.get_one::<PathBuf>("output").unwrap().clone();
        let threads = *arguments.get_one::<usize>("threads").unwrap();
        let silent = arguments.get_one::<bool>("silent").copied().unwrap_or(false);
        Self { before,
               after,
               grid_size,
               cell_a,
               element,
               padding_n,
               output,
               threads,
               silent }
    }

    /// Validates the arguments into the configuration of a run.
    pub fn config(&self) -> Result<Config, Error> {
        Ok(Config::new(self.before.clone(),
                       self.after.clone(),
                       self.grid_size,
                       self.cell_a,
                       &self.element,
                       self.padding_n)?.output(self.output.clone())
                                       .threads(self.threads)
                                       .visible_pbar(!self.silent))
    }
}
