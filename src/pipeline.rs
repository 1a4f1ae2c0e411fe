use crate::atoms::Lattice;
use crate::density::probability_density;
use crate::errors::{Error, Stage};
use crate::filter::local_average;
use crate::grid::Grid;
use crate::io::output::{self, Output};
use crate::io::pdb::Pdb;
use crate::io::FileFormat;
use anyhow::{Context, Result};
use crossbeam_utils::thread;
use std::path::PathBuf;

/// Largest difference, in Angstrom, between the cell read from a trajectory
/// and the configured cell before a warning is given.
const CELL_TOLERANCE: f64 = 1E-3;

/// Everything needed for a run.
#[derive(Clone)]
pub struct Config {
    /// Trajectory before the step.
    pub before: PathBuf,
    /// Trajectory after the step.
    pub after: PathBuf,
    /// Number of bins along each axis.
    pub grid_size: usize,
    /// Edge of the cubic cell written to the output files.
    pub cell_a: f64,
    /// Symbol of the adsorbate.
    pub element: String,
    /// Radius of the smoothing window.
    pub padding_n: usize,
    /// Directory the files are written to.
    pub output: PathBuf,
    /// Worker threads, 0 uses every available cpu.
    pub threads: usize,
    /// Show progress bars.
    pub visible_pbar: bool,
}

impl Config {
    /// Checks the values and fills in the thread count.
    pub fn new(before: PathBuf,
               after: PathBuf,
               grid_size: usize,
               cell_a: f64,
               element: &str,
               padding_n: usize)
               -> Result<Self, Error> {
        if grid_size == 0 {
            return Err(Error::InvalidParameter(String::from("grid size"),
                                               String::from("must be greater than zero")));
        }
        // reuse the lattice checks on the cell edge
        Lattice::cubic(cell_a)?;
        let element = element.trim();
        if element.is_empty() {
            return Err(Error::InvalidParameter(String::from("element"),
                                               String::from("no symbol given")));
        }
        Ok(Self { before,
                  after,
                  grid_size,
                  cell_a,
                  element: String::from(element),
                  padding_n,
                  output: PathBuf::from("."),
                  threads: num_cpus::get(),
                  visible_pbar: false })
    }

    /// Sets the directory for the output.
    pub fn output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    /// Sets the number of threads, 0 uses every available cpu.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = match threads {
            0 => num_cpus::get(),
            x => x,
        };
        self
    }

    /// Sets the visibility of the progress bars.
    pub fn visible_pbar(mut self, visible: bool) -> Self {
        self.visible_pbar = visible;
        self
    }

    /// Where the density of a stage is written.
    pub fn output_path(&self, stage: Stage, file_type: &dyn FileFormat) -> PathBuf {
        self.output.join(format!("prob_density_{}_{}.{}",
                                 self.element,
                                 stage.label(),
                                 file_type.extension()))
    }
}

/// The four densities of a run.
pub struct Densities {
    /// Min-max normalised density before the step.
    pub before: Grid,
    /// Min-max normalised density after the step.
    pub after: Grid,
    /// after - before.
    pub difference: Grid,
    /// The difference after smoothing.
    pub filtered: Grid,
}

impl Densities {
    /// The grid for each stage.
    pub fn get(&self, stage: Stage) -> &Grid {
        match stage {
            Stage::Before => &self.before,
            Stage::After => &self.after,
            Stage::Difference => &self.difference,
            Stage::Filtered => &self.filtered,
        }
    }
}

/// Builds the normalised density for one stage, adding which trajectory was
/// at fault to any error.
fn stage_density(config: &Config, stage: Stage) -> Result<Grid> {
    let path = match stage {
        Stage::Before => &config.before,
        _ => &config.after,
    };
    let context = || format!("Failed to build the {} density from {}", stage, path.display());
    let atoms = Pdb { visible_pbar: config.visible_pbar }.read(path, &config.element)
                                                         .with_context(context)?;
    if !atoms.lattice.is_cubic(config.cell_a, CELL_TOLERANCE) {
        log::warn!("The cell of {} ({} x {} x {}) is binned as read but written as a cube of {}.",
                   path.display(),
                   atoms.lattice.a,
                   atoms.lattice.b,
                   atoms.lattice.c,
                   config.cell_a);
    }
    log::debug!("Binning {} {} positions from {}.",
                atoms.positions.len(),
                atoms.symbol,
                path.display());
    let density = probability_density(&atoms.positions, &atoms.lattice, config.grid_size)
        .with_context(context)?;
    Ok(density.min_max_normalised(stage)?)
}

/// Computes the before and after densities, their difference and the smoothed
/// difference. Nothing is written.
pub fn compute(config: &Config) -> Result<Densities> {
    let (before, after) = if config.threads > 1 {
        let scoped = thread::scope(|s| {
            let before = s.spawn(|_| stage_density(config, Stage::Before));
            let after = s.spawn(|_| stage_density(config, Stage::After));
            (before.join(), after.join())
        });
        match scoped {
            Ok((Ok(before), Ok(after))) => (before?, after?),
            _ => anyhow::bail!("A thread reading the trajectories panicked."),
        }
    } else {
        (stage_density(config, Stage::Before)?,
         stage_density(config, Stage::After)?)
    };
    let difference = after.difference(&before)?;
    let (min, max) = difference.min_max();
    log::debug!("Difference density spans {} to {}.", min, max);
    let filtered = local_average(&difference,
                                 config.padding_n,
                                 config.threads,
                                 config.visible_pbar);
    Ok(Densities { before,
                   after,
                   difference,
                   filtered })
}

/// Computes the densities and writes them all, or none of them, to the
/// output directory. Returns the paths written.
pub fn run(config: &Config, file_type: &dyn FileFormat) -> Result<Vec<PathBuf>> {
    let densities = compute(config)?;
    let lattice = Lattice::cubic(config.cell_a)?;
    let outputs = Stage::ALL.iter()
                            .map(|stage| Output { path: config.output_path(*stage, file_type),
                                                  grid: densities.get(*stage) })
                            .collect::<Vec<Output>>();
    let written = output::write_all(&outputs, &lattice, file_type, config.visible_pbar)
        .context("Writing the density files")?;
    Ok(written)
}
