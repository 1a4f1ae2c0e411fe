use std::fmt::{Debug, Display};
use std::path::PathBuf;

/// The stage of the pipeline a density belongs to. Also used to build the
/// name of the output file.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Density from the trajectory before the step.
    Before,
    /// Density from the trajectory after the step.
    After,
    /// after - before.
    Difference,
    /// The smoothed difference.
    Filtered,
}

impl Stage {
    /// All stages in the order they are written.
    pub const ALL: [Stage; 4] =
        [Stage::Before, Stage::After, Stage::Difference, Stage::Filtered];

    /// The stage as it appears in an output filename.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Before => "before_step",
            Self::After => "after_step",
            Self::Difference => "difference",
            Self::Filtered => "difference_filtered",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// Errors raised while building the probability densities.
pub enum Error {
    /// A record in the trajectory could not be read.
    /// MalformedInput(path, line, details)
    MalformedInput {
        path: PathBuf,
        line: usize,
        details: String,
    },
    /// Nothing was left to bin, `parsed` is how many coordinates were read.
    EmptySelection { parsed: usize },
    /// The density is flat so cannot be min-max normalised.
    DegenerateDensity { stage: Stage, value: f64 },
    /// Reading or writing a file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A configuration value is outside of its allowed range.
    /// InvalidParameter(name, reason)
    InvalidParameter(String, String),
    /// Two grids that should share a shape do not.
    ShapeMismatch([usize; 3], [usize; 3]),
}

impl Error {
    /// Builds an [`Error::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(),
                   source }
    }

    /// Builds an [`Error::MalformedInput`] for the given path and line.
    pub fn malformed(path: impl Into<PathBuf>,
                     line: usize,
                     details: impl Into<String>)
                     -> Self {
        Self::MalformedInput { path: path.into(),
                               line,
                               details: details.into() }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput { path, line, details } => write!(
                f,
                "Malformed input in \"{}\" at line {}: {}",
                path.display(),
                line,
                details
            ),
            Self::EmptySelection { parsed } => write!(
                f,
                "No coordinates to bin ({} selected atoms read, none inside the cell), the density cannot be normalised.",
                parsed
            ),
            Self::DegenerateDensity { stage, value } => write!(
                f,
                "The {} density is flat (every voxel is {}) and cannot be min-max normalised.",
                stage, value
            ),
            Self::Io { path, source } => {
                write!(f, "I/O error on \"{}\": {}", path.display(), source)
            }
            Self::InvalidParameter(name, reason) => {
                write!(f, "Invalid value for \"{}\": {}", name, reason)
            }
            Self::ShapeMismatch(a, b) => write!(
                f,
                "Grid shapes do not match: {}x{}x{} and {}x{}x{}.",
                a[0], a[1], a[2], b[0], b[1], b[2]
            ),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels() {
        let labels = Stage::ALL.iter().map(|s| s.label()).collect::<Vec<_>>();
        assert_eq!(labels,
                   vec!["before_step",
                        "after_step",
                        "difference",
                        "difference_filtered"])
    }

    #[test]
    fn error_malformed_display() {
        let e = Error::malformed("movie.pdb", 12, "field \"x\" is truncated");
        assert_eq!(format!("{}", e),
                   "Malformed input in \"movie.pdb\" at line 12: field \"x\" is truncated")
    }

    #[test]
    fn error_io_source() {
        let e = Error::io("missing.pdb",
                          std::io::Error::new(std::io::ErrorKind::NotFound,
                                              "gone"));
        assert!(std::error::Error::source(&e).is_some())
    }
}
