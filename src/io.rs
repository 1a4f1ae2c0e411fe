use crate::atoms::Lattice;
use crate::grid::Grid;
use std::path::Path;

pub mod cube;
pub mod output;
pub mod pdb;
pub mod reader;

/// A file format that a volumetric grid can be written in.
pub trait FileFormat: Sync {
    /// Writes the grid, held in the lattice, to path.
    fn write(&self,
             path: &Path,
             lattice: &Lattice,
             grid: &Grid,
             visible_pbar: bool)
             -> std::io::Result<()>;

    /// The file extension, without the dot.
    fn extension(&self) -> &'static str;
}

/// Displays a float in the Fortran style of scientific notation used by
/// volumetric files, ie. 1.23456E-01.
///
/// The precision of the mantissa is taken from the format string and defaults
/// to 5, the width is respected.
pub struct FortranFormat {
    pub float: f64,
}

impl std::fmt::Display for FortranFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precision = f.precision().unwrap_or(5);
        let text = if self.float.is_finite() {
            let s = format!("{:.*E}", precision, self.float);
            // rust writes 1.23456E-1, pad the exponent out to two digits
            match s.split_once('E') {
                Some((mantissa, exponent)) => {
                    let (sign, digits) = match exponent.strip_prefix('-') {
                        Some(digits) => ('-', digits),
                        None => ('+', exponent),
                    };
                    format!("{}E{}{:0>2}", mantissa, sign, digits)
                }
                None => s,
            }
        } else {
            format!("{}", self.float)
        };
        match f.width() {
            Some(width) => write!(f, "{:>width$}", text, width = width),
            None => write!(f, "{}", text),
        }
    }
}
