use crate::atoms::{Atoms, Lattice};
use crate::errors::Error;
use crate::io::reader::BufReader;
use crate::progress::{new_bar, ProgressBar};
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

/// A fixed width column of a record. Columns are 1-indexed and inclusive, as
/// they are written in the PDB documentation.
pub struct Field {
    /// Name used in error messages.
    pub name: &'static str,
    /// First column of the field.
    pub start: usize,
    /// Last column of the field.
    pub end: usize,
    /// Whether the record may stop part way through the field. Only true for
    /// trailing fields that editors like to strip whitespace from.
    pub partial: bool,
}

impl Field {
    /// A field that must be present at full width.
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name,
               start,
               end,
               partial: false }
    }

    /// A field that only needs its first column to be present.
    pub const fn trailing(name: &'static str, start: usize, end: usize) -> Self {
        Self { name,
               start,
               end,
               partial: true }
    }

    /// Cuts the field out of a record, erroring with the details if the record
    /// is too short.
    pub fn slice<'a>(&self, record: &'a str) -> Result<&'a str, String> {
        let record = record.trim_end_matches(&['\n', '\r'][..]);
        let required = if self.partial { self.start } else { self.end };
        if record.len() < required {
            return Err(format!(
                "field \"{}\" (columns {}-{}) is truncated, record is {} columns long",
                self.name,
                self.start,
                self.end,
                record.len()
            ));
        }
        let end = self.end.min(record.len());
        record.get((self.start - 1)..end).ok_or_else(|| {
                                              format!("field \"{}\" (columns {}-{}) is not ASCII",
                                                      self.name, self.start, self.end)
                                          })
    }

    /// Cuts the field out of a record and parses it.
    pub fn parse<T: FromStr>(&self, record: &str) -> Result<T, String> {
        let text = self.slice(record)?;
        text.trim().parse::<T>().map_err(|_| {
                                    format!("field \"{}\" (columns {}-{}) cannot be parsed from \"{}\"",
                                            self.name, self.start, self.end, text)
                                })
    }
}

/// Record that holds the cell parameters.
pub const CRYST1: &str = "CRYST1";
/// Record that opens a snapshot.
pub const MODEL: &str = "MODEL";
/// Record that closes a snapshot.
pub const ENDMDL: &str = "ENDMDL";
/// Record that holds an atom.
pub const ATOM: &str = "ATOM";

/// Cell edge a in the CRYST1 record.
pub const CELL_A: Field = Field::new("a", 7, 15);
/// Cell edge b in the CRYST1 record.
pub const CELL_B: Field = Field::new("b", 16, 24);
/// Cell edge c in the CRYST1 record.
pub const CELL_C: Field = Field::new("c", 25, 33);
/// Cartesian x in the ATOM record.
pub const POS_X: Field = Field::new("x", 31, 38);
/// Cartesian y in the ATOM record.
pub const POS_Y: Field = Field::new("y", 39, 46);
/// Cartesian z in the ATOM record.
pub const POS_Z: Field = Field::new("z", 47, 54);
/// Element symbol in the ATOM record.
pub const ELEMENT: Field = Field::trailing("element", 77, 78);

/// Reader for the PDB movies written by GCMC codes. Each snapshot is a
/// MODEL/ENDMDL block and the cell is given once in a CRYST1 record.
pub struct Pdb {
    /// Show a progress bar whilst reading.
    pub visible_pbar: bool,
}

impl Pdb {
    /// Reads the cell and the positions of every `symbol` atom from the file.
    pub fn read(&self, path: &Path, symbol: &str) -> Result<Atoms, Error> {
        let reader = BufReader::open(path).map_err(|e| Error::io(path, e))?;
        let length = std::fs::metadata(path).map_err(|e| Error::io(path, e))?
                                            .len() as usize;
        let pbar = new_bar(self.visible_pbar,
                           length,
                           format!("Reading {}: ", path.display()));
        parse(reader, path, symbol, pbar.as_ref())
    }
}

/// Scans the records of a trajectory. `path` is only used for error messages.
pub fn parse<R: BufRead>(mut reader: BufReader<R>,
                         path: &Path,
                         symbol: &str,
                         pbar: &dyn ProgressBar)
                         -> Result<Atoms, Error> {
    let symbol = symbol.trim();
    let mut buffer = String::new();
    let mut cell: Option<([f64; 3], usize)> = None;
    let mut positions: Vec<[f64; 3]> = vec![];
    let mut in_model = false;
    let mut models = 0usize;
    while let Some(line) = reader.read_line(&mut buffer) {
        let (record, size) = line.map_err(|e| Error::io(path, e))?;
        let record: &str = record;
        pbar.tick_by(size);
        let line_number = reader.line_number();
        let malformed = |details: String| Error::malformed(path, line_number, details);
        if record.starts_with(CRYST1) {
            if cell.is_none() {
                let mut edges = [0f64; 3];
                for (edge, field) in edges.iter_mut().zip(&[CELL_A, CELL_B, CELL_C]) {
                    *edge = field.parse::<f64>(record).map_err(malformed)?;
                }
                cell = Some((edges, line_number));
            }
        } else if record.starts_with(MODEL) {
            in_model = true;
            models += 1;
        } else if record.starts_with(ENDMDL) {
            in_model = false;
        } else if in_model && record.starts_with(ATOM) {
            let element = ELEMENT.slice(record).map_err(malformed)?;
            if element.trim() == symbol {
                let mut position = [0f64; 3];
                for (x, field) in position.iter_mut().zip(&[POS_X, POS_Y, POS_Z]) {
                    *x = field.parse::<f64>(record).map_err(malformed)?;
                }
                positions.push(position);
            }
        }
    }
    let ([a, b, c], cell_line) = match cell {
        Some(cell) => cell,
        None => {
            return Err(Error::malformed(path,
                                        reader.line_number(),
                                        "no CRYST1 record found"))
        }
    };
    let lattice = Lattice::new(a, b, c).map_err(|e| {
                                           Error::malformed(path, cell_line, format!("{}", e))
                                       })?;
    log::info!("{}: cell {:.4} x {:.4} x {:.4}, {} {} atoms in {} models",
               path.display(),
               a,
               b,
               c,
               positions.len(),
               symbol,
               models);
    Ok(Atoms::new(lattice, positions, String::from(symbol)))
}
