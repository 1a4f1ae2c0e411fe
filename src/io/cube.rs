use crate::atoms::Lattice;
use crate::grid::Grid;
use crate::io::{FileFormat, FortranFormat};
use crate::progress::new_bar;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Bohr radius in Angstrom, cube files are in atomic units.
pub const LENGTH_UNITS: f64 = 0.52917721067;
/// Values written on each line of the volumetric data.
const PER_LINE: usize = 6;

/// The Gaussian cube format. The grid is written without atoms, with its
/// origin at zero and with the voxel basis taken from the lattice.
pub struct Cube {}

impl Cube {
    /// The header of the file: two comment lines, the atom count and origin,
    /// then the number of voxels and voxel vector along each axis.
    pub fn header(&self, lattice: &Lattice, grid: &Grid) -> String {
        let mut header = format!("{} {}\nOUTER LOOP: X, MIDDLE LOOP: Y, INNER LOOP: Z\n",
                                 env!("CARGO_PKG_NAME"),
                                 env!("CARGO_PKG_VERSION"));
        header.push_str(&format!("{:5}{:12.6}{:12.6}{:12.6}\n", 0, 0., 0., 0.));
        for (n, vector) in grid.shape().iter().zip(&lattice.to_cartesian) {
            let [x, y, z] = vector.map(|v| v / *n as f64 / LENGTH_UNITS);
            header.push_str(&format!("{:5}{:12.6}{:12.6}{:12.6}\n", n, x, y, z));
        }
        header
    }
}

impl FileFormat for Cube {
    /// Write the grid, six values per line with a new line at the end of each
    /// z row.
    fn write(&self,
             path: &Path,
             lattice: &Lattice,
             grid: &Grid,
             visible_pbar: bool)
             -> std::io::Result<()> {
        let mut buffer = BufWriter::new(File::create(path)?);
        let row = grid.size.z;
        let pbar = new_bar(visible_pbar,
                           grid.size.total / row,
                           format!("Writing file {}: ", path.display()));
        buffer.write_all(self.header(lattice, grid).as_bytes())?;
        for z_row in grid.data.chunks(row) {
            for line in z_row.chunks(PER_LINE) {
                for value in line {
                    write!(buffer, " {:12.5}", FortranFormat { float: *value })?;
                }
                writeln!(buffer)?;
            }
            pbar.tick();
        }
        buffer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &'static str {
        "cube"
    }
}
