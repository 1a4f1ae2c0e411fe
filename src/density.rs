use crate::atoms::Lattice;
use crate::errors::Error;
use crate::grid::{Grid, Size};

/// The bin boundaries along one axis of the cell.
///
/// There are `bins + 1` linearly spaced edges from 0 to the cell length. Bins
/// are right-exclusive, `edges[i] <= x < edges[i + 1]`, apart from the last
/// bin which also holds `x == length`.
pub struct Bins {
    pub edges: Vec<f64>,
}

impl Bins {
    /// Splits [0, length] into `bins` equal parts.
    pub fn new(length: f64, bins: usize) -> Self {
        let step = length / bins as f64;
        let mut edges = (0..=bins).map(|i| i as f64 * step)
                                  .collect::<Vec<f64>>();
        // the last edge is exactly the cell length, not a rounded multiple
        edges[bins] = length;
        Self { edges }
    }

    /// The number of bins.
    fn len(&self) -> usize {
        self.edges.len() - 1
    }

    /// The bin holding x, None if x is outside of the cell.
    pub fn bin(&self, x: f64) -> Option<usize> {
        let last = self.edges[self.len()];
        if !(x >= 0. && x <= last) {
            return None;
        }
        if x == last {
            return Some(self.len() - 1);
        }
        // first edge greater than x closes the bin
        let upper = self.edges.partition_point(|edge| *edge <= x);
        Some(upper - 1)
    }
}

/// Bins the positions on a `grid_size`^3 grid spanning the cell and divides
/// by the number of binned positions, giving a probability mass function.
///
/// Positions outside of the cell are dropped. If nothing is left to bin an
/// [`Error::EmptySelection`] is returned instead of dividing by zero.
pub fn probability_density(positions: &[[f64; 3]],
                           lattice: &Lattice,
                           grid_size: usize)
                           -> Result<Grid, Error> {
    let size = Size::cubic(grid_size)?;
    let bins = lattice.edges()
                      .iter()
                      .map(|length| Bins::new(*length, grid_size))
                      .collect::<Vec<Bins>>();
    let mut histogram = Grid::zeros(size);
    let mut total = 0usize;
    for position in positions.iter() {
        let index = match (bins[0].bin(position[0]),
                           bins[1].bin(position[1]),
                           bins[2].bin(position[2]))
        {
            (Some(x), Some(y), Some(z)) => histogram.to_1d([x, y, z]),
            _ => continue,
        };
        histogram[index] += 1.;
        total += 1;
    }
    if total == 0 {
        return Err(Error::EmptySelection { parsed: positions.len() });
    }
    let dropped = positions.len() - total;
    if dropped > 0 {
        log::warn!("{} of {} positions lie outside of the cell and were not binned.",
                   dropped,
                   positions.len());
    }
    let total = total as f64;
    histogram.data.iter_mut().for_each(|count| *count /= total);
    Ok(histogram)
}
