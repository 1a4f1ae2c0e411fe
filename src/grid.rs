use crate::errors::{Error, Stage};
use std::ops::{Index, IndexMut};

/// A scalar field stored on a 3d grid.
///
/// The data is flattened with x as the slowest and z as the fastest moving
/// index, the same order a cube file lists its values in.
#[derive(Clone, PartialEq)]
pub struct Grid {
    /// The 3d size of the data.
    pub size: Size,
    /// The flattened values.
    pub data: Vec<f64>,
}

impl Index<usize> for Grid {
    type Output = f64;
    fn index(&self, p: usize) -> &f64 {
        &self.data[p]
    }
}

impl IndexMut<usize> for Grid {
    fn index_mut(&mut self, p: usize) -> &mut f64 {
        &mut self.data[p]
    }
}

impl Grid {
    /// A grid of zeros.
    pub fn zeros(size: Size) -> Self {
        let data = vec![0f64; size.total];
        Self { size, data }
    }

    /// Wraps already flattened data, checking it fits the size.
    pub fn from_vec(size: Size, data: Vec<f64>) -> Result<Self, Error> {
        if data.len() != size.total {
            return Err(Error::InvalidParameter(
                String::from("grid data"),
                format!("expected {} values, got {}", size.total, data.len()),
            ));
        }
        Ok(Self { size, data })
    }

    /// The shape of the grid as [x, y, z].
    pub fn shape(&self) -> [usize; 3] {
        self.size.shape()
    }

    /// Converts a 1D index of the array into a 3D index
    pub fn to_3d(&self, p: usize) -> [usize; 3] {
        let x = p / (self.size.y * self.size.z);
        let y = (p / self.size.z) % self.size.y;
        let z = p % self.size.z;
        [x, y, z]
    }

    /// Converts a 3D index into the 1D index of the array
    pub fn to_1d(&self, p: [usize; 3]) -> usize {
        (p[0] * self.size.y + p[1]) * self.size.z + p[2]
    }

    /// Sum of every value in the grid.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// The smallest and largest value in the grid.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
                (min.min(*v), max.max(*v))
            })
    }

    /// Rescales the grid to [0, 1] with (v - min) / (max - min). A flat grid
    /// cannot be rescaled and the stage is reported in the error.
    pub fn min_max_normalised(&self, stage: Stage) -> Result<Self, Error> {
        let (min, max) = self.min_max();
        if max == min {
            return Err(Error::DegenerateDensity { stage, value: max });
        }
        let range = max - min;
        let data = self.data.iter().map(|v| (v - min) / range).collect();
        Ok(Self { size: self.size,
                  data })
    }

    /// Elementwise self - other.
    pub fn difference(&self, other: &Self) -> Result<Self, Error> {
        if self.size != other.size {
            return Err(Error::ShapeMismatch(self.shape(), other.shape()));
        }
        let data = self.data
                       .iter()
                       .zip(&other.data)
                       .map(|(a, b)| a - b)
                       .collect();
        Ok(Self { size: self.size,
                  data })
    }
}

/// Size of the density data in 3d
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Size {
    /// Number of voxels in the x-direction.
    pub x: usize,
    /// Number of voxels in the y-direction.
    pub y: usize,
    /// Number of voxels in the z-direction.
    pub z: usize,
    /// Total number of voxels.
    pub total: usize,
}

impl Size {
    /// The length of the flattened array for the density data in 3d
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self, Error> {
        if x == 0 || y == 0 || z == 0 {
            return Err(Error::InvalidParameter(
                String::from("grid size"),
                format!("every axis needs at least one voxel, got {}x{}x{}",
                        x, y, z),
            ));
        }
        let total = match x.checked_mul(y).and_then(|xy| xy.checked_mul(z)) {
            Some(xyz) => xyz,
            None => {
                return Err(Error::InvalidParameter(
                    String::from("grid size"),
                    String::from("grid size is too large"),
                ))
            }
        };
        Ok(Self { x, y, z, total })
    }

    /// A grid with the same number of voxels along each axis.
    pub fn cubic(n: usize) -> Result<Self, Error> {
        Self::new(n, n, n)
    }

    /// The size as [x, y, z].
    pub fn shape(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(x: usize, y: usize, z: usize) -> Grid {
        let size = Size::new(x, y, z).unwrap();
        Grid::from_vec(size, (0..size.total).map(|v| v as f64).collect())
            .unwrap()
    }

    #[test]
    fn size_new() {
        let size = Size::new(3, 4, 5).unwrap();
        assert_eq!(size.total, 60)
    }

    #[test]
    fn size_new_zero() {
        assert!(Size::new(3, 0, 5).is_err())
    }

    #[test]
    fn size_new_too_large() {
        assert!(Size::new(usize::MAX, 2, 1).is_err())
    }

    #[test]
    fn grid_from_vec_wrong_length() {
        let size = Size::cubic(2).unwrap();
        assert!(Grid::from_vec(size, vec![0.; 7]).is_err())
    }

    #[test]
    fn grid_to_3d() {
        let grid = ramp(3, 4, 5);
        assert_eq!(grid.to_3d(26), [1, 1, 1]);
        assert_eq!(grid.to_3d(59), [2, 3, 4])
    }

    #[test]
    fn grid_to_1d() {
        let grid = ramp(3, 4, 5);
        for p in 0..grid.size.total {
            assert_eq!(grid.to_1d(grid.to_3d(p)), p)
        }
    }

    #[test]
    fn grid_min_max_normalised() {
        let size = Size::new(2, 2, 1).unwrap();
        let grid = Grid::from_vec(size, vec![0.1, 0.2, 0.4, 0.3]).unwrap();
        let norm = grid.min_max_normalised(Stage::Before).unwrap();
        assert_eq!(norm.min_max(), (0., 1.));
        assert_eq!(norm[0], 0.);
        assert_eq!(norm[2], 1.)
    }

    #[test]
    fn grid_min_max_normalised_flat() {
        let size = Size::cubic(2).unwrap();
        let grid = Grid::from_vec(size, vec![0.125; 8]).unwrap();
        match grid.min_max_normalised(Stage::After) {
            Err(Error::DegenerateDensity { stage, .. }) => {
                assert!(stage == Stage::After)
            }
            _ => panic!("Flat grid was normalised"),
        }
    }

    #[test]
    fn grid_difference() {
        let a = ramp(2, 2, 2);
        let b = Grid::from_vec(a.size, vec![1.; 8]).unwrap();
        let diff = a.difference(&b).unwrap();
        assert_eq!(diff.data, vec![-1., 0., 1., 2., 3., 4., 5., 6.])
    }

    #[test]
    fn grid_difference_mismatch() {
        let a = ramp(2, 2, 2);
        let b = ramp(2, 2, 3);
        assert!(a.difference(&b).is_err())
    }
}
