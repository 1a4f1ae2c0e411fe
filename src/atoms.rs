use crate::errors::Error;

/// The selected atoms read from a trajectory.
///
/// > lattice: Lattice - the unit cell of the trajectory
/// > positions: Vec<[f64; 3]> - cartesian positions from every model block
/// > symbol: String - the element that was selected
pub struct Atoms {
    pub lattice: Lattice,
    pub positions: Vec<[f64; 3]>,
    pub symbol: String,
}

impl Atoms {
    /// initialises the structure
    pub fn new(lattice: Lattice, positions: Vec<[f64; 3]>, symbol: String) -> Self {
        Self { lattice,
               positions,
               symbol }
    }
}

/// Lattice - structure for containing information on an orthorhombic cell
///
/// > a: f64 - length of the a-vector
/// > b: f64 - length of the b-vector
/// > c: f64 - length of the c-vector
/// > to_cartesian: [[f64; 3]; 3] - the cell vectors as rows
#[derive(Clone, Copy, PartialEq)]
pub struct Lattice {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub to_cartesian: [[f64; 3]; 3],
}

impl Lattice {
    /// Initialises the structure from the three edge lengths. Each edge has to
    /// be finite and positive.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, Error> {
        for (name, edge) in [("a", a), ("b", b), ("c", c)] {
            if !(edge.is_finite() && edge > 0.) {
                return Err(Error::InvalidParameter(
                    format!("cell {}", name),
                    format!("edge length must be positive, got {}", edge),
                ));
            }
        }
        Ok(Self { a,
                  b,
                  c,
                  to_cartesian: [[a, 0., 0.], [0., b, 0.], [0., 0., c]] })
    }

    /// A cubic cell with edge length a.
    pub fn cubic(a: f64) -> Result<Self, Error> {
        Self::new(a, a, a)
    }

    /// The edge lengths as an array.
    pub fn edges(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Whether the cell is a cube of edge a within the tolerance.
    pub fn is_cubic(&self, a: f64, tolerance: f64) -> bool {
        self.edges().iter().all(|edge| (edge - a).abs() <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_new() {
        let lattice = Lattice::new(2., 3., 4.).unwrap();
        assert_eq!(lattice.edges(), [2., 3., 4.]);
        assert_eq!(lattice.to_cartesian,
                   [[2., 0., 0.], [0., 3., 0.], [0., 0., 4.]])
    }

    #[test]
    fn lattice_new_negative() {
        assert!(Lattice::new(2., -3., 4.).is_err())
    }

    #[test]
    fn lattice_new_nan() {
        assert!(Lattice::new(f64::NAN, 3., 4.).is_err())
    }

    #[test]
    fn lattice_cubic() {
        let lattice = Lattice::cubic(50.256).unwrap();
        assert_eq!(lattice.edges(), [50.256; 3]);
        assert!(lattice.is_cubic(50.256, 1E-8))
    }
}
