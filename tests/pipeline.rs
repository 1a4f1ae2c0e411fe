#[cfg(test)]
mod tests {
    use gcmc_density::density::probability_density;
    use gcmc_density::errors::{Error, Stage};
    use gcmc_density::grid::Grid;
    use gcmc_density::io::cube::Cube;
    use gcmc_density::io::pdb::Pdb;
    use gcmc_density::pipeline::{self, Config};
    use std::path::{Path, PathBuf};

    fn config(before: &str, after: &str, grid_size: usize, output: &Path) -> Config {
        Config::new(PathBuf::from(before),
                    PathBuf::from(after),
                    grid_size,
                    10.,
                    "Ar",
                    0).unwrap()
                      .output(output.to_path_buf())
                      .threads(1)
    }

    /// The values of a cube file, skipping the six line header of a file
    /// without atoms.
    fn read_cube(path: &Path) -> Vec<f64> {
        let text = std::fs::read_to_string(path).unwrap();
        text.lines()
            .skip(6)
            .flat_map(|l| l.split_whitespace())
            .map(|v| v.parse::<f64>().unwrap())
            .collect()
    }

    fn trajectory_density(path: &str, grid_size: usize) -> Result<Grid, Error> {
        let atoms = Pdb { visible_pbar: false }.read(Path::new(path), "Ar")?;
        probability_density(&atoms.positions, &atoms.lattice, grid_size)
    }

    #[test]
    fn trajectory_three_atoms() {
        let density = trajectory_density("tests/pdb/before.pdb", 2).unwrap();
        assert_eq!(density.shape(), [2, 2, 2]);
        let counts = density.data.iter().map(|p| p * 3.).collect::<Vec<f64>>();
        let expected = vec![1., 0., 0., 0., 1., 0., 0., 1.];
        for (c, e) in counts.iter().zip(&expected) {
            assert!((c - e).abs() < 1E-12);
        }
        assert!((density.sum() - 1.).abs() < 1E-12)
    }

    #[test]
    fn trajectory_empty_selection() {
        let err = trajectory_density("tests/pdb/no_argon.pdb", 2).err().unwrap();
        match err {
            Error::EmptySelection { parsed } => assert_eq!(parsed, 0),
            e => panic!("Expected an empty selection, got {}", e),
        }
    }

    #[test]
    fn compute_empty_selection_names_trajectory() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            config("tests/pdb/no_argon.pdb", "tests/pdb/after.pdb", 2, dir.path());
        let err = pipeline::compute(&config).err().unwrap();
        assert!(format!("{:#}", err).contains("no_argon.pdb"));
        match err.downcast_ref::<Error>() {
            Some(Error::EmptySelection { parsed }) => assert_eq!(*parsed, 0),
            _ => panic!("Expected an empty selection, got {:?}", err),
        }
    }

    #[test]
    fn compute_densities() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            config("tests/pdb/before.pdb", "tests/pdb/after.pdb", 2, dir.path());
        let densities = pipeline::compute(&config).unwrap();
        assert_eq!(densities.before.data, vec![1., 0., 0., 0., 1., 0., 0., 1.]);
        assert_eq!(densities.after.data, vec![0., 1., 1., 0., 0., 0., 1., 1.]);
        assert_eq!(densities.difference.data,
                   vec![-1., 1., 1., 0., -1., 0., 1., 0.]);
        assert!(densities.filtered == densities.difference)
    }

    #[test]
    fn compute_smoothed_difference() {
        let dir = tempfile::tempdir().unwrap();
        let mut config =
            config("tests/pdb/before.pdb", "tests/pdb/after.pdb", 2, dir.path());
        config.padding_n = 1;
        let densities = pipeline::compute(&config).unwrap();
        // a radius of one covers the whole 2x2x2 grid
        let mean = densities.difference.sum() / 8.;
        assert!(densities.filtered
                         .data
                         .iter()
                         .all(|v| (v - mean).abs() < 1E-12))
    }

    #[test]
    fn compute_threads_agree() {
        let dir = tempfile::tempdir().unwrap();
        let single =
            config("tests/pdb/before.pdb", "tests/pdb/after.pdb", 4, dir.path());
        let mut multi = single.clone().threads(4);
        multi.padding_n = 1;
        let mut single = single;
        single.padding_n = 1;
        let a = pipeline::compute(&single).unwrap();
        let b = pipeline::compute(&multi).unwrap();
        for stage in Stage::ALL.iter() {
            assert!(a.get(*stage) == b.get(*stage));
        }
    }

    #[test]
    fn run_writes_four_cubes() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            config("tests/pdb/before.pdb", "tests/pdb/after.pdb", 2, dir.path());
        let written = pipeline::run(&config, &Cube {}).unwrap();
        let names = written.iter()
                           .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
                           .collect::<Vec<String>>();
        assert_eq!(names,
                   vec!["prob_density_Ar_before_step.cube",
                        "prob_density_Ar_after_step.cube",
                        "prob_density_Ar_difference.cube",
                        "prob_density_Ar_difference_filtered.cube"]);
        let before = read_cube(&written[0]);
        assert_eq!(before, vec![1., 0., 0., 0., 1., 0., 0., 1.]);
        let difference = read_cube(&written[2]);
        assert_eq!(difference, vec![-1., 1., 1., 0., -1., 0., 1., 0.]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4)
    }

    #[test]
    fn run_empty_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            config("tests/pdb/before.pdb", "tests/pdb/no_argon.pdb", 2, dir.path());
        let err = pipeline::run(&config, &Cube {}).err().unwrap();
        match err.downcast_ref::<Error>() {
            Some(Error::EmptySelection { .. }) => (),
            _ => panic!("Expected an empty selection, got {:?}", err),
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0)
    }

    #[test]
    fn run_degenerate_density() {
        let dir = tempfile::tempdir().unwrap();
        // a single voxel holds all of the density so it is flat
        let config =
            config("tests/pdb/before.pdb", "tests/pdb/after.pdb", 1, dir.path());
        let err = pipeline::run(&config, &Cube {}).err().unwrap();
        match err.downcast_ref::<Error>() {
            Some(Error::DegenerateDensity { stage, .. }) => {
                assert!(*stage == Stage::Before)
            }
            _ => panic!("Expected a degenerate density, got {:?}", err),
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0)
    }

    #[test]
    fn run_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let config =
            config("tests/pdb/before.pdb", "tests/pdb/after.pdb", 2, &missing);
        let err = pipeline::run(&config, &Cube {}).err().unwrap();
        match err.downcast_ref::<Error>() {
            Some(Error::Io { .. }) => (),
            _ => panic!("Expected an I/O error, got {:?}", err),
        }
    }
}
