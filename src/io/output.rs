use crate::atoms::Lattice;
use crate::errors::Error;
use crate::grid::Grid;
use crate::io::FileFormat;
use std::path::{Path, PathBuf};

/// A grid waiting to be written and where it is going.
pub struct Output<'a> {
    pub path: PathBuf,
    pub grid: &'a Grid,
}

/// The path a file is written to before it is moved into place.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

/// Write every output or none of them.
///
/// Each grid is first written next to its destination with a `.part` suffix.
/// Only once all of them have been written are they renamed. On any error the
/// partial files, and any already renamed, are removed before returning. If a
/// rename fails the files from an earlier run still waiting to be replaced are
/// removed as well, so the directory never holds a mix of old and new output.
pub fn write_all(outputs: &[Output],
                 lattice: &Lattice,
                 file_type: &dyn FileFormat,
                 visible_pbar: bool)
                 -> Result<Vec<PathBuf>, Error> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(outputs.len());
    for output in outputs.iter() {
        let partial = partial_path(&output.path);
        // track the file before writing so a half written file is removed
        written.push(partial.clone());
        if let Err(e) =
            file_type.write(&partial, lattice, output.grid, visible_pbar)
        {
            remove_files(&written);
            return Err(Error::io(&output.path, e));
        }
    }
    let mut renamed: Vec<PathBuf> = Vec::with_capacity(outputs.len());
    for (i, (output, partial)) in outputs.iter().zip(&written).enumerate() {
        if let Err(e) = std::fs::rename(partial, &output.path) {
            let stale = outputs[i..].iter()
                                    .map(|o| o.path.clone())
                                    .collect::<Vec<PathBuf>>();
            remove_files(&renamed);
            remove_files(&written);
            remove_files(&stale);
            return Err(Error::io(&output.path, e));
        }
        renamed.push(output.path.clone());
    }
    Ok(renamed)
}

/// Removes files, ignoring those that do not exist or are not files.
fn remove_files(paths: &[PathBuf]) {
    for path in paths.iter() {
        if path.is_file() {
            if let Err(e) = std::fs::remove_file(path) {
                log::warn!("Unable to remove {}: {}", path.display(), e);
            }
        }
    }
}
