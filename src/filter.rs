use crate::grid::Grid;
use crate::progress::{new_bar, ProgressBar};
use crossbeam_utils::thread;

/// Replaces every voxel with the mean of the voxels within `radius` steps
/// along every axis (a cube of side 2 * radius + 1), truncated at the edge
/// of the grid.
///
/// Near the edges the window holds fewer voxels and the mean is taken over
/// only those that exist, the missing ones are not treated as zeros. A radius
/// of zero returns an exact copy.
///
/// The box sum is separable so it is built from three one dimensional prefix
/// sum passes, one per axis, working between two buffers the size of the grid.
/// Lines of each pass are shared between `threads` threads and the result does
/// not depend on how many are used.
pub fn local_average(grid: &Grid,
                     radius: usize,
                     threads: usize,
                     visible_pbar: bool)
                     -> Grid {
    if radius == 0 {
        return grid.clone();
    }
    let [nx, ny, nz] = grid.shape();
    // a window wider than the grid already covers every line
    let radius = radius.min(nx.max(ny).max(nz));
    let pbar = new_bar(visible_pbar,
                       nx * ny + ny * nz + nz * nx,
                       String::from("Smoothing: "));
    let mut shape = grid.shape();
    let mut data = grid.data.clone();
    let mut summed = vec![0f64; data.len()];
    // sum along the fastest axis then rotate it to the slowest, three times
    // brings the layout back to [x, y, z]
    for _ in 0..3 {
        window_sum(&data, &mut summed, shape[2], radius, threads, pbar.as_ref());
        rotate(&summed, &mut data, shape);
        shape = [shape[1], shape[2], shape[0]];
    }
    let counts = [window_counts(nx, radius),
                  window_counts(ny, radius),
                  window_counts(nz, radius)];
    let mut average = Grid { size: grid.size,
                             data };
    for p in 0..average.size.total {
        let [x, y, z] = average.to_3d(p);
        average[p] /= counts[0][x] * counts[1][y] * counts[2][z];
    }
    average
}

/// How many voxels of a line of `length` fall inside the window around each
/// voxel.
pub fn window_counts(length: usize, radius: usize) -> Vec<f64> {
    (0..length).map(|i| {
                   let lo = i.saturating_sub(radius);
                   let hi = i.saturating_add(radius).saturating_add(1).min(length);
                   (hi - lo) as f64
               })
               .collect()
}

/// Windowed sums along contiguous lines of `line_length`, written to `summed`.
fn window_sum(data: &[f64],
              summed: &mut [f64],
              line_length: usize,
              radius: usize,
              threads: usize,
              pbar: &dyn ProgressBar) {
    let lines = data.len() / line_length;
    match threads.cmp(&1) {
        std::cmp::Ordering::Greater => {
            let chunk_size =
                ((lines / threads) + (lines % threads).min(1)) * line_length;
            let scoped = thread::scope(|s| {
                for (input, output) in
                    data.chunks(chunk_size).zip(summed.chunks_mut(chunk_size))
                {
                    s.spawn(move |_| {
                         sum_lines(input, output, line_length, radius, pbar)
                     });
                }
            });
            // a worker only panics on a bug, pass it on
            if let Err(e) = scoped {
                std::panic::resume_unwind(e)
            }
        }
        _ => sum_lines(data, summed, line_length, radius, pbar),
    }
}

/// Sums the window around each point of each line using a prefix sum of the
/// line.
fn sum_lines(input: &[f64],
             output: &mut [f64],
             line_length: usize,
             radius: usize,
             pbar: &dyn ProgressBar) {
    let mut prefix = vec![0f64; line_length + 1];
    for (line, out) in input.chunks(line_length)
                            .zip(output.chunks_mut(line_length))
    {
        for (i, value) in line.iter().enumerate() {
            prefix[i + 1] = prefix[i] + value;
        }
        for (i, o) in out.iter_mut().enumerate() {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(line_length);
            *o = prefix[hi] - prefix[lo];
        }
        pbar.tick();
    }
}

/// Moves the fastest axis to the slowest: data laid out as [a, b, c] is
/// written to `rotated` laid out as [b, c, a].
fn rotate(data: &[f64], rotated: &mut [f64], shape: [usize; 3]) {
    let [na, nb, nc] = shape;
    for a in 0..na {
        for b in 0..nb {
            for c in 0..nc {
                rotated[(b * nc + c) * na + a] = data[(a * nb + b) * nc + c];
            }
        }
    }
}
