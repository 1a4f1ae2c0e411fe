use anyhow::{Context, Result};
use gcmc_density::arguments::{Args, ClapApp};
use gcmc_density::io::cube::Cube;
use gcmc_density::pipeline;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // argument parsing
    let app = ClapApp::get();
    let args = Args::new(app.get_matches());
    // print splash
    println!("Probability Density Cubes ({})", env!("CARGO_PKG_VERSION"));
    let config = args.config().context("Invalid arguments")?;
    println!("Running on {} threads.", config.threads);
    log::info!("{} on a {}^3 grid, smoothing radius {}.",
               config.element,
               config.grid_size,
               config.padding_n);
    let written = pipeline::run(&config, &Cube {})?;
    for path in written.iter() {
        log::info!("Wrote {}", path.display());
    }
    println!("Done!");
    Ok(())
}
