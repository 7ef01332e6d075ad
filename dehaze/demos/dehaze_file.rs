//! Dehazes one image file and writes `dehazed_<name>` next to it.
//!
//! Usage: cargo run -p dehaze --release --example dehaze_file -- <input> [config.yaml|config.json]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use common::log_setup::{LogSettings, setup_logging};
use dehaze::{Config, Dehazer, io};

fn main() -> Result<()> {
    setup_logging(&LogSettings::new("info", "logs", "dehaze"))?;

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: dehaze_file <input> [config.yaml|config.json]");
    };
    let config = match args.next() {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => Config::default(),
    };

    let image = io::load_image(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    println!(
        "{}: {}x{}",
        input.display(),
        image.width(),
        image.height()
    );

    let output = Dehazer::from_config(config)
        .dehaze(&image)
        .context("Dehazing failed")?;
    let a = output.airlight.rgb();
    println!("Airlight: [{:.4}, {:.4}, {:.4}]", a[0], a[1], a[2]);
    println!("{}", output.timings);

    let output_path = io::dehazed_output_path(&input);
    io::save_image(&output.image, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    println!("Saved {}", output_path.display());

    Ok(())
}
