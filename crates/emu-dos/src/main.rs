//! `emu-tube`: replay the tube intro and dump every frame as a BMP.
//!
//! Reads the program image named by `TUBE_PROGRAM` (default
//! `tube_orig.com`), renders `TUBE_FRAMES` frames (default 25) and writes
//! `cframe000.bmp`, `cframe001.bmp`, ... into `TUBE_OUTPUT_DIR`. Exits 1 if
//! the image cannot be loaded. A frame that cannot be written is logged and
//! skipped.

use std::process;

use emu_dos::{RunError, Tube, TubeConfig, capture, read_program};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn run() -> Result<u32, RunError> {
    let config = TubeConfig::from_env()?;
    let image = read_program(&config.program)?;
    info!(program = %config.program.display(), bytes = image.len(), "loaded");

    let mut tube = Tube::boot(&image)?;
    let mut saved = 0;
    tube.run(config.frames, |index, machine| {
        let path = config.frame_path(index);
        match capture::save_snapshot(machine, &path) {
            Ok(digest) => {
                saved += 1;
                info!(%digest, "saved {}", path.display());
            }
            Err(e) => warn!("skipping {}: {e}", path.display()),
        }
    });
    Ok(saved)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run() {
        Ok(saved) => info!("done, {saved} frames captured"),
        Err(e) => {
            eprintln!("emu-tube: {e}");
            process::exit(1);
        }
    }
}
