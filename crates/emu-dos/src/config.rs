//! Run configuration.
//!
//! The binary takes no flags. Everything has a default matching the
//! reference run and can be overridden from the environment:
//!
//! | Variable          | Default          |
//! |-------------------|------------------|
//! | `TUBE_PROGRAM`    | `tube_orig.com`  |
//! | `TUBE_FRAMES`     | `25`             |
//! | `TUBE_OUTPUT_DIR` | `.`              |

use std::path::PathBuf;

use crate::error::RunError;

/// Configuration for one replay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TubeConfig {
    /// Program image to load at DS:0100h.
    pub program: PathBuf,
    /// Number of frames to render and capture.
    pub frames: u32,
    /// Directory the `cframeNNN.bmp` files are written to.
    pub output_dir: PathBuf,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tube_orig.com"),
            frames: 25,
            output_dir: PathBuf::from("."),
        }
    }
}

impl TubeConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, RunError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or empty variables
    /// keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(program) = get("TUBE_PROGRAM") {
            config.program = PathBuf::from(program);
        }
        if let Some(frames) = get("TUBE_FRAMES") {
            config.frames = frames.trim().parse().map_err(|_| RunError::Config {
                var: "TUBE_FRAMES",
                value: frames.clone(),
            })?;
        }
        if let Some(dir) = get("TUBE_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Output path for frame `index`: `cframe000.bmp`, `cframe001.bmp`, ...
    #[must_use]
    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.output_dir.join(format!("cframe{index:03}.bmp"))
    }
}
