//! Real-mode DOS machine for replaying the tube intro.
//!
//! The [`Machine`] ties together the 8086 integer core, the 8087 register
//! stack, three 64 KiB segments and the VGA DAC. [`Tube`] drives it through
//! the intro's instruction stream in program order, taking the same
//! branches the original binary takes by reading the flags each step
//! leaves behind. Frames are captured as indexed BMP files so they can be
//! diffed against a reference run.

pub mod capture;
mod config;
mod error;
mod machine;
mod tube;

pub use config::TubeConfig;
pub use error::RunError;
pub use machine::{COM_ORIGIN, MAX_COM_SIZE, Machine, SCREEN_HEIGHT, SCREEN_WIDTH, read_program};
pub use tube::Tube;
