//! Core traits shared by every chip crate in the workspace.
//!
//! Chips never own each other. A CPU reaches peripherals through [`IoBus`],
//! and every stateful component exposes itself through [`Observable`] so a
//! driver or test can inspect it without touching emulation state.

mod io_bus;
mod observable;

pub use io_bus::IoBus;
pub use observable::{Observable, Value};
