//! Bit-exact Intel 8086 real-mode integer core.
//!
//! This is not a fetch/decode/execute CPU. A driver replays a traced
//! program by calling one method per instruction, reading the flags this
//! crate leaves behind to take its own branches. What matters is that every
//! method reproduces the real-mode result and flag update exactly, including
//! the awkward corners (zero-count shifts, `inc`/`dec` leaving carry alone,
//! word accesses that wrap inside a 64 KiB segment).
//!
//! Memory is reached through the [`Bus`] trait, port I/O through
//! [`emu_core::IoBus`]. Neither is owned by the CPU.

mod alu;
mod bus;
mod cpu;
mod flags;
mod io;
mod observable;
mod registers;
mod stack;
mod string;

pub use alu::AluResult;
pub use bus::{Bus, SEGMENT_SIZE, Segment, SegmentedMemory};
pub use cpu::Cpu8086;
pub use flags::{CF, Flags, OF, SF, ZF};
pub use registers::{Reg, Registers, Width};
