//! Intel 8087 floating-point register stack.
//!
//! Eight `f64` slots addressed relative to a 3-bit top-of-stack pointer:
//! `ST(i)` is slot `(top + i) & 7`. Pushing decrements top, popping
//! increments it. There is no tag word and no stack fault, so a ninth push
//! silently overwrites the oldest value, as the physical ring does.
//!
//! Values are kept as `f64` rather than 80-bit extended; the traced program
//! only needs double precision to round its results to the same integers.
//!
//! Memory-operand forms (`fild word [..]` etc.) belong to whoever owns the
//! memory. This crate takes the already-loaded operand.

mod fpu;
mod observable;

pub use fpu::Fpu;
