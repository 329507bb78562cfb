//! Port I/O interface.

/// A device (or set of devices) reachable through the separate I/O port
/// address space used by `IN` and `OUT`.
///
/// Ports the device does not decode are ignored on write and read as 0.
pub trait IoBus {
    /// Read a byte from the given I/O port.
    fn read_io(&mut self, port: u16) -> u8;

    /// Write a byte to the given I/O port.
    fn write_io(&mut self, port: u16, value: u8);
}
