//! VGA DAC palette registers.
//!
//! 256 entries of 6-bit red, green and blue, programmed through three ports:
//!
//! | Port  | Direction | Effect                                           |
//! |-------|-----------|--------------------------------------------------|
//! | 0x3C7 | write     | read cursor = 3 * index                          |
//! | 0x3C8 | write     | write cursor = 3 * index                         |
//! | 0x3C9 | write     | store `value & 0x3F` at write cursor, advance it |
//! | 0x3C9 | read      | load from read cursor, advance it                |
//!
//! Both cursors count components, not entries, and wrap at 768. Every other
//! port is ignored on write and reads as zero.

use emu_core::{IoBus, Observable, Value};

/// Number of palette entries.
pub const PALETTE_ENTRIES: usize = 256;

/// Palette size in bytes (three components per entry).
pub const PALETTE_SIZE: usize = PALETTE_ENTRIES * 3;

/// Read-index port.
pub const PORT_READ_INDEX: u16 = 0x3C7;
/// Write-index port.
pub const PORT_WRITE_INDEX: u16 = 0x3C8;
/// Data port.
pub const PORT_DATA: u16 = 0x3C9;

/// VGA DAC.
#[derive(Debug, Clone)]
pub struct VgaDac {
    palette: [u8; PALETTE_SIZE],
    write_cursor: usize,
    read_cursor: usize,
}

impl VgaDac {
    /// All-black palette, both cursors at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            palette: [0; PALETTE_SIZE],
            write_cursor: 0,
            read_cursor: 0,
        }
    }

    pub fn set_write_index(&mut self, index: u8) {
        self.write_cursor = usize::from(index) * 3;
    }

    pub fn set_read_index(&mut self, index: u8) {
        self.read_cursor = usize::from(index) * 3;
    }

    /// Store one 6-bit component and advance the write cursor.
    pub fn write_data(&mut self, value: u8) {
        self.palette[self.write_cursor] = value & 0x3F;
        self.write_cursor = (self.write_cursor + 1) % PALETTE_SIZE;
    }

    /// Load one component and advance the read cursor.
    pub fn read_data(&mut self) -> u8 {
        let value = self.palette[self.read_cursor];
        self.read_cursor = (self.read_cursor + 1) % PALETTE_SIZE;
        value
    }

    #[must_use]
    pub const fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    #[must_use]
    pub const fn read_cursor(&self) -> usize {
        self.read_cursor
    }

    /// The raw table, RGB triples in index order.
    #[must_use]
    pub const fn palette(&self) -> &[u8; PALETTE_SIZE] {
        &self.palette
    }

    /// One entry as `[r, g, b]`.
    #[must_use]
    pub fn entry(&self, index: u8) -> [u8; 3] {
        let base = usize::from(index) * 3;
        [
            self.palette[base],
            self.palette[base + 1],
            self.palette[base + 2],
        ]
    }
}

impl Default for VgaDac {
    fn default() -> Self {
        Self::new()
    }
}

impl IoBus for VgaDac {
    fn read_io(&mut self, port: u16) -> u8 {
        match port {
            PORT_DATA => self.read_data(),
            _ => 0,
        }
    }

    fn write_io(&mut self, port: u16, value: u8) {
        match port {
            PORT_READ_INDEX => self.set_read_index(value),
            PORT_WRITE_INDEX => self.set_write_index(value),
            PORT_DATA => self.write_data(value),
            _ => {}
        }
    }
}

const DAC_QUERY_PATHS: &[&str] = &["write_cursor", "read_cursor", "palette", "entry.<n>"];

impl Observable for VgaDac {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "write_cursor" => Some(Value::U16(self.write_cursor as u16)),
            "read_cursor" => Some(Value::U16(self.read_cursor as u16)),
            "palette" => Some(Value::Array(
                self.palette.iter().map(|&c| Value::U8(c)).collect(),
            )),
            _ => {
                let index = path.strip_prefix("entry.")?.parse::<u8>().ok()?;
                Some(Value::Array(
                    self.entry(index).into_iter().map(Value::U8).collect(),
                ))
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        DAC_QUERY_PATHS
    }
}
