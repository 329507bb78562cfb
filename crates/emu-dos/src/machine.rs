//! The composed machine: CPU, FPU, memory and palette.

use std::fs;
use std::path::Path;

use emu_core::{Observable, Value};
use intel_8086::{Bus, Cpu8086, SEGMENT_SIZE, Segment, SegmentedMemory};
use intel_8087::Fpu;
use vga_dac::VgaDac;

use crate::error::RunError;

/// Load address of a `.COM` image inside its segment.
pub const COM_ORIGIN: u16 = 0x0100;

/// Largest image that fits between [`COM_ORIGIN`] and the end of DS.
pub const MAX_COM_SIZE: usize = SEGMENT_SIZE - COM_ORIGIN as usize;

/// Mode 13h resolution.
pub const SCREEN_WIDTH: u32 = 320;
pub const SCREEN_HEIGHT: u32 = 200;

/// Machine state for one replay.
///
/// Fields are public so a driver can issue instructions against the
/// component that executes them. The methods here cover the forms that
/// span two components (FPU memory operands, port I/O through the DAC).
pub struct Machine {
    pub cpu: Cpu8086,
    pub fpu: Fpu,
    pub mem: SegmentedMemory,
    pub dac: VgaDac,
}

impl Machine {
    /// Everything zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cpu: Cpu8086::new(),
            fpu: Fpu::new(),
            mem: SegmentedMemory::new(),
            dac: VgaDac::new(),
        }
    }

    /// Copy a `.COM` image to DS:0100h.
    pub fn load_com(&mut self, image: &[u8]) -> Result<(), RunError> {
        if image.len() > MAX_COM_SIZE {
            return Err(RunError::ProgramTooLarge(image.len()));
        }
        self.mem.load(Segment::Ds, COM_ORIGIN, image);
        Ok(())
    }

    /// `fild word [seg:addr]`
    pub fn fild_m16(&mut self, segment: Segment, addr: u16) {
        self.fpu.fild_i16(self.mem.read_word(segment, addr) as i16);
    }

    /// `fimul word [seg:addr]`
    pub fn fimul_m16(&mut self, segment: Segment, addr: u16) {
        self.fpu.fimul_i16(self.mem.read_word(segment, addr) as i16);
    }

    /// `fistp word [seg:addr]`
    pub fn fistp_m16(&mut self, segment: Segment, addr: u16) {
        let value = self.fpu.fistp_i16();
        self.mem.write_word(segment, addr, value as u16);
    }

    /// `fadd dword [seg:addr]`
    pub fn fadd_m32(&mut self, segment: Segment, addr: u16) {
        self.fpu.fadd_f32(self.mem.read_f32(segment, addr));
    }

    /// `out dx, al` routed to the DAC.
    pub fn out_dx_al(&mut self) {
        self.cpu.out_dx_al(&mut self.dac);
    }

    /// `in al, dx` routed to the DAC.
    pub fn in_al_dx(&mut self) {
        self.cpu.in_al_dx(&mut self.dac);
    }

    /// The visible mode 13h framebuffer: the first 64000 bytes of ES.
    #[must_use]
    pub fn framebuffer(&self) -> &[u8] {
        &self.mem.region(Segment::Es)[..(SCREEN_WIDTH * SCREEN_HEIGHT) as usize]
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a program image from disk.
pub fn read_program(path: &Path) -> Result<Vec<u8>, RunError> {
    fs::read(path).map_err(|source| RunError::ProgramOpen {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_addr(s: &str) -> Option<u16> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).ok()
    } else if let Some(hex) = s.strip_suffix('h') {
        u16::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

impl Observable for Machine {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("fpu.") {
            self.fpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("dac.") {
            self.dac.query(rest)
        } else {
            let (segment, rest) = if let Some(rest) = path.strip_prefix("ds.") {
                (Segment::Ds, rest)
            } else if let Some(rest) = path.strip_prefix("es.") {
                (Segment::Es, rest)
            } else if let Some(rest) = path.strip_prefix("fs.") {
                (Segment::Fs, rest)
            } else {
                return self.cpu.query(path);
            };
            parse_addr(rest).map(|a| Value::U8(self.mem.read_byte(segment, a)))
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.<8086_paths>",
            "fpu.<8087_paths>",
            "dac.<dac_paths>",
            "ds.<address>",
            "es.<address>",
            "fs.<address>",
        ]
    }
}
