//! Port I/O instructions.
//!
//! The CPU only moves AL to or from a port; the device behind the port is
//! whatever [`IoBus`] the caller passes in.

use emu_core::IoBus;

use crate::cpu::Cpu8086;
use crate::registers::Reg;

impl Cpu8086 {
    /// `out port, value`
    pub fn out<I: IoBus>(&self, io: &mut I, port: u16, value: u8) {
        io.write_io(port, value);
    }

    /// `out dx, al`
    pub fn out_dx_al<I: IoBus>(&self, io: &mut I) {
        self.out(io, self.regs.dx, self.get(Reg::Al) as u8);
    }

    /// `in al, port`. AH is preserved.
    pub fn in_al<I: IoBus>(&mut self, io: &mut I, port: u16) {
        let value = io.read_io(port);
        self.set(Reg::Al, u16::from(value));
    }

    /// `in al, dx`
    pub fn in_al_dx<I: IoBus>(&mut self, io: &mut I) {
        self.in_al(io, self.regs.dx);
    }
}
