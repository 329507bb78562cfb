//! Stack operations.
//!
//! The stack lives in DS. SP moves by two and wraps at the segment
//! boundary; the word itself goes through [`Bus::write_word`], so a push at
//! SP = 0x0001 writes its low byte to 0xFFFF and its high byte to 0x0000.

use crate::bus::{Bus, Segment};
use crate::cpu::Cpu8086;
use crate::registers::Reg;

impl Cpu8086 {
    /// `push reg`
    pub fn push<B: Bus>(&mut self, bus: &mut B, reg: Reg) {
        self.push_i(bus, self.get(reg));
    }

    /// `push imm`
    pub fn push_i<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write_word(Segment::Ds, self.regs.sp, value);
    }

    /// `pop reg`
    pub fn pop<B: Bus>(&mut self, bus: &B, reg: Reg) {
        let value = self.pop_val(bus);
        self.set(reg, value);
    }

    /// Pop a word without a destination register (`pop es` and friends).
    pub fn pop_val<B: Bus>(&mut self, bus: &B) -> u16 {
        let value = bus.read_word(Segment::Ds, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }
}
