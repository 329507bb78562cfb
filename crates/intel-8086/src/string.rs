//! String instructions.

use crate::bus::{Bus, Segment};
use crate::cpu::Cpu8086;

impl Cpu8086 {
    /// `rep movsw`: copy CX words from DS:SI to ES:DI, forward direction.
    ///
    /// Runs to completion in one call. Each word is an independent
    /// read/write, so SI or DI wrapping mid-copy is handled per word.
    pub fn rep_movsw<B: Bus>(&mut self, bus: &mut B) {
        while self.regs.cx != 0 {
            let word = bus.read_word(Segment::Ds, self.regs.si);
            bus.write_word(Segment::Es, self.regs.di, word);
            self.regs.si = self.regs.si.wrapping_add(2);
            self.regs.di = self.regs.di.wrapping_add(2);
            self.regs.cx -= 1;
        }
    }
}
