//! Integer instruction set.
//!
//! One method per instruction form the traced program uses. Dyadic forms
//! dispatch on the destination's width (or the source's, for stores to
//! memory), compute the masked result and the instruction's own carry, then
//! hand zero/sign to [`Flags::update`].

use crate::alu;
use crate::bus::{Bus, Segment};
use crate::flags::{CF, Flags, OF};
use crate::registers::{Reg, Registers, Width};

/// 8086 integer core: registers plus condition flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cpu8086 {
    pub regs: Registers,
    pub flags: Flags,
}

fn read_sized<B: Bus>(bus: &B, width: Width, segment: Segment, addr: u16) -> u16 {
    match width {
        Width::Byte => u16::from(bus.read_byte(segment, addr)),
        Width::Word => bus.read_word(segment, addr),
    }
}

fn write_sized<B: Bus>(bus: &mut B, width: Width, segment: Segment, addr: u16, value: u16) {
    match width {
        Width::Byte => bus.write_byte(segment, addr, value as u8),
        Width::Word => bus.write_word(segment, addr, value),
    }
}

impl Cpu8086 {
    /// Zeroed registers and flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn get(&self, reg: Reg) -> u16 {
        self.regs.get(reg)
    }

    pub fn set(&mut self, reg: Reg, value: u16) {
        self.regs.set(reg, value);
    }

    // ---------------------------------------------------------------------
    // Moves (never touch flags)
    // ---------------------------------------------------------------------

    /// `mov dst, src`
    pub fn mov(&mut self, dst: Reg, src: Reg) {
        self.set(dst, self.get(src));
    }

    /// `mov dst, imm`
    pub fn mov_i(&mut self, dst: Reg, value: u16) {
        self.set(dst, value);
    }

    /// `mov dst, [seg:addr]`, byte or word by `dst`.
    pub fn mov_r_m<B: Bus>(&mut self, dst: Reg, bus: &B, segment: Segment, addr: u16) {
        let value = read_sized(bus, dst.width(), segment, addr);
        self.set(dst, value);
    }

    /// `mov [seg:addr], src`, byte or word by `src`.
    pub fn mov_m_r<B: Bus>(&self, bus: &mut B, segment: Segment, addr: u16, src: Reg) {
        write_sized(bus, src.width(), segment, addr, self.get(src));
    }

    /// `lea dst, [expr]`. The driver computes the effective address.
    pub fn lea(&mut self, dst: Reg, addr: u16) {
        self.set(dst, addr);
    }

    /// `cbw`: sign-extend AL into AX.
    pub fn cbw(&mut self) {
        let al = self.get(Reg::Al) as u8 as i8;
        self.set(Reg::Ax, i16::from(al) as u16);
    }

    // ---------------------------------------------------------------------
    // Logical
    // ---------------------------------------------------------------------

    /// `xor dst, src`: clears CF and OF.
    pub fn xor(&mut self, dst: Reg, src: Reg) {
        let value = self.get(dst) ^ self.get(src);
        self.logic_result(dst, value);
    }

    /// `and dst, imm`: clears CF and OF.
    pub fn and_i(&mut self, dst: Reg, value: u16) {
        let value = self.get(dst) & value;
        self.logic_result(dst, value);
    }

    fn logic_result(&mut self, dst: Reg, value: u16) {
        let width = dst.width();
        let value = value & width.mask();
        self.set(dst, value);
        self.flags.update(value, width, false);
        self.flags.set_if(OF, false);
    }

    /// `not dst`: no flags.
    pub fn not(&mut self, dst: Reg) {
        self.set(dst, !self.get(dst));
    }

    // ---------------------------------------------------------------------
    // Arithmetic
    // ---------------------------------------------------------------------

    fn add_to_reg(&mut self, dst: Reg, operand: u16, carry_in: bool) {
        let width = dst.width();
        let r = alu::add(self.get(dst), operand, carry_in, width);
        self.set(dst, r.value);
        self.flags.update(r.value, width, r.carry);
    }

    /// `add dst, src`
    pub fn add(&mut self, dst: Reg, src: Reg) {
        self.add_to_reg(dst, self.get(src), false);
    }

    /// `add dst, imm`. A byte destination uses only the immediate's low byte.
    pub fn add_i(&mut self, dst: Reg, value: u16) {
        self.add_to_reg(dst, value, false);
    }

    /// `add dst, [seg:addr]`
    pub fn add_r_m<B: Bus>(&mut self, dst: Reg, bus: &B, segment: Segment, addr: u16) {
        let operand = read_sized(bus, dst.width(), segment, addr);
        self.add_to_reg(dst, operand, false);
    }

    /// `add [seg:addr], src`
    pub fn add_m_r<B: Bus>(&mut self, bus: &mut B, segment: Segment, addr: u16, src: Reg) {
        let width = src.width();
        let r = alu::add(read_sized(bus, width, segment, addr), self.get(src), false, width);
        write_sized(bus, width, segment, addr, r.value);
        self.flags.update(r.value, width, r.carry);
    }

    /// `adc dst, src`: adds the incoming carry before computing the new one.
    pub fn adc(&mut self, dst: Reg, src: Reg) {
        self.add_to_reg(dst, self.get(src), self.flags.carry());
    }

    /// `adc dst, [seg:addr]`
    pub fn adc_r_m<B: Bus>(&mut self, dst: Reg, bus: &B, segment: Segment, addr: u16) {
        let operand = read_sized(bus, dst.width(), segment, addr);
        self.add_to_reg(dst, operand, self.flags.carry());
    }

    /// `sub dst, src`: CF is the borrow.
    pub fn sub(&mut self, dst: Reg, src: Reg) {
        let width = dst.width();
        let r = alu::sub(self.get(dst), self.get(src), width);
        self.set(dst, r.value);
        self.flags.update(r.value, width, r.carry);
    }

    /// `cmp a, b`: flags as for `sub`, destination untouched.
    pub fn cmp(&mut self, a: Reg, b: Reg) {
        self.cmp_i(a, self.get(b));
    }

    /// `cmp a, imm`
    pub fn cmp_i(&mut self, a: Reg, value: u16) {
        let width = a.width();
        let r = alu::sub(self.get(a), value, width);
        self.flags.update(r.value, width, r.carry);
    }

    /// `inc dst`: Z and S only. Carry is never touched.
    pub fn inc(&mut self, dst: Reg) {
        let value = self.get(dst).wrapping_add(1);
        self.set(dst, value);
        self.flags.update_zs(value, dst.width());
    }

    /// `dec dst`: Z and S only. Carry is never touched.
    pub fn dec(&mut self, dst: Reg) {
        let value = self.get(dst).wrapping_sub(1);
        self.set(dst, value);
        self.flags.update_zs(value, dst.width());
    }

    /// Unsigned `mul src`.
    ///
    /// Byte: AX = AL * src. Word: DX:AX = AX * src. CF and OF are both set
    /// when the upper half of the product is non-zero.
    pub fn mul(&mut self, src: Reg) {
        let operand = self.get(src);
        let high = match src.width() {
            Width::Byte => {
                let product = self.get(Reg::Al) * operand;
                self.set(Reg::Ax, product);
                product >> 8
            }
            Width::Word => {
                let product = u32::from(self.get(Reg::Ax)) * u32::from(operand);
                self.set(Reg::Ax, product as u16);
                self.set(Reg::Dx, (product >> 16) as u16);
                (product >> 16) as u16
            }
        };
        self.flags.set_if(CF, high != 0);
        self.flags.set_if(OF, high != 0);
    }

    // ---------------------------------------------------------------------
    // Shifts and rotates
    // ---------------------------------------------------------------------

    fn shift_result(&mut self, dst: Reg, r: alu::AluResult) {
        self.set(dst, r.value);
        self.flags.update(r.value, dst.width(), r.carry);
    }

    /// `shr dst, count`. A zero count leaves CF as it was.
    pub fn shr(&mut self, dst: Reg, count: u8) {
        let r = alu::shr(self.get(dst), count, self.flags.carry(), dst.width());
        self.shift_result(dst, r);
    }

    /// `shl dst, count`. A zero count leaves CF as it was.
    pub fn shl(&mut self, dst: Reg, count: u8) {
        let r = alu::shl(self.get(dst), count, self.flags.carry(), dst.width());
        self.shift_result(dst, r);
    }

    /// `sar dst, count`. A zero count leaves CF as it was.
    pub fn sar(&mut self, dst: Reg, count: u8) {
        let r = alu::sar(self.get(dst), count, self.flags.carry(), dst.width());
        self.shift_result(dst, r);
    }

    /// `sar byte [seg:addr], count`
    pub fn sar_m8<B: Bus>(&mut self, bus: &mut B, segment: Segment, addr: u16, count: u8) {
        let value = u16::from(bus.read_byte(segment, addr));
        let r = alu::sar(value, count, self.flags.carry(), Width::Byte);
        bus.write_byte(segment, addr, r.value as u8);
        self.flags.update(r.value, Width::Byte, r.carry);
    }

    /// `rol dst, count`: only CF changes.
    pub fn rol(&mut self, dst: Reg, count: u8) {
        let r = alu::rol(self.get(dst), count, dst.width());
        self.set(dst, r.value);
        self.flags.set_if(CF, r.carry);
    }

    // ---------------------------------------------------------------------
    // Control
    // ---------------------------------------------------------------------

    /// `loop`: decrement CX (no flags) and report whether the branch is taken.
    pub fn loop_cx(&mut self) -> bool {
        self.regs.cx = self.regs.cx.wrapping_sub(1);
        self.regs.cx != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::SegmentedMemory;

    #[test]
    fn add_byte_ff_ff() {
        let mut cpu = Cpu8086::new();
        cpu.set(Reg::Al, 0xFF);
        cpu.set(Reg::Bl, 0xFF);
        cpu.add(Reg::Al, Reg::Bl);
        assert_eq!(cpu.get(Reg::Al), 0xFE);
        assert!(cpu.flags.carry());
        assert!(!cpu.flags.zero());
        assert!(cpu.flags.sign());
    }

    #[test]
    fn sub_byte_borrow() {
        let mut cpu = Cpu8086::new();
        cpu.set(Reg::Cl, 0x01);
        cpu.sub(Reg::Al, Reg::Cl);
        assert_eq!(cpu.get(Reg::Al), 0xFF);
        assert!(cpu.flags.carry());
        assert!(cpu.flags.sign());
    }

    #[test]
    fn inc_leaves_carry_set() {
        let mut cpu = Cpu8086::new();
        cpu.flags.set_if(CF, true);
        cpu.set(Reg::Dl, 0xFF);
        cpu.inc(Reg::Dl);
        assert_eq!(cpu.get(Reg::Dl), 0x00);
        assert_eq!(cpu.get(Reg::Dh), 0x00, "no carry into the high half");
        assert!(cpu.flags.zero());
        assert!(cpu.flags.carry());
    }

    #[test]
    fn dec_leaves_carry_clear() {
        let mut cpu = Cpu8086::new();
        cpu.dec(Reg::Si);
        assert_eq!(cpu.get(Reg::Si), 0xFFFF);
        assert!(cpu.flags.sign());
        assert!(!cpu.flags.carry());
    }

    #[test]
    fn cmp_does_not_write() {
        let mut cpu = Cpu8086::new();
        cpu.set(Reg::Bp, 160);
        cpu.cmp_i(Reg::Bp, 160);
        assert!(cpu.flags.zero());
        assert_eq!(cpu.get(Reg::Bp), 160);
        cpu.cmp_i(Reg::Bp, 161);
        assert!(cpu.flags.carry());
        assert!(cpu.flags.sign());
    }

    #[test]
    fn xor_self_clears() {
        let mut cpu = Cpu8086::new();
        cpu.flags = Flags(CF | OF);
        cpu.set(Reg::Cx, 0x1234);
        cpu.xor(Reg::Cx, Reg::Cx);
        assert_eq!(cpu.get(Reg::Cx), 0);
        assert!(cpu.flags.zero());
        assert!(!cpu.flags.carry());
        assert!(!cpu.flags.overflow());
    }

    #[test]
    fn and_masks_and_clears_overflow() {
        let mut cpu = Cpu8086::new();
        cpu.flags = Flags(CF | OF);
        cpu.set(Reg::Ax, 0x12C5);
        cpu.and_i(Reg::Al, 64);
        assert_eq!(cpu.get(Reg::Ax), 0x1240);
        assert!(!cpu.flags.zero());
        assert!(!cpu.flags.carry());
        assert!(!cpu.flags.overflow());
    }

    #[test]
    fn mul_byte_sets_carry_from_ah() {
        let mut cpu = Cpu8086::new();
        cpu.set(Reg::Ax, 0xFF10);
        cpu.mul(Reg::Al);
        assert_eq!(cpu.get(Reg::Ax), 0x0100);
        assert!(cpu.flags.carry());
        assert!(cpu.flags.overflow());

        cpu.set(Reg::Ax, 0x0007);
        cpu.mul(Reg::Al);
        assert_eq!(cpu.get(Reg::Ax), 49);
        assert!(!cpu.flags.carry());
        assert!(!cpu.flags.overflow());
    }

    #[test]
    fn mul_word_splits_into_dx_ax() {
        let mut cpu = Cpu8086::new();
        cpu.set(Reg::Ax, 0x1234);
        cpu.set(Reg::Bx, 0x0100);
        cpu.mul(Reg::Bx);
        assert_eq!(cpu.get(Reg::Ax), 0x3400);
        assert_eq!(cpu.get(Reg::Dx), 0x0012);
        assert!(cpu.flags.carry());
    }

    #[test]
    fn rol_full_byte_rotation_recomputes_carry() {
        let mut cpu = Cpu8086::new();
        cpu.set(Reg::Al, 0x01);
        cpu.rol(Reg::Al, 8);
        assert_eq!(cpu.get(Reg::Al), 0x01);
        assert!(cpu.flags.carry());

        cpu.set(Reg::Al, 0x02);
        cpu.rol(Reg::Al, 8);
        assert_eq!(cpu.get(Reg::Al), 0x02);
        assert!(!cpu.flags.carry());
    }

    #[test]
    fn rol_leaves_zero_and_sign() {
        let mut cpu = Cpu8086::new();
        cpu.flags.update_word(0, false);
        cpu.set(Reg::Ax, 0x4000);
        cpu.rol(Reg::Ax, 1);
        assert_eq!(cpu.get(Reg::Ax), 0x8000);
        assert!(cpu.flags.zero(), "rol does not recompute ZF");
        assert!(!cpu.flags.sign(), "rol does not recompute SF");
    }

    #[test]
    fn shift_zero_count_keeps_carry() {
        let mut cpu = Cpu8086::new();
        cpu.flags.set_if(CF, true);
        cpu.set(Reg::Ax, 0x0002);
        cpu.shr(Reg::Ax, 0);
        assert_eq!(cpu.get(Reg::Ax), 0x0002);
        assert!(cpu.flags.carry());
        cpu.shl(Reg::Ax, 0);
        assert!(cpu.flags.carry());
        cpu.sar(Reg::Ax, 0);
        assert!(cpu.flags.carry());
    }

    #[test]
    fn sar_m8_operates_in_place() {
        let mut cpu = Cpu8086::new();
        let mut mem = SegmentedMemory::new();
        mem.write_byte(Segment::Ds, 0x0300, 0x83);
        cpu.sar_m8(&mut mem, Segment::Ds, 0x0300, 2);
        assert_eq!(mem.read_byte(Segment::Ds, 0x0300), 0xE0);
        assert!(cpu.flags.carry());
        assert!(cpu.flags.sign());
    }

    #[test]
    fn memory_forms_follow_register_width() {
        let mut cpu = Cpu8086::new();
        let mut mem = SegmentedMemory::new();
        mem.write_word(Segment::Fs, 0x0010, 0xBEEF);

        cpu.mov_r_m(Reg::Dl, &mem, Segment::Fs, 0x0010);
        assert_eq!(cpu.get(Reg::Dx), 0x00EF);
        cpu.mov_r_m(Reg::Si, &mem, Segment::Fs, 0x0010);
        assert_eq!(cpu.get(Reg::Si), 0xBEEF);

        cpu.set(Reg::Al, 0x11);
        cpu.add_m_r(&mut mem, Segment::Fs, 0x0010, Reg::Al);
        assert_eq!(mem.read_word(Segment::Fs, 0x0010), 0xBE00);
        assert!(cpu.flags.carry());
        assert!(cpu.flags.zero());
    }

    #[test]
    fn adc_chains_carry_through_memory() {
        let mut cpu = Cpu8086::new();
        let mut mem = SegmentedMemory::new();
        mem.write_byte(Segment::Fs, 0x00FF, 0x01);
        cpu.flags.set_if(CF, true);
        cpu.set(Reg::Dl, 0xFE);
        cpu.adc_r_m(Reg::Dl, &mem, Segment::Fs, 0x00FF);
        assert_eq!(cpu.get(Reg::Dl), 0x00);
        assert!(cpu.flags.carry());
        assert!(cpu.flags.zero());
    }

    #[test]
    fn cbw_sign_extends() {
        let mut cpu = Cpu8086::new();
        cpu.set(Reg::Ax, 0x12FB);
        cpu.cbw();
        assert_eq!(cpu.get(Reg::Ax), 0xFFFB);
        cpu.set(Reg::Ax, 0xFF7F);
        cpu.cbw();
        assert_eq!(cpu.get(Reg::Ax), 0x007F);
    }

    #[test]
    fn not_and_lea_leave_flags() {
        let mut cpu = Cpu8086::new();
        cpu.flags = Flags(CF | OF);
        cpu.set(Reg::Bx, 0x00FF);
        cpu.not(Reg::Bh);
        assert_eq!(cpu.get(Reg::Bx), 0xFFFF);
        cpu.lea(Reg::Ax, 0x1234);
        assert_eq!(cpu.get(Reg::Ax), 0x1234);
        assert_eq!(cpu.flags, Flags(CF | OF));
    }

    #[test]
    fn loop_cx_wraps_from_zero() {
        let mut cpu = Cpu8086::new();
        assert!(cpu.loop_cx());
        assert_eq!(cpu.get(Reg::Cx), 0xFFFF);
        cpu.set(Reg::Cx, 1);
        assert!(!cpu.loop_cx());
    }
}
