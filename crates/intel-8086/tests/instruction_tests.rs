//! Behavioural tests for the integer core through its public API.

use intel_8086::{Bus, CF, Cpu8086, OF, Reg, Segment, SegmentedMemory};

const PAIRS: [(Reg, Reg, Reg); 4] = [
    (Reg::Ax, Reg::Al, Reg::Ah),
    (Reg::Bx, Reg::Bl, Reg::Bh),
    (Reg::Cx, Reg::Cl, Reg::Ch),
    (Reg::Dx, Reg::Dl, Reg::Dh),
];

#[test]
fn byte_halves_are_independent() {
    let mut cpu = Cpu8086::new();
    for (word, lo, hi) in PAIRS {
        for value in [0x00, 0x7F, 0x80, 0xFF] {
            cpu.set(word, 0x5AA5);
            cpu.set(lo, value);
            assert_eq!(cpu.get(hi), 0x5A);
            cpu.set(word, 0x5AA5);
            cpu.set(hi, value);
            assert_eq!(cpu.get(lo), 0xA5);
        }
        cpu.set(word, 0x1234);
        assert_eq!((cpu.get(hi), cpu.get(lo)), (0x12, 0x34));
    }
}

#[test]
fn byte_register_writes_truncate() {
    let mut cpu = Cpu8086::new();
    cpu.mov_i(Reg::Cl, 0xFF02);
    assert_eq!(cpu.get(Reg::Cx), 0x0002);
}

#[test]
fn add_ff_ff() {
    let mut cpu = Cpu8086::new();
    cpu.set(Reg::Al, 0xFF);
    cpu.set(Reg::Ah, 0xFF);
    cpu.add(Reg::Al, Reg::Ah);
    assert_eq!(cpu.get(Reg::Al), 0xFE);
    assert!(cpu.flags.carry());
    assert!(!cpu.flags.zero());
    assert!(cpu.flags.sign());
}

#[test]
fn sub_zero_minus_one() {
    let mut cpu = Cpu8086::new();
    cpu.set(Reg::Bl, 0x01);
    cpu.sub(Reg::Al, Reg::Bl);
    assert_eq!(cpu.get(Reg::Al), 0xFF);
    assert!(cpu.flags.carry());
    assert!(cpu.flags.sign());
}

#[test]
fn inc_ff_keeps_carry() {
    let mut cpu = Cpu8086::new();
    cpu.flags.set_if(CF, true);
    cpu.set(Reg::Al, 0xFF);
    cpu.inc(Reg::Al);
    assert_eq!(cpu.get(Reg::Al), 0x00);
    assert!(cpu.flags.zero());
    assert!(cpu.flags.carry());

    cpu.flags.set_if(CF, false);
    cpu.dec(Reg::Al);
    assert!(!cpu.flags.carry());
}

#[test]
fn rol_by_eight_recomputes_carry() {
    let mut cpu = Cpu8086::new();
    for value in [0x01, 0x80, 0xA5, 0x5A] {
        cpu.set(Reg::Dl, value);
        cpu.flags.set_if(CF, value & 1 == 0);
        cpu.rol(Reg::Dl, 8);
        assert_eq!(cpu.get(Reg::Dl), value);
        assert_eq!(cpu.flags.carry(), value & 1 != 0);
    }
}

#[test]
fn rol_word_count_masked_to_four_bits() {
    let mut cpu = Cpu8086::new();
    cpu.set(Reg::Ax, 0x8001);
    cpu.rol(Reg::Ax, 16);
    assert_eq!(cpu.get(Reg::Ax), 0x8001);
    cpu.rol(Reg::Ax, 15);
    assert_eq!(cpu.get(Reg::Ax), 0xC000);
    assert!(!cpu.flags.carry());
}

#[test]
fn word_access_wraps_at_ffff() {
    let mut mem = SegmentedMemory::new();
    mem.write_word(Segment::Ds, 0xFFFF, 0x1234);
    assert_eq!(mem.read_byte(Segment::Ds, 0xFFFF), 0x34);
    assert_eq!(mem.read_byte(Segment::Ds, 0x0000), 0x12);
    assert_eq!(mem.read_byte(Segment::Es, 0x0000), 0x00);

    let mut cpu = Cpu8086::new();
    cpu.mov_r_m(Reg::Bx, &mem, Segment::Ds, 0xFFFF);
    assert_eq!(cpu.get(Reg::Bx), 0x1234);
}

#[test]
fn mul_sets_carry_and_overflow_together() {
    let mut cpu = Cpu8086::new();
    cpu.set(Reg::Al, 0x10);
    cpu.mul(Reg::Al);
    assert_eq!(cpu.get(Reg::Ax), 0x0100);
    assert!(cpu.flags.carry() && cpu.flags.overflow());

    cpu.set(Reg::Ax, 0x0002);
    cpu.set(Reg::Cx, 0x0003);
    cpu.mul(Reg::Cx);
    assert_eq!((cpu.get(Reg::Dx), cpu.get(Reg::Ax)), (0, 6));
    assert!(!cpu.flags.is_set(CF | OF));
}

#[test]
fn mov_never_touches_flags() {
    let mut cpu = Cpu8086::new();
    let mut mem = SegmentedMemory::new();
    cpu.flags.update_byte(0x80, true);
    let before = cpu.flags;
    cpu.mov_i(Reg::Ax, 0);
    cpu.mov(Reg::Bx, Reg::Ax);
    cpu.mov_m_r(&mut mem, Segment::Fs, 0x10, Reg::Bl);
    cpu.mov_r_m(Reg::Dh, &mem, Segment::Fs, 0x10);
    cpu.lea(Reg::Si, 0);
    cpu.cbw();
    assert_eq!(cpu.flags, before);
}

#[test]
fn stack_and_string_ops_compose() {
    let mut cpu = Cpu8086::new();
    let mut mem = SegmentedMemory::new();
    cpu.regs.sp = 0xFFFE;
    for (i, b) in (0..8u8).enumerate() {
        mem.write_byte(Segment::Ds, 0x0204 + i as u16, b + 1);
    }
    cpu.mov_i(Reg::Di, 0x0204);
    cpu.push(&mut mem, Reg::Di);
    cpu.pop(&mem, Reg::Si);
    cpu.mov_i(Reg::Di, 20 * 320);
    cpu.mov_i(Reg::Cx, 4);
    cpu.rep_movsw(&mut mem);
    assert_eq!(&mem.region(Segment::Es)[6400..6408], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}
