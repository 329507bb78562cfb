//! ALU operations for the 8086.
//!
//! Each helper returns the masked result and the carry the instruction
//! defines. Zero and sign are left to [`crate::Flags::update`]; carry is the
//! part that differs per instruction, so it is computed here.

use crate::registers::Width;

/// Result of an ALU operation: masked value plus the instruction's carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    pub value: u16,
    pub carry: bool,
}

/// `a + b + carry_in`. Carry is set when the unsigned sum exceeds the width.
#[must_use]
pub fn add(a: u16, b: u16, carry_in: bool, width: Width) -> AluResult {
    let mask = width.mask();
    let sum = u32::from(a & mask) + u32::from(b & mask) + u32::from(carry_in);
    AluResult {
        value: (sum as u16) & mask,
        carry: sum > u32::from(mask),
    }
}

/// `a - b`. Carry is the borrow: unsigned `a < b`.
#[must_use]
pub fn sub(a: u16, b: u16, width: Width) -> AluResult {
    let mask = width.mask();
    let (a, b) = (a & mask, b & mask);
    AluResult {
        value: a.wrapping_sub(b) & mask,
        carry: a < b,
    }
}

/// Logical shift right. A zero count keeps `carry_in`.
#[must_use]
pub fn shr(value: u16, count: u8, carry_in: bool, width: Width) -> AluResult {
    let v = u32::from(value & width.mask());
    if count == 0 {
        return AluResult {
            value: v as u16,
            carry: carry_in,
        };
    }
    let count = u32::from(count);
    AluResult {
        value: v.checked_shr(count).unwrap_or(0) as u16,
        carry: v.checked_shr(count - 1).unwrap_or(0) & 1 != 0,
    }
}

/// Shift left. A zero count keeps `carry_in`.
///
/// Carry is the last bit to leave the top of the operand, i.e. bit
/// `width - count` of the original value. Counts past the width shift out
/// only zeros.
#[must_use]
pub fn shl(value: u16, count: u8, carry_in: bool, width: Width) -> AluResult {
    let mask = width.mask();
    let v = u32::from(value & mask);
    if count == 0 {
        return AluResult {
            value: v as u16,
            carry: carry_in,
        };
    }
    let count = u32::from(count);
    let bits = width.bits();
    let carry = count <= bits && (v >> (bits - count)) & 1 != 0;
    AluResult {
        value: (v.checked_shl(count).unwrap_or(0) as u16) & mask,
        carry,
    }
}

/// Arithmetic shift right: the sign bit is replicated. A zero count keeps
/// `carry_in`.
#[must_use]
pub fn sar(value: u16, count: u8, carry_in: bool, width: Width) -> AluResult {
    let mask = width.mask();
    if count == 0 {
        return AluResult {
            value: value & mask,
            carry: carry_in,
        };
    }
    let v = sign_extend(value, width);
    let count = u32::from(count);
    AluResult {
        value: (v >> count.min(31)) as u16 & mask,
        carry: (v >> (count - 1).min(31)) & 1 != 0,
    }
}

/// Rotate left. The count is masked to 7 (byte) or 15 (word) first; carry
/// is bit 0 of the rotated value, so even a full rotation recomputes it.
#[must_use]
pub fn rol(value: u16, count: u8, width: Width) -> AluResult {
    let count = u32::from(count) & (width.bits() - 1);
    let value = match width {
        Width::Byte => u16::from((value as u8).rotate_left(count)),
        Width::Word => value.rotate_left(count),
    };
    AluResult {
        value,
        carry: value & 1 != 0,
    }
}

/// Sign-extend the low `width` bits of `value` to `i32`.
#[must_use]
pub fn sign_extend(value: u16, width: Width) -> i32 {
    match width {
        Width::Byte => i32::from(value as u8 as i8),
        Width::Word => i32::from(value as i16),
    }
}
