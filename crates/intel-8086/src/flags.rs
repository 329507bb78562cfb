//! 8086 condition flags.
//!
//! Only the four flags the traced subset depends on are modelled. They sit at
//! their real FLAGS-register bit positions so the raw value reads like a
//! debugger dump.
//!
//! Zero and sign always derive from the result. Carry never does: every
//! instruction defines it differently, so callers compute it and pass it in.

use crate::registers::Width;

/// Carry flag (bit 0) - unsigned overflow, borrow, or last bit shifted out.
pub const CF: u16 = 0x0001;

/// Zero flag (bit 6) - set if result is zero.
pub const ZF: u16 = 0x0040;

/// Sign flag (bit 7) - copy of the result's top bit.
pub const SF: u16 = 0x0080;

/// Overflow flag (bit 11).
pub const OF: u16 = 0x0800;

/// Condition flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(pub u16);

impl Flags {
    /// All flags clear.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u16) -> bool {
        self.0 & flag != 0
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u16, condition: bool) {
        if condition {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    #[must_use]
    pub const fn carry(self) -> bool {
        self.is_set(CF)
    }

    #[must_use]
    pub const fn zero(self) -> bool {
        self.is_set(ZF)
    }

    #[must_use]
    pub const fn sign(self) -> bool {
        self.is_set(SF)
    }

    #[must_use]
    pub const fn overflow(self) -> bool {
        self.is_set(OF)
    }

    /// Update Z and S from a result of the given width. Carry is untouched.
    pub fn update_zs(&mut self, result: u16, width: Width) {
        let result = result & width.mask();
        self.set_if(ZF, result == 0);
        self.set_if(SF, result & width.sign_bit() != 0);
    }

    /// Update Z and S from `result` and set carry to the supplied value.
    pub fn update(&mut self, result: u16, width: Width, carry: bool) {
        self.update_zs(result, width);
        self.set_if(CF, carry);
    }

    /// Byte form of [`Flags::update`].
    pub fn update_byte(&mut self, result: u8, carry: bool) {
        self.update(u16::from(result), Width::Byte, carry);
    }

    /// Word form of [`Flags::update`].
    pub fn update_word(&mut self, result: u16, carry: bool) {
        self.update(result, Width::Word, carry);
    }
}
