//! 8086 general-purpose register file.
//!
//! Each register pair is stored once as a canonical `u16`. The 8-bit views
//! (`AL`/`AH` and friends) are computed on read and written back with a
//! read-modify-write, so writing one half never disturbs the other.

/// Operand width of a register or memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    /// Mask selecting the significant bits.
    #[must_use]
    pub const fn mask(self) -> u16 {
        match self {
            Width::Byte => 0x00FF,
            Width::Word => 0xFFFF,
        }
    }

    /// The sign (top) bit.
    #[must_use]
    pub const fn sign_bit(self) -> u16 {
        match self {
            Width::Byte => 0x0080,
            Width::Word => 0x8000,
        }
    }

    /// Number of bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Width::Byte => 8,
            Width::Word => 16,
        }
    }
}

/// Register selector. The first eight are the 8-bit views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    Al,
    Ah,
    Bl,
    Bh,
    Cl,
    Ch,
    Dl,
    Dh,
    Ax,
    Bx,
    Cx,
    Dx,
    Si,
    Di,
    Bp,
    Sp,
}

impl Reg {
    /// Every register, 8-bit views first.
    pub const ALL: [Reg; 16] = [
        Reg::Al,
        Reg::Ah,
        Reg::Bl,
        Reg::Bh,
        Reg::Cl,
        Reg::Ch,
        Reg::Dl,
        Reg::Dh,
        Reg::Ax,
        Reg::Bx,
        Reg::Cx,
        Reg::Dx,
        Reg::Si,
        Reg::Di,
        Reg::Bp,
        Reg::Sp,
    ];

    #[must_use]
    pub const fn width(self) -> Width {
        match self {
            Reg::Al | Reg::Ah | Reg::Bl | Reg::Bh | Reg::Cl | Reg::Ch | Reg::Dl | Reg::Dh => {
                Width::Byte
            }
            _ => Width::Word,
        }
    }

    #[must_use]
    pub const fn is_byte(self) -> bool {
        matches!(self.width(), Width::Byte)
    }

    /// Lower-case assembler name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Reg::Al => "al",
            Reg::Ah => "ah",
            Reg::Bl => "bl",
            Reg::Bh => "bh",
            Reg::Cl => "cl",
            Reg::Ch => "ch",
            Reg::Dl => "dl",
            Reg::Dh => "dh",
            Reg::Ax => "ax",
            Reg::Bx => "bx",
            Reg::Cx => "cx",
            Reg::Dx => "dx",
            Reg::Si => "si",
            Reg::Di => "di",
            Reg::Bp => "bp",
            Reg::Sp => "sp",
        }
    }
}

/// 8086 general-purpose registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub ax: u16,
    pub bx: u16,
    pub cx: u16,
    pub dx: u16,
    pub si: u16,
    pub di: u16,
    pub bp: u16,
    pub sp: u16,
}

const fn low(word: u16) -> u16 {
    word & 0x00FF
}

const fn high(word: u16) -> u16 {
    word >> 8
}

const fn with_low(word: u16, value: u16) -> u16 {
    (word & 0xFF00) | (value & 0x00FF)
}

const fn with_high(word: u16, value: u16) -> u16 {
    (word & 0x00FF) | ((value & 0x00FF) << 8)
}

impl Registers {
    /// Read a register. 8-bit views are zero-extended.
    #[must_use]
    pub const fn get(&self, reg: Reg) -> u16 {
        match reg {
            Reg::Al => low(self.ax),
            Reg::Ah => high(self.ax),
            Reg::Bl => low(self.bx),
            Reg::Bh => high(self.bx),
            Reg::Cl => low(self.cx),
            Reg::Ch => high(self.cx),
            Reg::Dl => low(self.dx),
            Reg::Dh => high(self.dx),
            Reg::Ax => self.ax,
            Reg::Bx => self.bx,
            Reg::Cx => self.cx,
            Reg::Dx => self.dx,
            Reg::Si => self.si,
            Reg::Di => self.di,
            Reg::Bp => self.bp,
            Reg::Sp => self.sp,
        }
    }

    /// Write a register. 8-bit views take the low byte of `value`.
    pub fn set(&mut self, reg: Reg, value: u16) {
        match reg {
            Reg::Al => self.ax = with_low(self.ax, value),
            Reg::Ah => self.ax = with_high(self.ax, value),
            Reg::Bl => self.bx = with_low(self.bx, value),
            Reg::Bh => self.bx = with_high(self.bx, value),
            Reg::Cl => self.cx = with_low(self.cx, value),
            Reg::Ch => self.cx = with_high(self.cx, value),
            Reg::Dl => self.dx = with_low(self.dx, value),
            Reg::Dh => self.dx = with_high(self.dx, value),
            Reg::Ax => self.ax = value,
            Reg::Bx => self.bx = value,
            Reg::Cx => self.cx = value,
            Reg::Dx => self.dx = value,
            Reg::Si => self.si = value,
            Reg::Di => self.di = value,
            Reg::Bp => self.bp = value,
            Reg::Sp => self.sp = value,
        }
    }
}
