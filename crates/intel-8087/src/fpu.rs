//! Register stack and arithmetic.

/// Number of physical registers.
const SLOTS: usize = 8;

/// x87 register stack.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fpu {
    regs: [f64; SLOTS],
    top: u8,
}

impl Fpu {
    /// Zeroed registers, top = 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical slot of `ST(i)`.
    fn slot(&self, i: u8) -> usize {
        usize::from(self.top.wrapping_add(i) & 7)
    }

    /// Current top-of-stack pointer, 0-7.
    #[must_use]
    pub const fn top(&self) -> u8 {
        self.top
    }

    /// Raw physical registers, slot order.
    #[must_use]
    pub const fn registers(&self) -> &[f64; SLOTS] {
        &self.regs
    }

    /// Read `ST(i)`.
    #[must_use]
    pub fn st(&self, i: u8) -> f64 {
        self.regs[self.slot(i)]
    }

    /// Write `ST(i)`.
    pub fn set_st(&mut self, i: u8, value: f64) {
        let slot = self.slot(i);
        self.regs[slot] = value;
    }

    pub fn push(&mut self, value: f64) {
        self.top = self.top.wrapping_sub(1) & 7;
        self.set_st(0, value);
    }

    pub fn pop(&mut self) -> f64 {
        let value = self.st(0);
        self.top = (self.top + 1) & 7;
        value
    }

    /// `fninit`. Resets top and clears every slot.
    pub fn fninit(&mut self) {
        *self = Self::default();
    }

    /// `fldz`
    pub fn fldz(&mut self) {
        self.push(0.0);
    }

    /// `fld st(i)`: duplicate `ST(i)` onto the stack.
    pub fn fld_st(&mut self, i: u8) {
        self.push(self.st(i));
    }

    /// `fxch st(i)`
    pub fn fxch(&mut self, i: u8) {
        let (a, b) = (self.slot(0), self.slot(i));
        self.regs.swap(a, b);
    }

    fn combine(&mut self, d: u8, src: u8, op: fn(f64, f64) -> f64) {
        self.set_st(d, op(self.st(d), self.st(src)));
    }

    /// `fmul st(d), st(src)`
    pub fn fmul(&mut self, d: u8, src: u8) {
        self.combine(d, src, |a, b| a * b);
    }

    /// `fadd st(d), st(src)`
    pub fn fadd(&mut self, d: u8, src: u8) {
        self.combine(d, src, |a, b| a + b);
    }

    /// `fsub st(d), st(src)`: `ST(d) = ST(d) - ST(src)`.
    pub fn fsub(&mut self, d: u8, src: u8) {
        self.combine(d, src, |a, b| a - b);
    }

    /// `fdiv st(d), st(src)`: `ST(d) = ST(d) / ST(src)`.
    pub fn fdiv(&mut self, d: u8, src: u8) {
        self.combine(d, src, |a, b| a / b);
    }

    /// `fmulp st(d), st(src)`
    pub fn fmulp(&mut self, d: u8, src: u8) {
        self.fmul(d, src);
        self.pop();
    }

    /// `faddp st(d), st(src)`
    pub fn faddp(&mut self, d: u8, src: u8) {
        self.fadd(d, src);
        self.pop();
    }

    /// `fsubp st(d), st(src)`. Operand order as in [`Fpu::fsub`], then pop.
    pub fn fsubp(&mut self, d: u8, src: u8) {
        self.fsub(d, src);
        self.pop();
    }

    /// `fdivp st(d), st(src)`
    pub fn fdivp(&mut self, d: u8, src: u8) {
        self.fdiv(d, src);
        self.pop();
    }

    /// `fsincos`: ST(0) becomes the sine, then the cosine of the original
    /// angle is pushed. Afterwards ST(0) = cos, ST(1) = sin.
    pub fn fsincos(&mut self) {
        let (sin, cos) = self.st(0).sin_cos();
        self.set_st(0, sin);
        self.push(cos);
    }

    /// `fsqrt`
    pub fn fsqrt(&mut self) {
        self.set_st(0, self.st(0).sqrt());
    }

    /// `fpatan`: `atan2(ST(1), ST(0))`, pop, result in the new ST(0).
    pub fn fpatan(&mut self) {
        let x = self.st(0);
        let y = self.st(1);
        self.pop();
        self.set_st(0, y.atan2(x));
    }

    /// `fild` with a 16-bit signed operand.
    pub fn fild_i16(&mut self, value: i16) {
        self.push(f64::from(value));
    }

    /// `fimul` with a 16-bit signed operand.
    pub fn fimul_i16(&mut self, value: i16) {
        self.set_st(0, self.st(0) * f64::from(value));
    }

    /// `fadd` with a single-precision operand.
    pub fn fadd_f32(&mut self, value: f32) {
        self.set_st(0, self.st(0) + f64::from(value));
    }

    /// `fistp` to a 16-bit integer.
    ///
    /// Rounds to nearest with ties to even (the default control word), then
    /// keeps the low 16 bits of the integer. Pops.
    pub fn fistp_i16(&mut self) -> i16 {
        self.pop().round_ties_even() as i64 as i16
    }
}
