//! Instruction-level replay of the tube intro.
//!
//! Each method below is one stretch of the original program, issued
//! instruction by instruction against the [`Machine`]. Conditional jumps
//! become `if`/`break` on the flags the preceding instruction set, and
//! `loop` becomes [`Cpu8086::loop_cx`](intel_8086::Cpu8086::loop_cx). The
//! program never runs a fetch/decode loop; the image loaded at 0100h is
//! only read for its data constants.

use intel_8086::{Cpu8086, Reg, Segment};
use tracing::{debug, trace};

use crate::error::RunError;
use crate::machine::{Machine, SCREEN_WIDTH};

/// Accumulation buffer for the rendered tube, in DS.
pub const PIXBUF: u16 = 0x0204;
/// Scratch words for the texture coordinates; 4 bytes below them is the
/// per-frame angle step (a float whose low word also scales the texture).
pub const TEXUV: u16 = 0x01FC;
/// Eye distance constant.
pub const EYE: u16 = 0x01D2;
/// Rendered rows (the tube is centred vertically in the 200-line screen).
pub const SCREEN: u16 = 160;

const WIDTH: u16 = SCREEN_WIDTH as u16;

/// `[bx+si]`: the texel a ray lands on.
fn texel(cpu: &Cpu8086) -> u16 {
    cpu.regs.bx.wrapping_add(cpu.regs.si)
}

/// Driver for one replay.
pub struct Tube {
    machine: Machine,
    frames: u32,
}

impl Tube {
    /// Wrap a machine that already holds the program image. No instructions
    /// are issued.
    #[must_use]
    pub fn new(machine: Machine) -> Self {
        Self { machine, frames: 0 }
    }

    /// Load `image` and run everything before the main loop: video mode,
    /// palette, texture and FPU setup.
    pub fn boot(image: &[u8]) -> Result<Self, RunError> {
        let mut machine = Machine::new();
        machine.load_com(image)?;
        let mut tube = Self::new(machine);
        tube.init_video();
        tube.build_palette();
        tube.build_texture();
        tube.init_fpu();
        debug!("boot complete");
        Ok(tube)
    }

    #[must_use]
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// `mov al,13h / int 10h / push 0A000h / pop es / mov ax,cs /
    /// add ah,10h / mov fs,ax / xor cx,cx`
    ///
    /// The mode switch clears video memory. Segment registers are not
    /// modelled, so the segment loads only move the stack and AX.
    pub fn init_video(&mut self) {
        let m = &mut self.machine;
        m.cpu.regs.sp = 0xFFFE;
        m.cpu.mov_i(Reg::Al, 0x13);
        m.mem.fill(Segment::Es, 0);
        m.cpu.push_i(&mut m.mem, 0xA000);
        m.cpu.pop_val(&m.mem);
        m.cpu.mov_i(Reg::Ax, 0);
        m.cpu.add_i(Reg::Ah, 0x10);
        m.cpu.xor(Reg::Cx, Reg::Cx);
    }

    /// Program all 256 DAC entries and fill FS with the identity ramp.
    ///
    /// CX starts at zero, so `loop` runs 65536 times and every index is
    /// written 256 times; the last pass wins.
    pub fn build_palette(&mut self) {
        let m = &mut self.machine;
        loop {
            m.cpu.mov_i(Reg::Dx, 0x03C8);
            m.cpu.mov(Reg::Ax, Reg::Cx);
            m.out_dx_al();
            m.cpu.inc(Reg::Dx);
            m.cpu.sar(Reg::Al, 1);
            if !m.cpu.flags.sign() {
                m.out_dx_al();
                m.cpu.mul(Reg::Al);
                m.cpu.shr(Reg::Ax, 6);
                m.out_dx_al();
            }
            m.cpu.mov_i(Reg::Al, 0);
            m.out_dx_al();
            if m.cpu.flags.sign() {
                m.cpu.sub(Reg::Al, Reg::Cl);
                m.cpu.shr(Reg::Al, 1);
                m.out_dx_al();
                m.cpu.shr(Reg::Al, 1);
                m.out_dx_al();
            }
            m.cpu.mov(Reg::Bx, Reg::Cx);
            let bx = m.cpu.regs.bx;
            m.cpu.mov_m_r(&mut m.mem, Segment::Fs, bx, Reg::Bl);
            if !m.cpu.loop_cx() {
                break;
            }
        }
        trace!("palette built");
    }

    /// Hash the FS ramp into the tube texture.
    ///
    /// Each pass writes the same byte at BX and at BX with BH inverted,
    /// which mirrors the texture top to bottom.
    pub fn build_texture(&mut self) {
        let m = &mut self.machine;
        loop {
            m.cpu.mov(Reg::Bx, Reg::Cx);
            m.cpu.add(Reg::Ax, Reg::Cx);
            let cl = m.cpu.get(Reg::Cl) as u8;
            m.cpu.rol(Reg::Ax, cl);
            m.cpu.mov(Reg::Dh, Reg::Al);
            m.cpu.sar(Reg::Dh, 5);
            m.cpu.adc(Reg::Dl, Reg::Dh);
            let bx = m.cpu.regs.bx;
            m.cpu.adc_r_m(Reg::Dl, &m.mem, Segment::Fs, bx.wrapping_add(255));
            m.cpu.shr(Reg::Dl, 1);
            m.cpu.mov_m_r(&mut m.mem, Segment::Fs, bx, Reg::Dl);
            m.cpu.not(Reg::Bh);
            let bx = m.cpu.regs.bx;
            m.cpu.mov_m_r(&mut m.mem, Segment::Fs, bx, Reg::Dl);
            if !m.cpu.loop_cx() {
                break;
            }
        }
        trace!("texture built");
    }

    /// `fninit / fldz`: the angle accumulator starts at zero.
    pub fn init_fpu(&mut self) {
        self.machine.fpu.fninit();
        self.machine.fpu.fldz();
    }

    /// Render one frame into video memory.
    ///
    /// Scrolls the texture, advances the angle, casts one ray per pixel of
    /// a 320x160 window into the pixel buffer, copies the buffer to the
    /// middle of the screen and then fades the buffer for the next frame.
    pub fn run_frame(&mut self) {
        let m = &mut self.machine;

        m.cpu.add_i(Reg::Bh, 8);
        m.cpu.mov_i(Reg::Di, PIXBUF);
        let angle_step = m.cpu.regs.di.wrapping_sub(PIXBUF).wrapping_add(TEXUV - 4);
        m.fadd_m32(Segment::Ds, angle_step);
        m.cpu.push(&mut m.mem, Reg::Di);

        m.cpu.mov_i(Reg::Dx, (-80_i16) as u16);
        loop {
            m.cpu.mov_i(Reg::Bp, (-160_i16) as u16);
            loop {
                Self::cast_ray(m);
                m.cpu.inc(Reg::Bp);
                m.cpu.cmp_i(Reg::Bp, 160);
                if m.cpu.flags.zero() {
                    break;
                }
            }
            m.cpu.inc(Reg::Dx);
            m.cpu.cmp_i(Reg::Dx, 80);
            if m.cpu.flags.zero() {
                break;
            }
        }

        m.cpu.pop(&m.mem, Reg::Si);
        m.cpu.mov_i(Reg::Di, (100 - SCREEN / 2) * WIDTH);
        m.cpu.mov_i(Reg::Ch, (SCREEN / 2) * WIDTH / 256);
        m.cpu.rep_movsw(&mut m.mem);

        m.cpu.mov_i(Reg::Ch, SCREEN * WIDTH / 256);
        loop {
            m.cpu.dec(Reg::Si);
            let si = m.cpu.regs.si;
            m.cpu.sar_m8(&mut m.mem, Segment::Ds, si, 2);
            if !m.cpu.loop_cx() {
                break;
            }
        }

        self.frames += 1;
        debug!(frame = self.frames, "frame rendered");
    }

    /// One pixel: rotate the ray (BP, DX, EYE) by the current angle, turn
    /// it into texture coordinates and accumulate a shaded texel at DS:DI.
    fn cast_ray(m: &mut Machine) {
        m.cpu.mov_i(Reg::Si, TEXUV);
        let si = m.cpu.regs.si;
        m.fild_m16(Segment::Ds, si.wrapping_sub(TEXUV).wrapping_add(EYE));
        m.cpu.mov_m_r(&mut m.mem, Segment::Ds, si, Reg::Bp);
        m.fild_m16(Segment::Ds, si);
        m.cpu.mov_m_r(&mut m.mem, Segment::Ds, si, Reg::Dx);
        m.fild_m16(Segment::Ds, si);

        m.cpu.mov_i(Reg::Cl, 2);
        loop {
            let fpu = &mut m.fpu;
            fpu.fld_st(3);
            fpu.fsincos();
            fpu.fld_st(2);
            fpu.fmul(0, 1);
            fpu.fld_st(4);
            fpu.fmul(0, 3);
            fpu.fsubp(1, 0);
            fpu.fxch(3);
            fpu.fmulp(2, 0);
            fpu.fmulp(3, 0);
            fpu.faddp(2, 0);
            fpu.fxch(2);
            if !m.cpu.loop_cx() {
                break;
            }
        }

        let fpu = &mut m.fpu;
        fpu.fld_st(1);
        fpu.fmul(0, 0);
        fpu.fld_st(1);
        fpu.fmul(0, 0);
        fpu.faddp(1, 0);
        fpu.fsqrt();
        fpu.fdivp(3, 0);
        fpu.fpatan();

        let scale = si.wrapping_sub(4);
        m.fimul_m16(Segment::Ds, scale);
        m.fistp_m16(Segment::Ds, si);
        m.fimul_m16(Segment::Ds, scale);
        m.fistp_m16(Segment::Ds, si.wrapping_add(1));
        m.cpu.mov_r_m(Reg::Si, &m.mem, Segment::Ds, si);

        let addr = texel(&m.cpu);
        m.cpu.lea(Reg::Ax, addr);
        m.cpu.add(Reg::Al, Reg::Ah);
        m.cpu.and_i(Reg::Al, 64);
        m.cpu.mov_i(Reg::Al, u16::from((-5_i8) as u8));
        if !m.cpu.flags.zero() {
            m.cpu.shl(Reg::Si, 2);
            let addr = texel(&m.cpu);
            m.cpu.lea(Reg::Ax, addr);
            m.cpu.sub(Reg::Al, Reg::Ah);
            m.cpu.mov_i(Reg::Al, u16::from((-16_i8) as u8));
            if m.cpu.flags.sign() {
                m.cpu.shl(Reg::Si, 1);
                m.cpu.mov_i(Reg::Al, u16::from((-48_i8) as u8));
            }
        }

        let addr = texel(&m.cpu);
        m.cpu.add_r_m(Reg::Al, &m.mem, Segment::Fs, addr);
        let di = m.cpu.regs.di;
        m.cpu.add_m_r(&mut m.mem, Segment::Ds, di, Reg::Al);
        m.cpu.inc(Reg::Di);
    }

    /// Render `frames` frames, handing each to `on_frame` with its zero-based
    /// index once the blur pass has run.
    pub fn run(&mut self, frames: u32, mut on_frame: impl FnMut(u32, &Machine)) {
        for index in 0..frames {
            self.run_frame();
            on_frame(index, &self.machine);
        }
    }
}
