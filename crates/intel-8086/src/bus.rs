//! Segmented memory interface.
//!
//! Real mode sees memory through 64 KiB windows. The traced program only
//! ever uses three of them, each backed by its own storage, so a segment is
//! a closed selector rather than a paragraph number. Offsets are `u16` and
//! every multi-byte access is a sequence of independent byte accesses, each
//! wrapping at 0xFFFF on its own. A word at 0xFFFF therefore touches 0xFFFF
//! and 0x0000 of the same segment.

/// Size of one segment in bytes.
pub const SEGMENT_SIZE: usize = 0x1_0000;

/// Segment selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Code, data, stack and the pixel accumulation buffer.
    Ds,
    /// Video memory (A000h).
    Es,
    /// Texture memory.
    Fs,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Ds, Segment::Es, Segment::Fs];
}

/// Memory bus interface.
///
/// Only byte access is required; word and float accesses are composed from
/// bytes so every implementation gets the same wraparound behaviour.
pub trait Bus {
    /// Read a byte.
    fn read_byte(&self, segment: Segment, addr: u16) -> u8;

    /// Write a byte.
    fn write_byte(&mut self, segment: Segment, addr: u16, value: u8);

    /// Read a little-endian word.
    fn read_word(&self, segment: Segment, addr: u16) -> u16 {
        u16::from_le_bytes([
            self.read_byte(segment, addr),
            self.read_byte(segment, addr.wrapping_add(1)),
        ])
    }

    /// Write a little-endian word.
    fn write_word(&mut self, segment: Segment, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(segment, addr, lo);
        self.write_byte(segment, addr.wrapping_add(1), hi);
    }

    /// Read an IEEE-754 single from four little-endian bytes.
    fn read_f32(&self, segment: Segment, addr: u16) -> f32 {
        f32::from_le_bytes([
            self.read_byte(segment, addr),
            self.read_byte(segment, addr.wrapping_add(1)),
            self.read_byte(segment, addr.wrapping_add(2)),
            self.read_byte(segment, addr.wrapping_add(3)),
        ])
    }
}

/// Three independent 64 KiB segments.
pub struct SegmentedMemory {
    ds: Box<[u8]>,
    es: Box<[u8]>,
    fs: Box<[u8]>,
}

impl SegmentedMemory {
    /// Create zero-filled memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ds: vec![0; SEGMENT_SIZE].into_boxed_slice(),
            es: vec![0; SEGMENT_SIZE].into_boxed_slice(),
            fs: vec![0; SEGMENT_SIZE].into_boxed_slice(),
        }
    }

    /// The full contents of one segment.
    #[must_use]
    pub fn region(&self, segment: Segment) -> &[u8] {
        match segment {
            Segment::Ds => &self.ds,
            Segment::Es => &self.es,
            Segment::Fs => &self.fs,
        }
    }

    fn region_mut(&mut self, segment: Segment) -> &mut [u8] {
        match segment {
            Segment::Ds => &mut self.ds,
            Segment::Es => &mut self.es,
            Segment::Fs => &mut self.fs,
        }
    }

    /// Copy `data` into a segment starting at `offset`, wrapping at 0xFFFF.
    pub fn load(&mut self, segment: Segment, offset: u16, data: &[u8]) {
        let mut addr = offset;
        for &byte in data {
            self.write_byte(segment, addr, byte);
            addr = addr.wrapping_add(1);
        }
    }

    /// Fill a whole segment with one value.
    pub fn fill(&mut self, segment: Segment, value: u8) {
        self.region_mut(segment).fill(value);
    }
}

impl Default for SegmentedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SegmentedMemory {
    fn read_byte(&self, segment: Segment, addr: u16) -> u8 {
        self.region(segment)[usize::from(addr)]
    }

    fn write_byte(&mut self, segment: Segment, addr: u16, value: u8) {
        self.region_mut(segment)[usize::from(addr)] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_little_endian() {
        let mut mem = SegmentedMemory::new();
        mem.write_word(Segment::Ds, 0x0100, 0x1234);
        assert_eq!(mem.read_byte(Segment::Ds, 0x0100), 0x34);
        assert_eq!(mem.read_byte(Segment::Ds, 0x0101), 0x12);
        assert_eq!(mem.read_word(Segment::Ds, 0x0100), 0x1234);
    }

    #[test]
    fn word_at_top_of_segment_wraps_high_byte() {
        for segment in Segment::ALL {
            let mut mem = SegmentedMemory::new();
            mem.write_word(segment, 0xFFFF, 0xABCD);
            assert_eq!(mem.read_byte(segment, 0xFFFF), 0xCD);
            assert_eq!(mem.read_byte(segment, 0x0000), 0xAB);
            assert_eq!(mem.read_word(segment, 0xFFFF), 0xABCD);
        }
    }

    #[test]
    fn wrapping_word_stays_inside_its_segment() {
        let mut mem = SegmentedMemory::new();
        mem.write_word(Segment::Es, 0xFFFF, 0xFFFF);
        assert!(mem.region(Segment::Ds).iter().all(|&b| b == 0));
        assert!(mem.region(Segment::Fs).iter().all(|&b| b == 0));
    }

    #[test]
    fn segments_are_independent() {
        let mut mem = SegmentedMemory::new();
        mem.write_byte(Segment::Ds, 0x10, 1);
        mem.write_byte(Segment::Es, 0x10, 2);
        mem.write_byte(Segment::Fs, 0x10, 3);
        assert_eq!(mem.read_byte(Segment::Ds, 0x10), 1);
        assert_eq!(mem.read_byte(Segment::Es, 0x10), 2);
        assert_eq!(mem.read_byte(Segment::Fs, 0x10), 3);
    }

    #[test]
    fn read_f32_reinterprets_bits() {
        let mut mem = SegmentedMemory::new();
        mem.load(Segment::Ds, 0x01F8, &0x3CC3_0029_u32.to_le_bytes());
        let v = mem.read_f32(Segment::Ds, 0x01F8);
        assert_eq!(v.to_bits(), 0x3CC3_0029);
        // The low word of the same dword doubles as an integer constant.
        assert_eq!(mem.read_word(Segment::Ds, 0x01F8), 41);
    }

    #[test]
    fn read_f32_wraps_per_byte() {
        let mut mem = SegmentedMemory::new();
        mem.load(Segment::Fs, 0xFFFE, &1.5_f32.to_le_bytes());
        assert_eq!(mem.read_byte(Segment::Fs, 0x0001), 1.5_f32.to_le_bytes()[3]);
        assert!((mem.read_f32(Segment::Fs, 0xFFFE) - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn fill_clears_one_segment() {
        let mut mem = SegmentedMemory::new();
        mem.fill(Segment::Es, 0x55);
        assert!(mem.region(Segment::Es).iter().all(|&b| b == 0x55));
        assert_eq!(mem.read_byte(Segment::Ds, 0), 0);
    }
}
