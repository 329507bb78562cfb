//! Observable implementation for the 8086 core.

use emu_core::{Observable, Value};

use crate::cpu::Cpu8086;
use crate::registers::Reg;

/// Query paths supported by the 8086.
const I8086_QUERY_PATHS: &[&str] = &[
    "ax", "bx", "cx", "dx", "si", "di", "bp", "sp",
    "al", "ah", "bl", "bh", "cl", "ch", "dl", "dh",
    "flags",
    "flags.c", "flags.z", "flags.s", "flags.o",
];

impl Observable for Cpu8086 {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(reg) = Reg::ALL.iter().find(|r| r.name() == path) {
            let value = self.get(*reg);
            return Some(if reg.is_byte() {
                Value::U8(value as u8)
            } else {
                Value::U16(value)
            });
        }
        match path {
            "flags" => Some(Value::U16(self.flags.0)),
            "flags.c" => Some(self.flags.carry().into()),
            "flags.z" => Some(self.flags.zero().into()),
            "flags.s" => Some(self.flags.sign().into()),
            "flags.o" => Some(self.flags.overflow().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        I8086_QUERY_PATHS
    }
}
