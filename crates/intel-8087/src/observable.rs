//! Observable implementation for the 8087 register stack.

use emu_core::{Observable, Value};

use crate::fpu::Fpu;

const I8087_QUERY_PATHS: &[&str] = &[
    "top", "st0", "st1", "st2", "st3", "st4", "st5", "st6", "st7", "stack",
];

impl Observable for Fpu {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "top" => Some(self.top().into()),
            "stack" => Some(Value::Array(
                (0..8).map(|i| Value::F64(self.st(i))).collect(),
            )),
            _ => {
                let i = path.strip_prefix("st")?.parse::<u8>().ok()?;
                (i < 8).then(|| Value::F64(self.st(i)))
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        I8087_QUERY_PATHS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn st_paths_follow_top() {
        let mut fpu = Fpu::new();
        fpu.push(1.5);
        fpu.push(2.5);
        assert_eq!(fpu.query("top"), Some(Value::U8(6)));
        assert_eq!(fpu.query("st0"), Some(Value::F64(2.5)));
        assert_eq!(fpu.query("st1"), Some(Value::F64(1.5)));
        assert_eq!(fpu.query("st8"), None);
        for path in fpu.query_paths() {
            assert!(fpu.query(path).is_some(), "{path}");
        }
    }
}
