//! Compact text form, e.g. `CELL(UINT64(100), SCRIPT(...), NIL, BYTES(0xab01))`.

use super::Value;
use core::fmt;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Uint64(n) => write!(f, "UINT64({n})"),
            Value::Nil => f.write_str("NIL"),
            Value::Bool(b) => write!(f, "BOOL({b})"),
            Value::Bytes(bytes) => {
                f.write_str("BYTES(0x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str(")")
            }
            Value::Arg(i) => write!(f, "ARG({i})"),
            Value::Param(i) => write!(f, "PARAM({i})"),
            Value::Node(node) => {
                write!(f, "{}(", node.tag())?;
                for (i, child) in node.children().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}
