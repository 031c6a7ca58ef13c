use super::Value;
use crate::{String, Vec};
use serde::{Deserialize, Serialize};

/// A named expression submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub name: String,
    pub result: Value,
}

/// The unit a host receives: an ordered list of calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    pub calls: Vec<Call>,
}

impl Call {
    pub fn new(name: impl Into<String>, result: Value) -> Call {
        Call {
            name: name.into(),
            result,
        }
    }
}

impl Root {
    pub fn call(&self, name: &str) -> Option<&Call> {
        self.calls.iter().find(|call| call.name == name)
    }
}

impl FromIterator<Call> for Root {
    fn from_iter<I: IntoIterator<Item = Call>>(iter: I) -> Root {
        Root {
            calls: iter.into_iter().collect(),
        }
    }
}
