//! Evaluation errors.
//!
//! Every failure is a value returned up the call chain. The first error wins:
//! children are evaluated depth first, left to right, and evaluation stops at
//! the first failure.
//!
//! # Error Categories
//!
//! - **Shape errors** (`Arity`, `Type`): a node or operand does not match the
//!   contract of its tag. Reported before any field is projected.
//! - **Lookup errors**: an ARG or PARAM index has no bound value.
//! - **Unsupported nodes**: a tag has no evaluation rule in the position it
//!   was found in.
//! - **Host errors**: returned by `index_param` or `query_cell`, passed through
//!   unchanged so the caller can downcast to the host's own type. A host
//!   returning a bare [`ResourceExceeded`] is reported as a resource error.
//! - **Resource exceeded**: depth or iteration limits configured through
//!   [`ExecutionOptions`](crate::api::ExecutionOptions).

use crate::{ast::ValueType, environment::HostError};
use core::fmt;

/// Runtime evaluation error.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("{tag} expects {expected} operand(s), got {found}")]
    Arity {
        tag: ValueType,
        expected: Arity,
        found: usize,
    },

    #[error("{tag} expects {expected}, got {found}")]
    Type {
        tag: ValueType,
        expected: ValueType,
        found: ValueType,
    },

    #[error("cannot find {kind} index {index}")]
    Lookup { kind: BindingKind, index: u64 },

    #[error("{tag} cannot be evaluated as a {position}")]
    UnsupportedNode { tag: ValueType, position: Position },

    #[error("{tag}: index {index} out of range for length {len}")]
    OutOfRange { tag: ValueType, index: u64, len: usize },

    #[error(transparent)]
    Host(HostError),

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceeded),
}

/// Resource limit violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceExceeded {
    #[error("evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },

    #[error("{tag} processed more than {max_iterations} elements")]
    IterationLimit {
        tag: ValueType,
        max_iterations: usize,
    },
}

/// Expected operand count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Arg,
    Param,
}

/// Where a node was evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Value,
    List,
}

/// Coarse error classification for hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ArityError,
    TypeError,
    LookupError,
    UnsupportedNodeError,
    OutOfRangeError,
    DelegatedError,
    ResourceExceeded,
}

impl ExecutionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecutionError::Arity { .. } => ErrorKind::ArityError,
            ExecutionError::Type { .. } => ErrorKind::TypeError,
            ExecutionError::Lookup { .. } => ErrorKind::LookupError,
            ExecutionError::UnsupportedNode { .. } => ErrorKind::UnsupportedNodeError,
            ExecutionError::OutOfRange { .. } => ErrorKind::OutOfRangeError,
            ExecutionError::Host(_) => ErrorKind::DelegatedError,
            ExecutionError::ResourceExceeded(_) => ErrorKind::ResourceExceeded,
        }
    }

    /// The host error, if this error was delegated.
    pub fn host_error(&self) -> Option<&(dyn core::error::Error + Send + Sync + 'static)> {
        match self {
            ExecutionError::Host(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Wrap an error returned by the host.
    ///
    /// A host that evaluates expressions itself may run out of its own budget;
    /// it reports that as a bare [`ResourceExceeded`], which is kept as a
    /// resource error instead of a delegated one.
    pub(crate) fn from_host(err: HostError) -> Self {
        match err.downcast_ref::<ResourceExceeded>() {
            Some(limit) => ExecutionError::ResourceExceeded(limit.clone()),
            None => ExecutionError::Host(err),
        }
    }

    pub(crate) fn exactly(tag: ValueType, expected: usize, found: usize) -> Self {
        ExecutionError::Arity {
            tag,
            expected: Arity::Exactly(expected),
            found,
        }
    }

    pub(crate) fn at_least(tag: ValueType, expected: usize, found: usize) -> Self {
        ExecutionError::Arity {
            tag,
            expected: Arity::AtLeast(expected),
            found,
        }
    }

    pub(crate) fn type_mismatch(tag: ValueType, expected: ValueType, found: ValueType) -> Self {
        ExecutionError::Type {
            tag,
            expected,
            found,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Arg => f.write_str("arg"),
            BindingKind::Param => f.write_str("param"),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Value => f.write_str("value"),
            Position::List => f.write_str("list"),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ArityError => "ArityError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::LookupError => "LookupError",
            ErrorKind::UnsupportedNodeError => "UnsupportedNodeError",
            ErrorKind::OutOfRangeError => "OutOfRangeError",
            ErrorKind::DelegatedError => "DelegatedError",
            ErrorKind::ResourceExceeded => "ResourceExceeded",
        };
        f.write_str(name)
    }
}
