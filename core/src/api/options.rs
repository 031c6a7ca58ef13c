//! Configuration options for evaluation.

/// Resource limits applied to one evaluation.
///
/// # Example
///
/// ```
/// use animagus_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     max_depth: 128,
///     max_iterations: Some(10_000),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Each level costs a few kilobytes of native stack in debug builds. The
    /// default fits a 2 MB thread stack (the size of spawned threads and test
    /// threads); raise it only for threads with a larger stack.
    ///
    /// Default: 256
    pub max_depth: usize,

    /// Maximum number of list elements a single REDUCE, MAP or FILTER may
    /// process (if Some).
    ///
    /// Set to `None` for no limit (be careful with untrusted hosts, since
    /// `QUERY_CELLS` results can be arbitrarily long).
    ///
    /// Default: None
    pub max_iterations: Option<usize>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_iterations: None,
        }
    }
}
