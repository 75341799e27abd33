//! Pipeline configuration.
//!
//! A single [`Config`] is shared by every phase. The CLI builds one from its
//! flags; tests usually start from [`Config::default`] and adjust a field.

/// Default limit on nested interpreted calls before the run is aborted.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name used in positions and diagnostics.
    pub file_name: String,
    /// Reject calls whose argument count differs from the callee's parameter count.
    pub strict_arity: bool,
    /// Maximum number of function activation records on the call stack.
    pub max_call_depth: usize,
}

impl Config {
    pub fn new(file_name: impl Into<String>) -> Self {
        Config {
            file_name: file_name.into(),
            ..Config::default()
        }
    }

    pub fn with_strict_arity(mut self, strict_arity: bool) -> Self {
        self.strict_arity = strict_arity;
        self
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_name: String::from("shell"),
            strict_arity: false,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
