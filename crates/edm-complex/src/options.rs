/// Limits and switches for one [`ComplexParser`](crate::ComplexParser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting (default: 64). The root object is depth 1;
    /// each nested object or array adds one.
    pub max_depth: usize,

    /// Maximum length in characters of `Edm.String` values whose
    /// declaration sets no bound (default: 51200)
    pub default_string_max_length: usize,

    /// Reject an object that names the same property twice (default: true)
    pub reject_duplicate_properties: bool,
}

/// Default nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default bound for user data strings.
pub const DEFAULT_STRING_MAX_LENGTH: usize = 51_200;

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            default_string_max_length: DEFAULT_STRING_MAX_LENGTH,
            reject_duplicate_properties: true,
        }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the fallback string length bound.
    pub fn default_string_max_length(mut self, max: usize) -> Self {
        self.default_string_max_length = max;
        self
    }

    /// Accept repeated property names; the later value is kept alongside
    /// the earlier one, in input order.
    pub fn allow_duplicate_properties(mut self) -> Self {
        self.reject_duplicate_properties = false;
        self
    }
}
