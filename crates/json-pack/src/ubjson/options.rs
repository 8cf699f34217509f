//! Decoder and encoder configuration.

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Entry limit for a single array or object applied when none is configured.
pub const DEFAULT_MAX_CONTAINER_LEN: usize = 1 << 22;

/// Options controlling [`UbjsonDecoder`](super::UbjsonDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Accept a scalar at top level. When off, the first byte must open an
    /// array or object.
    pub accept_any_top_level: bool,
    /// Stop after one complete value without checking for end of input.
    pub ignore_trailing_data: bool,
    /// Deepest container nesting accepted before failing.
    pub max_depth: usize,
    /// Most entries a single array or object may hold, counted or delimited.
    pub max_container_len: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            accept_any_top_level: false,
            ignore_trailing_data: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_container_len: DEFAULT_MAX_CONTAINER_LEN,
        }
    }
}

impl DecodeOptions {
    /// Defaults, but any value may appear at top level.
    pub fn any() -> Self {
        Self::default().with_accept_any_top_level(true)
    }

    pub fn with_accept_any_top_level(mut self, yes: bool) -> Self {
        self.accept_any_top_level = yes;
        self
    }

    pub fn with_ignore_trailing_data(mut self, yes: bool) -> Self {
        self.ignore_trailing_data = yes;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_container_len(mut self, max_container_len: usize) -> Self {
        self.max_container_len = max_container_len;
        self
    }
}

/// Options controlling [`UbjsonEncoder`](super::UbjsonEncoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Allow a scalar at top level. When off, only arrays and objects encode.
    pub accept_any_top_level: bool,
}

impl EncodeOptions {
    pub fn any() -> Self {
        Self::default().with_accept_any_top_level(true)
    }

    pub fn with_accept_any_top_level(mut self, yes: bool) -> Self {
        self.accept_any_top_level = yes;
        self
    }
}
