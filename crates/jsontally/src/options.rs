//! Configuration for reading and merging documents

/// Options controlling how text is turned into a tracked tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Drop lines whose trimmed content starts with `//` before parsing
    pub strip_comments: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            strip_comments: true,
        }
    }
}

impl ReadOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text exactly as given, `//` lines included.
    pub fn strict() -> Self {
        Self {
            strip_comments: false,
        }
    }
}

/// Options controlling [`overwrite`](crate::overwrite).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Object field used to pair array elements of the base and overwrite
    /// documents. Without it, arrays are replaced wholesale.
    pub identity_key: Option<String>,
}

impl MergeOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile arrays of objects element-wise by `key`.
    pub fn with_identity_key(key: impl Into<String>) -> Self {
        Self {
            identity_key: Some(key.into()),
        }
    }

    /// The identity key, treating an empty key as absent.
    pub fn identity_key(&self) -> Option<&str> {
        self.identity_key.as_deref().filter(|key| !key.is_empty())
    }
}
