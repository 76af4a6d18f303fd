use std::fmt;

/// Maximum number of bytes kept from a compile or link diagnostic.
pub const INFO_LOG_CAPACITY: usize = 512;

/// Diagnostic text produced by a compile or link step, capped at
/// [`INFO_LOG_CAPACITY`] bytes on a char boundary.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct InfoLog {
    text: String,
    truncated: bool,
}

impl InfoLog {
    pub fn bounded(text: impl Into<String>) -> Self {
        let mut text = text.into();
        let truncated = text.len() > INFO_LOG_CAPACITY;
        if truncated {
            let mut end = INFO_LOG_CAPACITY;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        Self { text, truncated }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `true` if text past the capacity was dropped.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for InfoLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
