/// Where a built share fragment goes: the page address, and best-effort
/// the clipboard.
pub trait ShareSink {
    /// Replace the current address fragment in place (without `#`).
    fn replace_fragment(&mut self, fragment: &str);

    /// Drop any fragment from the current address.
    fn clear_fragment(&mut self);

    /// The full shareable address as it currently stands.
    fn address(&self) -> String;

    /// Copy the address to the clipboard if the host allows it.
    /// Failures are swallowed.
    fn copy_to_clipboard(&mut self, _address: &str) {}
}

/// In-memory sink for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Address without fragment, e.g. `/cake.html`.
    pub base: String,
    pub fragment: Option<String>,
    /// Every address handed to the clipboard, oldest first.
    pub copied: Vec<String>,
}

impl MemorySink {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }
}

impl ShareSink for MemorySink {
    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
    }

    fn clear_fragment(&mut self) {
        self.fragment = None;
    }

    fn address(&self) -> String {
        match &self.fragment {
            Some(f) => format!("{}#{f}", self.base),
            None => self.base.clone(),
        }
    }

    fn copy_to_clipboard(&mut self, address: &str) {
        self.copied.push(address.to_string());
    }
}
