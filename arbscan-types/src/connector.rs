//! Connector metadata types usable across crates.

/// Typed key for identifying exchange connectors in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExchangeKey(pub &'static str);

impl ExchangeKey {
    /// Construct a new typed exchange key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<ExchangeKey> for &'static str {
    fn from(k: ExchangeKey) -> Self {
        k.0
    }
}
