use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use arbscan_core::{ArbscanConfig, ArbscanError, ExchangeConnector};

/// Orchestrator that fetches and compares candles across registered exchanges.
pub struct Arbscan {
    pub(crate) connectors: Vec<Arc<dyn ExchangeConnector>>,
    pub(crate) cfg: ArbscanConfig,
}

/// Builder for constructing an `Arbscan` orchestrator with custom configuration.
pub struct ArbscanBuilder {
    connectors: Vec<Arc<dyn ExchangeConnector>>,
    cfg: ArbscanConfig,
}

impl Default for ArbscanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbscanBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults: a one-day fetch window, no page cap and no extra delay on
    /// top of what each exchange advertises.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: ArbscanConfig::default(),
        }
    }

    /// Register an exchange connector under its `name()`.
    ///
    /// Registering two connectors with the same name is rejected by [`build`](Self::build).
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn ExchangeConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ArbscanConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Length of the window fetched per exchange, starting at the requested day.
    ///
    /// The record budget per exchange is this window divided by the timeframe step.
    #[must_use]
    pub const fn fetch_window(mut self, window: Duration) -> Self {
        self.cfg.fetch_window = window;
        self
    }

    /// Cap on the number of records requested per page.
    #[must_use]
    pub const fn page_limit(mut self, limit: usize) -> Self {
        self.cfg.page_limit = Some(limit);
        self
    }

    /// Floor for the delay before each request. The effective delay is the
    /// larger of this and the exchange's own rate-limit delay.
    #[must_use]
    pub const fn min_request_delay(mut self, delay: Duration) -> Self {
        self.cfg.min_request_delay = delay;
        self
    }

    /// Build the `Arbscan` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector is registered, two connectors share
    /// a name, the page limit is zero or the fetch window is empty.
    pub fn build(self) -> Result<Arbscan, ArbscanError> {
        if self.connectors.is_empty() {
            return Err(ArbscanError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        let mut seen: HashSet<&'static str> = HashSet::new();
        for c in &self.connectors {
            if !seen.insert(c.name()) {
                return Err(ArbscanError::InvalidArg(format!(
                    "duplicate connector name `{}`",
                    c.name()
                )));
            }
        }
        if self.cfg.page_limit == Some(0) {
            return Err(ArbscanError::InvalidArg("page limit must be positive".into()));
        }
        self.cfg.fetch_window_ms()?;

        Ok(Arbscan {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attribute a connector failure to `connector` unless it already names one
/// or is part of the shared taxonomy.
pub fn tag_err(connector: &str, e: ArbscanError) -> ArbscanError {
    match e {
        ArbscanError::InvalidArg(msg) | ArbscanError::Data(msg) => ArbscanError::Connector {
            connector: connector.to_string(),
            msg,
        },
        other => other,
    }
}

impl Arbscan {
    /// Start building a new `Arbscan` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let arbscan = arbscan::Arbscan::builder()
    ///     .with_connector(Arc::new(arbscan_binance::BinanceConnector::new_default()))
    ///     .with_connector(Arc::new(arbscan_mock::MockExchange::new("kraken")))
    ///     .min_request_delay(Duration::from_millis(100))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ArbscanBuilder {
        ArbscanBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ArbscanConfig {
        &self.cfg
    }

    /// Registered exchange identifiers in registration order.
    pub fn exchanges(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.connectors.iter().map(|c| c.name())
    }

    /// Resolve a registered connector by identifier.
    ///
    /// # Errors
    /// Returns `UnsupportedExchange` if no connector is registered under `id`.
    pub fn connector(&self, id: &str) -> Result<Arc<dyn ExchangeConnector>, ArbscanError> {
        self.connectors
            .iter()
            .find(|c| c.name() == id)
            .cloned()
            .ok_or_else(|| ArbscanError::unsupported_exchange(id, "not registered"))
    }
}
