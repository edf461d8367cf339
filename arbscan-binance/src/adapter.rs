use arbscan_core::ArbscanError;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

#[cfg(feature = "test-adapters")]
use std::sync::Arc;

const CONNECTOR: &str = "arbscan-binance";

/// Default public REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// One raw kline request as sent to the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlinesRequest {
    /// Exchange-native symbol, e.g. `ETHUSDT`.
    pub symbol: String,
    /// Exchange interval identifier, e.g. `1m`.
    pub interval: &'static str,
    /// Inclusive start, ms since epoch.
    pub start_time: i64,
    /// Maximum number of rows to return.
    pub limit: usize,
}

/// Raw klines access. Rows are returned exactly as the exchange encodes them.
#[async_trait]
pub trait BinanceKlines: Send + Sync {
    /// Issue one klines request.
    async fn klines(&self, req: KlinesRequest) -> Result<Vec<Vec<Value>>, ArbscanError>;
}

/// Production adapter backed by `reqwest`.
#[derive(Clone)]
pub struct RealAdapter {
    client: reqwest::Client,
    base_url: Url,
}

impl RealAdapter {
    /// Adapter pointing at the public Binance endpoint.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, ArbscanError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("arbscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ArbscanError::connector(CONNECTOR, e.to_string()))?;
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| ArbscanError::InvalidArg(format!("base url: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Wrap an existing client and endpoint, e.g. a local mock server.
    #[must_use]
    pub const fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Same client, different endpoint.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base_url` does not parse.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ArbscanError> {
        self.base_url = Url::parse(base_url)
            .map_err(|e| ArbscanError::InvalidArg(format!("base url '{base_url}': {e}")))?;
        Ok(self)
    }

    fn klines_url(&self, req: &KlinesRequest) -> Result<Url, ArbscanError> {
        let mut url = self
            .base_url
            .join("/api/v3/klines")
            .map_err(|e| ArbscanError::InvalidArg(format!("klines url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("symbol", &req.symbol)
            .append_pair("interval", req.interval)
            .append_pair("startTime", &req.start_time.to_string())
            .append_pair("limit", &req.limit.to_string());
        Ok(url)
    }
}

fn map_status(status: reqwest::StatusCode, body: &str, context: &str) -> ArbscanError {
    // Error bodies look like {"code":-1121,"msg":"Invalid symbol."}.
    let msg = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("msg").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    match status.as_u16() {
        418 | 429 => ArbscanError::connector(CONNECTOR, format!("rate limit: {context}")),
        s if status.is_server_error() => {
            ArbscanError::connector(CONNECTOR, format!("server error {s}: {context}"))
        }
        s => ArbscanError::connector(CONNECTOR, format!("status {s}: {context}: {msg}")),
    }
}

#[async_trait]
impl BinanceKlines for RealAdapter {
    async fn klines(&self, req: KlinesRequest) -> Result<Vec<Vec<Value>>, ArbscanError> {
        let context = format!("klines {} {}", req.symbol, req.interval);
        let url = self.klines_url(&req)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArbscanError::connector(CONNECTOR, format!("{context}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(map_status(status, &body, &context));
        }
        resp.json::<Vec<Vec<Value>>>()
            .await
            .map_err(|e| ArbscanError::Data(format!("{context}: {e}")))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn BinanceKlines {
    /// Build a klines adapter from a closure. Handy for tests.
    pub fn from_fn<F>(f: F) -> Arc<dyn BinanceKlines>
    where
        F: Send + Sync + 'static + Fn(KlinesRequest) -> Result<Vec<Vec<Value>>, ArbscanError>,
    {
        struct FnKlines<F>(F);
        #[async_trait]
        impl<F> BinanceKlines for FnKlines<F>
        where
            F: Send + Sync + 'static + Fn(KlinesRequest) -> Result<Vec<Vec<Value>>, ArbscanError>,
        {
            async fn klines(&self, req: KlinesRequest) -> Result<Vec<Vec<Value>>, ArbscanError> {
                (self.0)(req)
            }
        }
        Arc::new(FnKlines(f))
    }
}
