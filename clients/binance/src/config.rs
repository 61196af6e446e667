/// USDT-M futures testnet REST endpoint.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";
/// Default `recvWindow` in milliseconds for signed requests.
pub const DEFAULT_RECV_WINDOW: u64 = 5000;

/// Configuration for BinancePerpsClient
#[derive(Clone)]
pub struct BinancePerpsClientConfig {
    /// Binance API key
    pub api_key: String,
    /// Binance API secret
    pub api_secret: String,
    /// Base URL for API endpoints
    pub base_url: String,
    /// Validity window of signed requests, in milliseconds
    pub recv_window: u64,
}

impl BinancePerpsClientConfig {
    /// Config pointing at the futures testnet.
    pub fn testnet(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
            base_url: TESTNET_BASE_URL.to_string(),
            recv_window: DEFAULT_RECV_WINDOW,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for BinancePerpsClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinancePerpsClientConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("recv_window", &self.recv_window)
            .finish()
    }
}
