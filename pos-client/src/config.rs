//! Client configuration

/// Configuration for connecting to the platform's sandbox API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g. "https://sandbox.dev.pos-platform.com")
    pub base_url: String,

    /// Merchant the simulation runs against
    pub merchant_id: String,

    /// API bearer token
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Card-processing (ecommerce) API base URL, when configured
    pub ecommerce_base_url: Option<String>,

    /// Card-processing API key
    pub ecommerce_api_key: Option<String>,
}

impl ClientConfig {
    /// Create a new configuration for a merchant
    pub fn new(base_url: impl Into<String>, merchant_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            merchant_id: merchant_id.into(),
            token: None,
            timeout: 30,
            ecommerce_base_url: None,
            ecommerce_api_key: None,
        }
    }

    /// Set the API bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Enable the card-processing integration
    pub fn with_ecommerce(
        mut self,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        self.ecommerce_base_url = Some(base_url.into());
        self.ecommerce_api_key = Some(api_key.into());
        self
    }

    /// Whether card payments can route through the ecommerce API
    pub fn ecommerce_configured(&self) -> bool {
        self.ecommerce_base_url.is_some() && self.ecommerce_api_key.is_some()
    }

    /// Create a platform client from this configuration
    pub fn build_client(&self) -> super::PlatformClient {
        super::PlatformClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080", "SANDBOX")
    }
}
