//! Platform client

use crate::{ClientConfig, HttpClient};

/// Client for one sandbox merchant on the external platform
///
/// Implements every gateway trait from `shared`; clone freely, the inner
/// HTTP client is reference-counted.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    pub(crate) http: HttpClient,
    pub(crate) merchant_id: String,
    pub(crate) ecommerce_base_url: Option<String>,
    pub(crate) ecommerce_api_key: Option<String>,
}

impl PlatformClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
            merchant_id: config.merchant_id.clone(),
            ecommerce_base_url: config.ecommerce_base_url.clone(),
            ecommerce_api_key: config.ecommerce_api_key.clone(),
        }
    }

    /// Whether card payments can route through the ecommerce API
    pub fn ecommerce_configured(&self) -> bool {
        self.ecommerce_base_url.is_some() && self.ecommerce_api_key.is_some()
    }

    /// Merchant-scoped API path
    pub(crate) fn path(&self, suffix: &str) -> String {
        format!(
            "v3/merchants/{}/{}",
            self.merchant_id,
            suffix.trim_start_matches('/')
        )
    }
}
