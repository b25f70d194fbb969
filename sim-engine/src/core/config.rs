//! Engine configuration

/// Simulation configuration - all knobs for one generation run
///
/// # Environment variables
///
/// Every value can be overridden through the environment:
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | POS_API_URL | http://localhost:8080 | Platform API base URL |
/// | POS_MERCHANT_ID | SANDBOX | Sandbox merchant |
/// | POS_API_TOKEN | (none) | Bearer token |
/// | API_TIMEOUT_SECS | 30 | Request timeout |
/// | MERCHANT_TIMEZONE | America/New_York | Order timestamp timezone |
/// | FLAT_TAX_RATE | 82500 | Fallback tax rate, 1% = 10,000 units |
/// | REFUND_PERCENTAGE | 5 | Share of orders refunded after a batch |
/// | WEEKDAY_ORDERS_MIN/MAX | 40 / 80 | Daily order volume, Mon-Thu |
/// | FRIDAY_ORDERS_MIN/MAX | 70 / 110 | |
/// | SATURDAY_ORDERS_MIN/MAX | 90 / 150 | |
/// | SUNDAY_ORDERS_MIN/MAX | 60 / 100 | |
/// | SIM_RNG_SEED | (entropy) | Fixed seed for reproducible runs |
/// | AUDIT_LOG_PATH | sim-audit.jsonl | Local audit mirror, empty disables |
/// | SEED_DATA_DIR | (bundled) | Directory of seed catalog JSON |
/// | ECOMMERCE_API_URL | (none) | Card-processing API |
/// | ECOMMERCE_API_KEY | (none) | |
/// | LOG_LEVEL | info | |
/// | LOG_DIR | (stdout only) | Daily rolling file output |
#[derive(Debug, Clone)]
pub struct Config {
    /// Platform API base URL
    pub base_url: String,
    /// Sandbox merchant the run targets
    pub merchant_id: String,
    /// API bearer token
    pub api_token: Option<String>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// IANA timezone name for generated order timestamps
    pub timezone: String,
    /// Fallback tax rate when items carry no associations (1% = 10,000)
    pub flat_tax_rate: i64,
    /// Percentage of completed orders selected for refund
    pub refund_percentage: u32,
    /// Daily order volume ranges, keyed by day-of-week category
    pub weekday_orders: (u32, u32),
    pub friday_orders: (u32, u32),
    pub saturday_orders: (u32, u32),
    pub sunday_orders: (u32, u32),
    /// Fixed RNG seed; None seeds from entropy
    pub rng_seed: Option<u64>,
    /// Audit mirror path; None disables mirroring
    pub audit_path: Option<String>,
    /// Seed catalog directory; None uses the bundled data
    pub seed_data_dir: Option<String>,
    /// Card-processing API, enables ecommerce routing when both are set
    pub ecommerce_api_url: Option<String>,
    pub ecommerce_api_key: Option<String>,
    /// Log level filter
    pub log_level: String,
    /// Daily rolling log file directory
    pub log_dir: Option<String>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: env_or("POS_API_URL", "http://localhost:8080"),
            merchant_id: env_or("POS_MERCHANT_ID", "SANDBOX"),
            api_token: env_opt("POS_API_TOKEN"),
            timeout_secs: env_parse("API_TIMEOUT_SECS", 30),
            timezone: env_or("MERCHANT_TIMEZONE", "America/New_York"),
            flat_tax_rate: env_parse("FLAT_TAX_RATE", 82_500),
            refund_percentage: env_parse("REFUND_PERCENTAGE", 5),
            weekday_orders: (
                env_parse("WEEKDAY_ORDERS_MIN", 40),
                env_parse("WEEKDAY_ORDERS_MAX", 80),
            ),
            friday_orders: (
                env_parse("FRIDAY_ORDERS_MIN", 70),
                env_parse("FRIDAY_ORDERS_MAX", 110),
            ),
            saturday_orders: (
                env_parse("SATURDAY_ORDERS_MIN", 90),
                env_parse("SATURDAY_ORDERS_MAX", 150),
            ),
            sunday_orders: (
                env_parse("SUNDAY_ORDERS_MIN", 60),
                env_parse("SUNDAY_ORDERS_MAX", 100),
            ),
            rng_seed: env_opt("SIM_RNG_SEED").and_then(|v| v.parse().ok()),
            audit_path: Some(env_or("AUDIT_LOG_PATH", "sim-audit.jsonl")).filter(|v| !v.is_empty()),
            seed_data_dir: env_opt("SEED_DATA_DIR"),
            ecommerce_api_url: env_opt("ECOMMERCE_API_URL"),
            ecommerce_api_key: env_opt("ECOMMERCE_API_KEY"),
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: env_opt("LOG_DIR"),
        }
    }

    /// Resolve the merchant timezone, falling back to UTC when the name
    /// does not parse
    pub fn merchant_tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(
                timezone = %self.timezone,
                "unknown merchant timezone, falling back to UTC"
            );
            chrono_tz::UTC
        })
    }

    /// Client configuration for the platform API
    pub fn client_config(&self) -> pos_client::ClientConfig {
        let mut config = pos_client::ClientConfig::new(&self.base_url, &self.merchant_id)
            .with_timeout(self.timeout_secs);
        if let Some(token) = &self.api_token {
            config = config.with_token(token);
        }
        if let (Some(url), Some(key)) = (&self.ecommerce_api_url, &self.ecommerce_api_key) {
            config = config.with_ecommerce(url, key);
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            merchant_id: "SANDBOX".to_string(),
            api_token: None,
            timeout_secs: 30,
            timezone: "America/New_York".to_string(),
            flat_tax_rate: 82_500,
            refund_percentage: 5,
            weekday_orders: (40, 80),
            friday_orders: (70, 110),
            saturday_orders: (90, 150),
            sunday_orders: (60, 100),
            rng_seed: None,
            audit_path: None,
            seed_data_dir: None,
            ecommerce_api_url: None,
            ecommerce_api_key: None,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}
