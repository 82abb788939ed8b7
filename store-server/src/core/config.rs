use rust_decimal::Decimal;
use std::str::FromStr;

/// Server configuration
///
/// # Environment variables
///
/// Every item can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 8080 | HTTP API port |
/// | PAGE_SIZE | 12 | Default listing page size |
/// | REFRESH_INTERVAL_SECS | 30 | Dashboard refresh interval |
/// | GATEWAY_DELAY_MS | 800 | Simulated gateway latency |
/// | GATEWAY_TIMEOUT_MS | 5000 | Gateway authorization deadline |
/// | TAX_PERCENT | 8 | Sales tax percentage on the subtotal |
/// | SHIPPING_FLAT | 5.99 | Flat shipping charge |
/// | ENVIRONMENT | development | development \| staging \| production |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=9000 TAX_PERCENT=21 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Default page size for listing endpoints
    pub page_size: u32,
    /// Dashboard refresh interval (seconds)
    pub refresh_interval_secs: u64,
    /// Simulated payment gateway latency (milliseconds)
    pub gateway_delay_ms: u64,
    /// Deadline for a gateway authorization (milliseconds)
    pub gateway_timeout_ms: u64,
    /// Sales tax percentage applied to the cart subtotal
    pub tax_percent: Decimal,
    /// Flat shipping charge per order
    pub shipping_flat: Decimal,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            http_port: env_parse("HTTP_PORT", 8080),
            page_size: env_parse("PAGE_SIZE", 12),
            refresh_interval_secs: env_parse("REFRESH_INTERVAL_SECS", 30),
            gateway_delay_ms: env_parse("GATEWAY_DELAY_MS", 800),
            gateway_timeout_ms: env_parse("GATEWAY_TIMEOUT_MS", 5000),
            tax_percent: env_decimal("TAX_PERCENT", "8"),
            shipping_flat: env_decimal("SHIPPING_FLAT", "5.99"),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_decimal(key: &str, default: &str) -> Decimal {
    let fallback = Decimal::from_str(default).unwrap_or(Decimal::ZERO);
    std::env::var(key)
        .ok()
        .and_then(|v| Decimal::from_str(&v).ok())
        .unwrap_or(fallback)
}
