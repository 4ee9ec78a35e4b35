use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding company records (default: "Company")
    pub company_table: String,
    /// AWS region (default: "ap-southeast-2")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub aws_region: String,
    /// Custom DynamoDB endpoint, e.g. a local DynamoDB (default: none)
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub aws_endpoint_url: Option<String>,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMPANY_TABLE` - DynamoDB table name (default: "Company")
    /// - `AWS_REGION` - AWS region (default: "ap-southeast-2")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: unset)
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            company_table: env::var("COMPANY_TABLE").unwrap_or_else(|_| "Company".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
