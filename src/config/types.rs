use serde::Deserialize;

/// Main configuration structure for lexgrove
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP fetch configuration, supplied once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Output location configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory for per-jurisdiction code record logs
    #[serde(rename = "codes-dir", default = "default_codes_dir")]
    pub codes_dir: String,

    /// Directory for per-jurisdiction regulation record logs
    #[serde(rename = "regs-dir", default = "default_regs_dir")]
    pub regs_dir: String,

    /// Path of the shared failed-URL log
    #[serde(rename = "failure-log", default = "default_failure_log")]
    pub failure_log: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_codes_dir() -> String {
    "codes".to_string()
}

fn default_regs_dir() -> String {
    "regs".to_string()
}

fn default_failure_log() -> String {
    "failed_urls.txt".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            codes_dir: default_codes_dir(),
            regs_dir: default_regs_dir(),
            failure_log: default_failure_log(),
        }
    }
}
