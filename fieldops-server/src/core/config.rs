use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory (database, price-tag PDFs, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | {WORK_DIR}/fieldops.db | SQLite database file |
/// | ENVIRONMENT | development | development, staging or production |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | unset | Enables daily rolling log files when set |
/// | TIMEZONE | Europe/Rome | Business timezone used to compute "today" |
/// | SWEEP_INTERVAL_SECS | 3600 | Period of the visit expiry sweeper |
/// | EMAIL_FUNCTION_URL | unset | Remote email function endpoint |
/// | EMAIL_FUNCTION_KEY | unset | Bearer key for the email function |
/// | EMAIL_FROM | noreply@fieldops.local | Sender address |
/// | PUBLIC_BASE_URL | http://localhost:{HTTP_PORT} | Base for download links |
/// | MAX_UPLOAD_BYTES | 10485760 | Maximum PDF upload size |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/fieldops HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database path
    pub database_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Business timezone
    pub timezone: Tz,
    /// Expiry sweeper period in seconds
    pub sweep_interval_secs: u64,
    pub email_function_url: Option<String>,
    pub email_function_key: Option<String>,
    pub email_from: String,
    /// Public base URL used to build absolute download links
    pub public_base_url: String,
    pub max_upload_bytes: usize,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let http_port = env_parse("HTTP_PORT", 3000u16);
        let database_path =
            env_opt("DATABASE_PATH").unwrap_or_else(|| format!("{work_dir}/fieldops.db"));

        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!("Unknown TIMEZONE '{}', falling back to Europe/Rome", name);
                chrono_tz::Europe::Rome
            }),
            Err(_) => chrono_tz::Europe::Rome,
        };

        Self {
            database_path,
            http_port,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            timezone,
            sweep_interval_secs: env_parse("SWEEP_INTERVAL_SECS", 3600u64).max(1),
            email_function_url: env_opt("EMAIL_FUNCTION_URL"),
            email_function_key: env_opt("EMAIL_FUNCTION_KEY"),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "noreply@fieldops.local".into()),
            public_base_url: env_opt("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{http_port}"))
                .trim_end_matches('/')
                .to_string(),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize),
            work_dir,
        }
    }

    /// Override the working directory and port, deriving the database path
    ///
    /// Used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.database_path = format!("{}/fieldops.db", config.work_dir);
        config.public_base_url = format!("http://localhost:{http_port}");
        config.email_function_url = None;
        config.email_function_key = None;
        config
    }

    /// Whether the remote email function is configured
    pub fn email_enabled(&self) -> bool {
        self.email_function_url.is_some()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides_derives_paths() {
        let config = Config::with_overrides("/tmp/fieldops-test", 4010);
        assert_eq!(config.work_dir, "/tmp/fieldops-test");
        assert_eq!(config.database_path, "/tmp/fieldops-test/fieldops.db");
        assert_eq!(config.public_base_url, "http://localhost:4010");
        assert!(!config.email_enabled());
        assert!(config.sweep_interval_secs >= 1);
    }
}
