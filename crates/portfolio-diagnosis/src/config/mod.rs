use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::quiz::notification::{AdminFormat, BreakdownKind, TransportDiagnostics};

const DEFAULT_SMTP_HOST: &str = "email-smtp.ap-northeast-1.amazonaws.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            mail: MailConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Whether result e-mails leave the process or are only written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailDelivery {
    Smtp,
    Log,
}

impl MailDelivery {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "smtp" => Some(Self::Smtp),
            "log" | "dry-run" | "dry_run" => Some(Self::Log),
            _ => None,
        }
    }
}

/// SMTP relay settings plus the admin notification shape.
#[derive(Clone)]
pub struct MailConfig {
    pub delivery: MailDelivery,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub admin_format: AdminFormat,
    pub admin_breakdown: BreakdownKind,
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let delivery = match env::var("MAIL_DELIVERY") {
            Ok(raw) => MailDelivery::parse(&raw).ok_or(ConfigError::InvalidSetting {
                key: "MAIL_DELIVERY",
                value: raw,
            })?,
            Err(_) => MailDelivery::Smtp,
        };

        let smtp_host = non_empty_var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = match non_empty_var("SMTP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidSmtpPort)?,
            None => DEFAULT_SMTP_PORT,
        };

        let admin_format = match env::var("ADMIN_EMAIL_FORMAT") {
            Ok(raw) => AdminFormat::parse(&raw).ok_or(ConfigError::InvalidSetting {
                key: "ADMIN_EMAIL_FORMAT",
                value: raw,
            })?,
            Err(_) => AdminFormat::Text,
        };

        let admin_breakdown = match env::var("ADMIN_EMAIL_BREAKDOWN") {
            Ok(raw) => BreakdownKind::parse(&raw).ok_or(ConfigError::InvalidSetting {
                key: "ADMIN_EMAIL_BREAKDOWN",
                value: raw,
            })?,
            Err(_) => BreakdownKind::Amounts,
        };

        Ok(Self {
            delivery,
            smtp_host,
            smtp_port,
            smtp_user: non_empty_var("SMTP_USER"),
            smtp_pass: non_empty_var("SMTP_PASS"),
            admin_format,
            admin_breakdown,
        })
    }

    /// Connection facts that are safe to echo back in failure responses.
    pub fn diagnostics(&self) -> TransportDiagnostics {
        TransportDiagnostics {
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
            smtp_user_configured: self.smtp_user.is_some(),
        }
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("delivery", &self.delivery)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user.as_ref().map(|_| "<set>"))
            .field("smtp_pass", &self.smtp_pass.as_ref().map(|_| "<redacted>"))
            .field("admin_format", &self.admin_format)
            .field("admin_breakdown", &self.admin_breakdown)
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSmtpPort,
    InvalidSetting { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSmtpPort => write!(f, "SMTP_PORT must be a valid u16"),
            ConfigError::InvalidSetting { key, value } => {
                write!(f, "{key} has unsupported value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSmtpPort
            | ConfigError::InvalidSetting { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "MAIL_DELIVERY",
            "SMTP_HOST",
            "SMTP_PORT",
            "SMTP_USER",
            "SMTP_PASS",
            "ADMIN_EMAIL_FORMAT",
            "ADMIN_EMAIL_BREAKDOWN",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.mail.delivery, MailDelivery::Smtp);
        assert_eq!(config.mail.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.mail.admin_format, AdminFormat::Text);
        assert_eq!(config.mail.admin_breakdown, BreakdownKind::Amounts);
        assert!(!config.mail.diagnostics().smtp_user_configured);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_mail_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MAIL_DELIVERY", "log");
        env::set_var("SMTP_PORT", "2525");
        env::set_var("SMTP_USER", "mailer");
        env::set_var("ADMIN_EMAIL_FORMAT", "html");
        env::set_var("ADMIN_EMAIL_BREAKDOWN", "percentages");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.mail.delivery, MailDelivery::Log);
        assert_eq!(config.mail.smtp_port, 2525);
        assert_eq!(config.mail.admin_format, AdminFormat::Html);
        assert_eq!(config.mail.admin_breakdown, BreakdownKind::Percentages);
        assert!(config.mail.diagnostics().smtp_user_configured);
    }

    #[test]
    fn rejects_unknown_delivery_mode() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MAIL_DELIVERY", "pigeon");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting {
                key: "MAIL_DELIVERY",
                ..
            })
        ));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SMTP_PASS", "hunter2");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        let rendered = format!("{:?}", config.mail);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
