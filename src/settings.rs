use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StashgateSettings {
    pub application: ApplicationSettings,
    pub session: SessionSettings,
    pub cookies: CookieSettings,
    pub logging: LoggingSettings,
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionSettings {
    /// Secret key for signing session tokens. Loaded once at startup;
    /// an empty value is a fatal configuration error, never auto-generated.
    pub session_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieSettings {
    pub secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub access_token: String,
    pub client_id: String,
    pub contact_email: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: true, // Default to secure cookies; disable for non-TLS local development
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.pathofexile.com".to_string(),
            access_token: String::new(),
            client_id: "stashgate".to_string(),
            contact_email: String::new(),
        }
    }
}

impl StashgateSettings {
    /// Load settings from configuration files and environment variables,
    /// then initialize logging.
    ///
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Settings.toml in the current directory (if it exists)
    /// 3. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed, or if
    /// the session secret is left empty after all sources are applied.
    pub fn load() -> anyhow::Result<Self> {
        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);
        Self::initialize_logging(&settings.logging);
        settings.validate()?;
        Ok(settings)
    }

    /// Load base settings from Settings.toml or use defaults
    fn load_base_settings() -> anyhow::Result<Self> {
        let default_config_path = Path::new("Settings.toml");
        if default_config_path.exists() {
            let settings = Self::load_from_path(default_config_path)?;
            println!("✓ Loaded base settings from {}", default_config_path.display());
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse a settings file from an explicit path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let toml_content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        basic_toml::from_str(&toml_content)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_session_env_overrides(&mut settings.session);
        Self::apply_cookie_env_overrides(&mut settings.cookies);
        Self::apply_logging_env_overrides(&mut settings.logging);
        Self::apply_upstream_env_overrides(&mut settings.upstream);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
    }

    fn apply_session_env_overrides(session_settings: &mut SessionSettings) {
        if let Ok(secret) = std::env::var("SESSION_SECRET") {
            if !secret.is_empty() {
                session_settings.session_secret = secret;
            }
        }
    }

    fn apply_cookie_env_overrides(cookie_settings: &mut CookieSettings) {
        if let Ok(cookie_secure_str) = std::env::var("COOKIE_SECURE") {
            if let Ok(cookie_secure) = cookie_secure_str.parse::<bool>() {
                cookie_settings.secure = cookie_secure;
            }
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging_settings.level = level;
        }
    }

    fn apply_upstream_env_overrides(upstream_settings: &mut UpstreamSettings) {
        if let Ok(base_url) = std::env::var("UPSTREAM_BASE_URL") {
            upstream_settings.base_url = base_url;
        }
        if let Ok(access_token) = std::env::var("STASH_ACCESS_TOKEN") {
            upstream_settings.access_token = access_token;
        }
        if let Ok(client_id) = std::env::var("STASH_CLIENT_ID") {
            upstream_settings.client_id = client_id;
        }
        if let Ok(contact_email) = std::env::var("STASH_CONTACT_EMAIL") {
            upstream_settings.contact_email = contact_email;
        }
    }

    /// Reject configurations that cannot sign or verify credentials
    fn validate(&self) -> anyhow::Result<()> {
        if self.session.session_secret.is_empty() {
            anyhow::bail!(
                "session secret is not configured; set SESSION_SECRET or session.session_secret in Settings.toml"
            );
        }
        Ok(())
    }

    fn initialize_logging(logging_settings: &LoggingSettings) {
        // Tolerate double initialization so load() stays callable from tests
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&logging_settings.level),
        )
        .try_init();
    }

    /// Address the HTTP server binds to
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write as _;

    #[test]
    fn test_defaults() {
        let settings = StashgateSettings::default();
        assert_eq!(settings.get_bind_address(), "0.0.0.0:8080");
        assert!(settings.cookies.secure);
        assert!(settings.session.session_secret.is_empty());
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.upstream.base_url, "https://api.pathofexile.com");
    }

    #[test]
    fn test_empty_secret_fails_validation() {
        let settings = StashgateSettings::default();
        assert!(settings.validate().is_err());

        let configured = StashgateSettings {
            session: SessionSettings {
                session_secret: "a-real-secret".to_string(),
            },
            ..StashgateSettings::default()
        };
        assert!(configured.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[application]
host = "127.0.0.1"
port = 9090

[session]
session_secret = "from-toml"

[cookies]
secure = false

[logging]
level = "debug"

[upstream]
base_url = "https://stash.example.com"
access_token = "tok"
client_id = "myapp"
contact_email = "ops@example.com"
"#
        )
        .unwrap();

        let settings = StashgateSettings::load_from_path(file.path()).unwrap();
        assert_eq!(settings.get_bind_address(), "127.0.0.1:9090");
        assert_eq!(settings.session.session_secret, "from-toml");
        assert!(!settings.cookies.secure);
        assert_eq!(settings.upstream.base_url, "https://stash.example.com");
    }

    #[test]
    #[serial]
    fn test_env_override_priority() {
        std::env::set_var("SESSION_SECRET", "from-env");
        std::env::set_var("COOKIE_SECURE", "false");
        std::env::set_var("STASH_CLIENT_ID", "env-client");

        let mut settings = StashgateSettings::default();
        StashgateSettings::apply_env_overrides(&mut settings);

        assert_eq!(settings.session.session_secret, "from-env");
        assert!(!settings.cookies.secure);
        assert_eq!(settings.upstream.client_id, "env-client");

        std::env::remove_var("SESSION_SECRET");
        std::env::remove_var("COOKIE_SECURE");
        std::env::remove_var("STASH_CLIENT_ID");
    }

    #[test]
    #[serial]
    fn test_empty_env_secret_is_ignored() {
        std::env::set_var("SESSION_SECRET", "");

        let mut settings = StashgateSettings {
            session: SessionSettings {
                session_secret: "configured".to_string(),
            },
            ..StashgateSettings::default()
        };
        StashgateSettings::apply_env_overrides(&mut settings);

        assert_eq!(settings.session.session_secret, "configured");
        std::env::remove_var("SESSION_SECRET");
    }
}
