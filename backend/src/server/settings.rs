//! Runtime settings loaded via OrthoConfig (CLI flags, `LOOKUP_*`
//! environment variables and configuration files).

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use lookup_proxy::domain::ConfigKey;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DIRECTORY_BASE_URL: &str = "http://www.lookup.cam.ac.uk/";
const DEFAULT_LOGIN_URL: &str = "https://raven.cam.ac.uk/auth/authenticate2.html";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Settings that could not be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid {name} `{value}`: {source}")]
    Url {
        name: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Service settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOOKUP")]
pub struct AppSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without one, records and configuration live in memory.
    pub database_url: Option<String>,
    /// Root of the directory web service.
    pub directory_base_url: Option<String>,
    /// Identity-provider login form endpoint.
    pub login_url: Option<String>,
    /// Timeout in seconds applied to every outbound request.
    #[ortho_config(default = 30)]
    pub upstream_timeout_secs: u64,
    /// Initial `apikey` for the in-memory configuration store.
    pub api_key: Option<String>,
    /// Initial `userid` for the in-memory configuration store.
    pub login_id: Option<String>,
    /// Initial `pwd` for the in-memory configuration store.
    pub login_password: Option<String>,
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        name,
        value: value.to_owned(),
        source,
    })
}

impl AppSettings {
    /// Listener address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Directory root, always ending in `/` so relative paths append to it.
    pub fn directory_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .directory_base_url
            .as_deref()
            .unwrap_or(DEFAULT_DIRECTORY_BASE_URL);
        let mut url = parse_url("directory base URL", value)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Identity-provider login endpoint.
    pub fn login_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "login URL",
            self.login_url.as_deref().unwrap_or(DEFAULT_LOGIN_URL),
        )
    }

    /// Outbound timeout; zero falls back to the default.
    pub fn upstream_timeout(&self) -> Duration {
        let secs = match self.upstream_timeout_secs {
            0 => DEFAULT_UPSTREAM_TIMEOUT_SECS,
            secs => secs,
        };
        Duration::from_secs(secs)
    }

    /// Non-empty configuration values provided at startup.
    pub fn config_seeds(&self) -> Vec<(ConfigKey, String)> {
        [
            (ConfigKey::ApiKey, &self.api_key),
            (ConfigKey::UserId, &self.login_id),
            (ConfigKey::Password, &self.login_password),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (key, v.to_owned()))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "LOOKUP_BIND_ADDR",
        "LOOKUP_DATABASE_URL",
        "LOOKUP_DIRECTORY_BASE_URL",
        "LOOKUP_LOGIN_URL",
        "LOOKUP_UPSTREAM_TIMEOUT_SECS",
        "LOOKUP_API_KEY",
        "LOOKUP_LOGIN_ID",
        "LOOKUP_LOGIN_PASSWORD",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("lookup-proxy")]).expect("settings load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("default parses")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(
            settings.directory_base_url().expect("url").as_str(),
            DEFAULT_DIRECTORY_BASE_URL
        );
        assert_eq!(settings.login_url().expect("url").as_str(), DEFAULT_LOGIN_URL);
        assert_eq!(settings.upstream_timeout_secs, DEFAULT_UPSTREAM_TIMEOUT_SECS);
        assert_eq!(settings.upstream_timeout(), Duration::from_secs(30));
        assert!(settings.config_seeds().is_empty());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("LOOKUP_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("LOOKUP_DATABASE_URL", Some("postgres://localhost/lookup".to_owned())),
            ("LOOKUP_DIRECTORY_BASE_URL", Some("http://directory.test/lookup".to_owned())),
            ("LOOKUP_LOGIN_URL", None),
            ("LOOKUP_UPSTREAM_TIMEOUT_SECS", Some("5".to_owned())),
            ("LOOKUP_API_KEY", Some("secret".to_owned())),
            ("LOOKUP_LOGIN_ID", Some("ab123".to_owned())),
            ("LOOKUP_LOGIN_PASSWORD", None),
        ]);

        let settings = load();
        assert_eq!(settings.bind_addr().expect("bind addr").port(), 9000);
        assert_eq!(settings.database_url(), Some("postgres://localhost/lookup"));
        assert_eq!(
            settings.directory_base_url().expect("url").as_str(),
            "http://directory.test/lookup/"
        );
        assert_eq!(settings.upstream_timeout(), Duration::from_secs(5));
        assert_eq!(
            settings.config_seeds(),
            vec![
                (ConfigKey::ApiKey, "secret".to_owned()),
                (ConfigKey::UserId, "ab123".to_owned()),
            ]
        );
    }

    #[rstest]
    #[case(AppSettings { bind_addr: Some("nowhere".to_owned()), ..AppSettings::default() })]
    fn malformed_bind_addr_is_reported(#[case] settings: AppSettings) {
        assert!(matches!(settings.bind_addr(), Err(SettingsError::BindAddr { .. })));
    }

    #[rstest]
    fn malformed_urls_are_reported() {
        let settings = AppSettings {
            login_url: Some("not a url".to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.login_url(),
            Err(SettingsError::Url { name: "login URL", .. })
        ));
    }

    #[rstest]
    fn zero_timeout_falls_back_to_default() {
        let settings = AppSettings {
            upstream_timeout_secs: 0,
            ..AppSettings::default()
        };
        assert_eq!(settings.upstream_timeout(), Duration::from_secs(30));
    }
}
