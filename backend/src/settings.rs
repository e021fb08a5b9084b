//! Application settings loaded via OrthoConfig.
//!
//! Values layer CLI arguments over `USER_REGISTRY_*` environment variables
//! over an optional configuration file. `port` carries a loader default so
//! the merged configuration is never empty; the remaining fields are
//! optional and their accessors supply the defaults.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_ACCOUNT_USERNAME: &str = "user";
const DEFAULT_ACCOUNT_PASSWORD: &str = "pass";

/// Listener and static account configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Login name of the single account.
    pub account_username: Option<String>,
    /// Password of the single account.
    pub account_password: Option<String>,
}

impl AppSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Socket address built from [`Self::host`] and `port`.
    ///
    /// # Errors
    /// Returns the parse error when the host is not an IP address literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host(), self.port).parse()
    }

    pub fn account_username(&self) -> &str {
        self.account_username
            .as_deref()
            .unwrap_or(DEFAULT_ACCOUNT_USERNAME)
    }

    /// Account password, copied into a buffer that is wiped on drop.
    pub fn account_password(&self) -> Zeroizing<String> {
        Zeroizing::new(
            self.account_password
                .as_deref()
                .unwrap_or(DEFAULT_ACCOUNT_PASSWORD)
                .to_owned(),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings layering and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "USER_REGISTRY_HOST",
        "USER_REGISTRY_PORT",
        "USER_REGISTRY_ACCOUNT_USERNAME",
        "USER_REGISTRY_ACCOUNT_PASSWORD",
    ];

    fn load(args: &[&str]) -> AppSettings {
        let argv = std::iter::once(OsString::from("user-registry"))
            .chain(args.iter().map(OsString::from));
        AppSettings::load_from_iter(argv).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load(&[]);
        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.account_username(), "user");
        assert_eq!(settings.account_password().as_str(), "pass");
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse().expect("literal")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_REGISTRY_HOST", Some("127.0.0.1".to_owned())),
            ("USER_REGISTRY_PORT", Some("9090".to_owned())),
            ("USER_REGISTRY_ACCOUNT_USERNAME", Some("ada".to_owned())),
            ("USER_REGISTRY_ACCOUNT_PASSWORD", Some("lovelace".to_owned())),
        ]);

        let settings = load(&[]);
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.account_username(), "ada");
        assert_eq!(settings.account_password().as_str(), "lovelace");
    }

    #[rstest]
    fn cli_arguments_override_environment() {
        let _guard = lock_env([
            ("USER_REGISTRY_HOST", None::<String>),
            ("USER_REGISTRY_PORT", Some("9090".to_owned())),
            ("USER_REGISTRY_ACCOUNT_USERNAME", None::<String>),
            ("USER_REGISTRY_ACCOUNT_PASSWORD", None::<String>),
        ]);

        let settings = load(&["--port", "7070"]);
        assert_eq!(settings.port, 7070);
    }

    #[rstest]
    fn hostnames_are_not_bind_addresses() {
        let _guard = lock_env([
            ("USER_REGISTRY_HOST", Some("localhost".to_owned())),
            ("USER_REGISTRY_PORT", None::<String>),
            ("USER_REGISTRY_ACCOUNT_USERNAME", None::<String>),
            ("USER_REGISTRY_ACCOUNT_PASSWORD", None::<String>),
        ]);

        assert!(load(&[]).bind_addr().is_err());
    }
}
