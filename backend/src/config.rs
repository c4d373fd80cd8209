//! Application settings loaded via OrthoConfig.
//!
//! Every value is optional. Unset adapters fall back to in-memory
//! implementations so a bare `cargo run` serves the whole flow.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::payment_service::DEFAULT_SCREENSHOT_PHONE;
use crate::domain::{DEFAULT_AMOUNT, DEFAULT_CONFIRMATION_PHONE, PaymentSettings, UpiPayee};
use crate::outbound::identity::IdentityServiceSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1/";
/// Read when `MATRIMONY_DATABASE_URL` is unset.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Invalid values in otherwise loadable settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid {field} URL {value:?}: {message}")]
    Url {
        field: &'static str,
        value: String,
        message: String,
    },
}

/// Process-wide settings, `MATRIMONY_*` in the environment.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MATRIMONY")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: Option<String>,
    /// PostgreSQL URL for profiles and payments.
    pub database_url: Option<String>,
    /// Identity service REST base URL.
    pub identity_url: Option<String>,
    /// Identity service API key. Without it sign-in uses in-process accounts.
    pub identity_api_key: Option<String>,
    /// Spreadsheet webhook receiving registrations.
    pub webhook_url: Option<String>,
    /// Give up on the webhook after this many seconds.
    pub webhook_timeout_secs: Option<u64>,
    pub upi_id: Option<String>,
    pub payee_name: Option<String>,
    pub payment_memo: Option<String>,
    /// Registration fee in rupees.
    #[ortho_config(default = DEFAULT_AMOUNT)]
    pub amount: Option<u32>,
    /// Number payment screenshots are sent to.
    pub screenshot_phone: Option<String>,
    /// Number shown on the registration confirmation.
    pub confirmation_phone: Option<String>,
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|err| SettingsError::Url {
        field,
        value: value.to_owned(),
        message: err.to_string(),
    })
}

impl AppSettings {
    /// Configured listen address, `0.0.0.0:8080` by default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Database URL, falling back to `DATABASE_URL`.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var(DATABASE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
    }

    /// Identity service settings, or `None` when no API key is configured.
    pub fn identity_service(&self) -> Result<Option<IdentityServiceSettings>, SettingsError> {
        let Some(key) = self.identity_api_key.as_deref().filter(|key| !key.is_empty()) else {
            return Ok(None);
        };
        let base = self.identity_url.as_deref().unwrap_or(DEFAULT_IDENTITY_URL);
        let base_url = parse_url("identity", base)?;
        Ok(Some(IdentityServiceSettings::new(base_url, key)))
    }

    /// Spreadsheet webhook endpoint, if configured.
    pub fn webhook_endpoint(&self) -> Result<Option<Url>, SettingsError> {
        self.webhook_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| parse_url("webhook", url))
            .transpose()
    }

    pub fn webhook_timeout(&self) -> Option<Duration> {
        self.webhook_timeout_secs.map(Duration::from_secs)
    }

    /// Payee, amount and screenshot number, each falling back to its default.
    pub fn payment_settings(&self) -> PaymentSettings {
        let defaults = UpiPayee::default();
        PaymentSettings {
            payee: UpiPayee {
                upi_id: self.upi_id.clone().unwrap_or(defaults.upi_id),
                name: self.payee_name.clone().unwrap_or(defaults.name),
                memo: self.payment_memo.clone().unwrap_or(defaults.memo),
            },
            amount: self.amount.unwrap_or(DEFAULT_AMOUNT),
            screenshot_phone: self
                .screenshot_phone
                .clone()
                .unwrap_or_else(|| DEFAULT_SCREENSHOT_PHONE.to_owned()),
        }
    }

    pub fn confirmation_phone(&self) -> &str {
        self.confirmation_phone
            .as_deref()
            .unwrap_or(DEFAULT_CONFIRMATION_PHONE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 13] = [
        "MATRIMONY_BIND_ADDR",
        "MATRIMONY_DATABASE_URL",
        "MATRIMONY_IDENTITY_URL",
        "MATRIMONY_IDENTITY_API_KEY",
        "MATRIMONY_WEBHOOK_URL",
        "MATRIMONY_WEBHOOK_TIMEOUT_SECS",
        "MATRIMONY_UPI_ID",
        "MATRIMONY_PAYEE_NAME",
        "MATRIMONY_PAYMENT_MEMO",
        "MATRIMONY_AMOUNT",
        "MATRIMONY_SCREENSHOT_PHONE",
        "MATRIMONY_CONFIRMATION_PHONE",
        DATABASE_URL_ENV,
    ];

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("matrimony")]).expect("config should load")
    }

    #[rstest]
    fn defaults_select_in_memory_adapters() {
        let _guard = lock_env(env_with(&[]));
        let settings = load();

        assert_eq!(settings.bind_addr.as_deref(), Some(DEFAULT_BIND_ADDR));
        assert_eq!(settings.amount, Some(DEFAULT_AMOUNT));
        assert_eq!(
            settings.bind_addr(),
            Ok("0.0.0.0:8080".parse().expect("addr"))
        );
        assert!(settings.database_url().is_none());
        assert!(settings.identity_service().expect("identity").is_none());
        assert!(settings.webhook_endpoint().expect("webhook").is_none());
        assert_eq!(settings.payment_settings(), PaymentSettings::default());
        assert_eq!(settings.confirmation_phone(), DEFAULT_CONFIRMATION_PHONE);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("MATRIMONY_BIND_ADDR", "127.0.0.1:9000"),
            ("MATRIMONY_IDENTITY_API_KEY", "api-key"),
            ("MATRIMONY_WEBHOOK_URL", "https://script.example.com/exec"),
            ("MATRIMONY_WEBHOOK_TIMEOUT_SECS", "20"),
            ("MATRIMONY_AMOUNT", "250"),
            ("MATRIMONY_UPI_ID", "office@upi"),
        ]));
        let settings = load();

        assert_eq!(settings.bind_addr().expect("addr").port(), 9000);
        assert!(settings.identity_service().expect("identity").is_some());
        assert_eq!(
            settings
                .webhook_endpoint()
                .expect("webhook")
                .map(|url| url.to_string()),
            Some("https://script.example.com/exec".to_owned())
        );
        assert_eq!(settings.webhook_timeout(), Some(Duration::from_secs(20)));
        let payment = settings.payment_settings();
        assert_eq!(payment.amount, 250);
        assert_eq!(payment.payee.upi_id, "office@upi");
        assert_eq!(payment.payee.name, UpiPayee::default().name);
    }

    #[rstest]
    fn plain_database_url_is_a_fallback() {
        let _guard = lock_env(env_with(&[(DATABASE_URL_ENV, "postgres://localhost/matrimony")]));
        assert_eq!(
            load().database_url().as_deref(),
            Some("postgres://localhost/matrimony")
        );
    }

    #[rstest]
    #[case(AppSettings { bind_addr: Some("nowhere".into()), ..AppSettings::default() })]
    fn malformed_bind_addr_is_reported(#[case] settings: AppSettings) {
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    fn malformed_webhook_url_names_the_field() {
        let settings = AppSettings {
            webhook_url: Some("not a url".into()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.webhook_endpoint(),
            Err(SettingsError::Url { field: "webhook", .. })
        ));
    }
}
