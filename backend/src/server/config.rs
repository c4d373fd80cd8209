//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use matrimony::domain::{DEFAULT_CONFIRMATION_PHONE, PaymentSettings};
use matrimony::inbound::http::session_config::SessionSettings;
use matrimony::outbound::identity::IdentityServiceSettings;
use matrimony::outbound::persistence::DbPool;
use url::Url;

/// Spreadsheet webhook target.
#[derive(Debug, Clone)]
pub struct WebhookTarget {
    pub endpoint: Url,
    pub timeout: Option<Duration>,
}

/// Builder-style configuration for creating the HTTP server.
///
/// Each optional adapter left unset is replaced by its in-memory variant.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity: Option<IdentityServiceSettings>,
    pub(crate) webhook: Option<WebhookTarget>,
    pub(crate) payment: PaymentSettings,
    pub(crate) confirmation_phone: String,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            identity: None,
            webhook: None,
            payment: PaymentSettings::default(),
            confirmation_phone: DEFAULT_CONFIRMATION_PHONE.to_owned(),
        }
    }

    /// Store profiles and payments in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Authenticate against the remote identity service.
    #[must_use]
    pub fn with_identity_service(mut self, settings: IdentityServiceSettings) -> Self {
        self.identity = Some(settings);
        self
    }

    /// Relay registrations to a spreadsheet webhook.
    #[must_use]
    pub fn with_webhook(mut self, webhook: WebhookTarget) -> Self {
        self.webhook = Some(webhook);
        self
    }

    #[must_use]
    pub fn with_payment_settings(mut self, payment: PaymentSettings) -> Self {
        self.payment = payment;
        self
    }

    #[must_use]
    pub fn with_confirmation_phone(mut self, phone: impl Into<String>) -> Self {
        self.confirmation_phone = phone.into();
        self
    }
}
