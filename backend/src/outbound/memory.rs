//! In-process adapters used when no database or identity service is
//! configured, and by integration tests.
//!
//! State lives in `DashMap`s and is lost on restart.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, PaymentRepository, PaymentRepositoryError,
    ProfileRepository, ProfileRepositoryError, SubmissionSink, SubmissionSinkError,
};
use crate::domain::{
    DisplayName, Email, Identity, LoginCredentials, PaymentRecord, PaymentStatus, ProfileRecord,
    ProfileWrite, ProviderToken, SignUpDetails, SubmissionEnvelope, UserId,
};
use tracing::info;

/// Profile documents keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    records: DashMap<UserId, ProfileRecord>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileRepositoryError> {
        Ok(self.records.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn merge(&self, write: &ProfileWrite) -> Result<ProfileRecord, ProfileRepositoryError> {
        let merged = match self.records.entry(write.user_id.clone()) {
            Entry::Occupied(mut slot) => {
                let merged = write.apply(Some(slot.get().clone()));
                slot.insert(merged.clone());
                merged
            }
            Entry::Vacant(slot) => slot.insert(write.apply(None)).value().clone(),
        };
        Ok(merged)
    }
}

/// Payment records keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    records: DashMap<UserId, PaymentRecord>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<PaymentRecord>, PaymentRepositoryError> {
        Ok(self.records.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, record: &PaymentRecord) -> Result<(), PaymentRepositoryError> {
        self.records.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        user_id: &UserId,
        status: &PaymentStatus,
    ) -> Result<Option<PaymentRecord>, PaymentRepositoryError> {
        Ok(self.records.get_mut(user_id).map(|mut entry| {
            entry.status = status.clone();
            entry.value().clone()
        }))
    }
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password_digest: [u8; 32],
}

fn digest_password(user_id: &UserId, password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_ref().as_bytes());
    hasher.update([0]);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Password accounts held in memory. Social sign-in is unavailable.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: DashMap<Email, Account>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(
        &self,
        email: &Email,
        display_name: Option<DisplayName>,
        password: &str,
    ) -> Result<Identity, IdentityProviderError> {
        let user_id = UserId::new(Uuid::new_v4().simple().to_string())
            .map_err(|err| IdentityProviderError::rejected(err.to_string()))?;
        let identity = Identity::new(user_id, email.clone()).with_display_name(display_name);
        let account = Account {
            password_digest: digest_password(&identity.id, password),
            identity: identity.clone(),
        };
        match self.accounts.entry(email.clone()) {
            Entry::Occupied(_) => Err(IdentityProviderError::email_in_use()),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(identity)
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Identity, IdentityProviderError> {
        let account = self
            .accounts
            .get(credentials.email())
            .ok_or_else(IdentityProviderError::invalid_credentials)?;
        let candidate = digest_password(&account.identity.id, credentials.password());
        if candidate == account.password_digest {
            Ok(account.identity.clone())
        } else {
            Err(IdentityProviderError::invalid_credentials())
        }
    }

    async fn sign_up(&self, details: &SignUpDetails) -> Result<Identity, IdentityProviderError> {
        let display_name = DisplayName::new(details.full_name()).ok();
        let credentials = details.credentials();
        self.register(credentials.email(), display_name, credentials.password())
    }

    async fn sign_in_with_provider(
        &self,
        token: &ProviderToken,
    ) -> Result<Identity, IdentityProviderError> {
        Err(IdentityProviderError::unavailable(format!(
            "{} sign-in requires a configured identity service",
            token.provider().provider_id()
        )))
    }
}

/// Keeps delivered envelopes instead of posting them anywhere.
#[derive(Debug, Default)]
pub struct InMemorySubmissionSink {
    delivered: Mutex<Vec<SubmissionEnvelope>>,
}

impl InMemorySubmissionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelopes received so far, oldest first.
    pub fn delivered(&self) -> Vec<SubmissionEnvelope> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SubmissionSink for InMemorySubmissionSink {
    async fn deliver(&self, envelope: &SubmissionEnvelope) -> Result<(), SubmissionSinkError> {
        info!(
            timestamp = %envelope.data.timestamp,
            "no webhook configured; registration kept in memory"
        );
        let mut guard = self
            .delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.push(envelope.clone());
        Ok(())
    }
}
