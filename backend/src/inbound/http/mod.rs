//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub(crate) mod navigation;
pub mod payments;
pub mod profile;
pub mod registration;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;
pub use navigation::RedirectBody;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller mounts the scope and wraps it in session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::sign_in)
        .service(auth::sign_up)
        .service(auth::sign_in_with_provider)
        .service(auth::sign_out)
        .service(dashboard::get_dashboard)
        .service(profile::get_profile)
        .service(profile::update_profile)
        .service(payments::initiate_payment)
        .service(payments::payment_status)
        .service(registration::registration_access)
        .service(registration::submit_registration);
}
