//! Account handlers: registration, login, logout.
//!
//! ```text
//! POST /registration  email=...&password=...
//! POST /login         email=...&password=...
//! GET  /logout
//! ```
//!
//! Soft failures (duplicate email, bad credentials) flash a message and
//! redirect, matching the page flow; malformed input gets a structured 400.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::ports::RepoError;
use crate::domain::{CredentialValidationError, Email, Error, PasswordHash};

use super::error::ApiResult;
use super::see_other;
use super::session::SessionContext;
use super::state::HttpState;

/// Form body shared by registration and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

fn map_validation_error(err: CredentialValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Process registration when the user provides an email and password.
///
/// The store's unique index decides whether the account exists; there is no
/// look-up first, so two simultaneous registrations cannot both succeed.
#[post("/registration")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let email = Email::new(&form.email).map_err(map_validation_error)?;
    let password_hash = PasswordHash::derive(&form.password).map_err(map_validation_error)?;

    match state.users.create(&email, &password_hash).await {
        Ok(user) => {
            // Log the new user in immediately.
            session.persist_user(user.id)?;
            session.flash("Your account has been created.")?;
            tracing::info!(user_id = %user.id, "account created");
            Ok(see_other("/"))
        }
        Err(RepoError::Duplicate(_)) => {
            session.flash("An account has already been created for this email.")?;
            Ok(see_other("/login"))
        }
        Err(other) => Err(other.into()),
    }
}

/// Process login, redirecting to the homepage on success.
///
/// Unknown email and wrong password produce the same generic message so the
/// response does not reveal which addresses have accounts.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let email = Email::new(&form.email).map_err(map_validation_error)?;
    if form.password.is_empty() {
        return Err(map_validation_error(CredentialValidationError::EmptyPassword));
    }

    let user = state.users.find_by_email(&email).await?;
    match user {
        Some(user) if user.password_hash.verify(&form.password) => {
            session.persist_user(user.id)?;
            session.flash("You are logged in!")?;
            tracing::info!(user_id = %user.id, "login succeeded");
            Ok(see_other("/"))
        }
        _ => {
            session.flash("Verify email and password entered is correct.")?;
            Ok(see_other("/login"))
        }
    }
}

/// Remove the user id from the session.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear_user();
    session.flash("Logged out.")?;
    Ok(see_other("/"))
}
