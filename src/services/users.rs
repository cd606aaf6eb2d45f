use serde::{Deserialize, Serialize};

use crate::database::ErrorExt2;
use crate::http::Error;
use crate::util::validation;
use crate::{crypto, schema, types, App};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// What the service hands back about a user. The password hash stays
/// behind this boundary; no response ever carries it.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

impl From<schema::User> for UserProfile {
    fn from(user: schema::User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

/// A registration form that passed validation, with the email already
/// normalized.
#[derive(Debug, PartialEq, Eq)]
struct NewUser {
    full_name: String,
    email: String,
    password: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn validate_register(form: &RegisterForm) -> Result<NewUser, Error> {
    let (Some(full_name), Some(email), Some(password)) = (
        non_blank(form.full_name.as_deref()),
        non_blank(form.email.as_deref()),
        form.password.as_deref().filter(|v| !v.is_empty()),
    ) else {
        return Err(Error::validation("All fields are required."));
    };

    let email = email.to_lowercase();
    if !validation::is_valid_email(&email) {
        return Err(Error::validation("Invalid email format."));
    }

    if !validation::is_valid_password(password) {
        return Err(Error::validation(
            "Password must be at least 8 characters long and \
             contain at least one letter and one number.",
        ));
    }

    Ok(NewUser {
        full_name: full_name.to_string(),
        email,
        password: password.to_string(),
    })
}

/// Registers a new user: validate, hash, insert. Duplicate emails are
/// caught by the unique index on `users.email` rather than a
/// check-then-insert lookup, so concurrent registrations for the same
/// address cannot race past each other.
#[tracing::instrument(skip_all)]
pub async fn register(app: &App, form: RegisterForm) -> Result<UserProfile, Error> {
    let NewUser {
        full_name,
        email,
        password,
    } = validate_register(&form)?;

    let password_hash = hash_password(password, app.config.hash_cost).await?;

    let mut conn = app.db_write().await?;
    match schema::User::insert(&mut *conn, &full_name, &email, &password_hash).await {
        Ok(user) => Ok(user.into()),
        Err(report) if report.is_unique_violation() => {
            Err(Error::from_report(types::Error::Conflict, report))
        }
        Err(report) => Err(report.into()),
    }
}

/// Checks credentials against the stored digest and returns the profile
/// together with the welcome message the login response carries.
#[tracing::instrument(skip_all)]
pub async fn login(app: &App, form: LoginForm) -> Result<(UserProfile, String), Error> {
    let (Some(email), Some(password)) = (
        non_blank(form.email.as_deref()),
        form.password.as_deref().filter(|v| !v.is_empty()),
    ) else {
        return Err(Error::validation("Email and password are required."));
    };

    // Same normalization as registration, so the address is one
    // identity on both paths.
    let email = email.to_lowercase();
    let password = password.to_string();

    let mut conn = app.db_read().await?;
    let user = schema::User::by_email(&mut *conn, &email)
        .await?
        .ok_or_else(Error::not_found)?;
    drop(conn);

    let digest = user.password_hash.clone();
    if !verify_password(password, digest).await? {
        return Err(Error::unauthorized());
    }

    let message = format!("Login successful. Welcome back, {}", user.full_name);
    Ok((user.into(), message))
}

/// Returns every registered user, projected to [`UserProfile`].
#[tracing::instrument(skip_all)]
pub async fn list(app: &App) -> Result<Vec<UserProfile>, Error> {
    let mut conn = app.db_read().await?;
    let users = schema::User::all(&mut *conn).await?;
    Ok(users.into_iter().map(UserProfile::from).collect())
}

// bcrypt is CPU-bound by design; keep it off the async executor.
async fn hash_password(password: String, cost: u32) -> Result<String, Error> {
    match tokio::task::spawn_blocking(move || crypto::hash(&password, cost)).await {
        Ok(Ok(hash)) => Ok(hash),
        Ok(Err(report)) => Err(Error::from_report(types::Error::Internal, report)),
        Err(join_error) => Err(Error::from_context(types::Error::Internal, join_error)),
    }
}

async fn verify_password(password: String, digest: String) -> Result<bool, Error> {
    match tokio::task::spawn_blocking(move || crypto::verify(&password, &digest)).await {
        Ok(Ok(matched)) => Ok(matched),
        Ok(Err(report)) => Err(Error::from_report(types::Error::Internal, report)),
        Err(join_error) => Err(Error::from_context(types::Error::Internal, join_error)),
    }
}
