//! Registration and credential checks.

use plaza_shared::dto::RegisterForm;

use crate::domain::{NewUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, Repositories};

const USERNAME_TAKEN: &str = "Username already taken.";

pub async fn register(
    repos: &Repositories,
    passwords: &dyn PasswordService,
    form: &RegisterForm,
) -> Result<User, DomainError> {
    let username = form.username.trim();
    if username.is_empty() {
        return Err(DomainError::validation("Username is required."));
    }
    if form.password != form.confirmation {
        return Err(DomainError::validation("Passwords must match."));
    }

    if repos.users.find_by_username(username).await?.is_some() {
        return Err(DomainError::Duplicate(USERNAME_TAKEN.to_string()));
    }

    let password_hash = passwords
        .hash(&form.password)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let user = repos
        .users
        .create(NewUser::new(
            username.to_string(),
            form.email.trim().to_string(),
            password_hash,
        ))
        .await
        .map_err(|e| match e {
            // lost a race with a concurrent registration
            RepoError::Constraint(_) => DomainError::Duplicate(USERNAME_TAKEN.to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

/// Look up `username` and check `password` against the stored hash.
pub async fn authenticate(
    repos: &Repositories,
    passwords: &dyn PasswordService,
    username: &str,
    password: &str,
) -> Result<Option<User>, DomainError> {
    let Some(user) = repos.users.find_by_username(username.trim()).await? else {
        return Ok(None);
    };

    let valid = passwords
        .verify(password, &user.password_hash)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(valid.then_some(user))
}
