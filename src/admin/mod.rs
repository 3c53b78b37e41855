//! Admin account lifecycle: seeding and removing the admin user.
//!
//! Each entry point opens its own connection, performs one mutation and
//! returns a structured result. Mapping that result onto a process exit
//! code is left to the binaries in `src/bin/`.

use crate::{
    config::DbConfig,
    db::{init_db, UserRepository},
    errors::AppError,
    models::{Role, User},
    utils::security::hash_password,
};
use log::{error, info, warn};

pub const ADMIN_NAME: &str = "SubletMatch Admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const CREATE_ADMIN_EMAIL: &str = "info@subletmatch.com";
// Not the address create_admin inserts.
pub const DELETE_ADMIN_EMAIL: &str = "admin@subletmatch.com";

/// What gets persisted in the `password` column of the seeded admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordStorage {
    /// The hash is computed but the plain literal is stored.
    #[default]
    Plaintext,
    Hashed,
}

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
    pub storage: PasswordStorage,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            name: String::from(ADMIN_NAME),
            email: String::from(CREATE_ADMIN_EMAIL),
            password: String::from(ADMIN_PASSWORD),
            storage: PasswordStorage::default(),
        }
    }
}

impl AdminSeed {
    pub fn with_storage(mut self, storage: PasswordStorage) -> Self {
        self.storage = storage;
        self
    }
}

/// Inserts one admin user described by `seed`.
///
/// Errors are returned untouched; a second run against the same store
/// fails with `AppError::Conflict` because `email` is unique.
pub async fn create_admin(db: &DbConfig, seed: &AdminSeed) -> Result<User, AppError> {
    let db = db.clone();
    let seed = seed.clone();
    tokio::task::spawn_blocking(move || create_admin_blocking(&db, &seed)).await?
}

fn create_admin_blocking(db: &DbConfig, seed: &AdminSeed) -> Result<User, AppError> {
    let conn = init_db(db)?;
    info!("Connected to user store");
    let user_repo = UserRepository::new(conn);

    let hashed_password = hash_password(&seed.password)?;
    let password = match seed.storage {
        PasswordStorage::Plaintext => {
            warn!(
                "Admin password for {} is stored as plain text; the computed hash is discarded",
                seed.email
            );
            seed.password.clone()
        }
        PasswordStorage::Hashed => hashed_password,
    };

    let admin = User::new(seed.name.clone(), seed.email.clone(), password, Role::Admin);
    let created = user_repo.create_user(&admin)?;
    info!("Admin user created successfully for email: {}", created.email);
    Ok(created)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(usize),
    NotFound,
}

/// Deletes at most one user whose email equals `email`.
pub async fn delete_admin(db: &DbConfig, email: &str) -> Result<DeleteOutcome, AppError> {
    let db = db.clone();
    let email = email.to_string();
    tokio::task::spawn_blocking(move || -> Result<DeleteOutcome, AppError> {
        let conn = init_db(&db)?;
        info!("Connected to user store");
        let user_repo = UserRepository::new(conn);
        match user_repo.delete_one_by_email(&email)? {
            0 => Ok(DeleteOutcome::NotFound),
            n => Ok(DeleteOutcome::Deleted(n)),
        }
    })
    .await?
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub success: bool,
    pub message: String,
}

impl ScriptReport {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed run, logged as `<context>: <err>`.
    pub fn failed(context: &str, err: &AppError) -> Self {
        let message = format!("{}: {}", context, err);
        error!("{}", message);
        Self {
            success: false,
            message,
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }
}

const DELETE_FAILED: &str = "Error deleting admin user";

/// Resolves the connection string, then behaves as `run_delete_admin`. A
/// missing string is reported as a failed run.
pub async fn run_delete_admin_with_uri(uri: Option<String>, email: &str) -> ScriptReport {
    match DbConfig::from_var(uri) {
        Ok(db) => run_delete_admin(&db, email).await,
        Err(e) => ScriptReport::failed(DELETE_FAILED, &e),
    }
}

/// Runs `delete_admin` and folds every outcome, errors included, into a report.
pub async fn run_delete_admin(db: &DbConfig, email: &str) -> ScriptReport {
    match delete_admin(db, email).await {
        Ok(DeleteOutcome::Deleted(_)) => {
            info!("Admin user deleted successfully: {}", email);
            ScriptReport::succeeded("Admin user deleted successfully")
        }
        Ok(DeleteOutcome::NotFound) => {
            info!("Admin user not found: {}", email);
            ScriptReport::succeeded("Admin user not found")
        }
        Err(e) => ScriptReport::failed(DELETE_FAILED, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_matches_the_fixed_admin() {
        let seed = AdminSeed::default();
        assert_eq!(seed.email, CREATE_ADMIN_EMAIL);
        assert_eq!(seed.password, ADMIN_PASSWORD);
        assert_eq!(seed.storage, PasswordStorage::Plaintext);
        assert_ne!(seed.email, DELETE_ADMIN_EMAIL);
    }

    #[test]
    fn report_exit_codes() {
        assert_eq!(ScriptReport::succeeded("ok").exit_code(), 0);
        let failed = ScriptReport::failed(
            "Error creating admin user",
            &AppError::DatabaseError("boom".to_string()),
        );
        assert_eq!(failed.exit_code(), 1);
        assert_eq!(failed.message, "Error creating admin user: Database error: boom");
    }
}
