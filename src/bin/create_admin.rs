use dotenv::dotenv;
use env_logger::Env;
use log::info;
use subletmatch::{
    admin::{create_admin, AdminSeed, PasswordStorage},
    config::{flag_enabled, STORE_HASHED_VAR},
    AppError, DbConfig,
};

// Errors are not caught here: they escape main and the process exits non-zero.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let db = DbConfig::from_env()?;
    let storage = if flag_enabled(std::env::var(STORE_HASHED_VAR).ok().as_deref()) {
        PasswordStorage::Hashed
    } else {
        PasswordStorage::Plaintext
    };
    let seed = AdminSeed::default().with_storage(storage);

    let admin = create_admin(&db, &seed).await?;
    info!("Created admin {} <{}>", admin.name, admin.email);
    Ok(())
}
