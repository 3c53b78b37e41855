use dotenv::dotenv;
use env_logger::Env;
use subletmatch::{
    admin::{run_delete_admin_with_uri, DELETE_ADMIN_EMAIL},
    config::DB_URI_VAR,
};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let uri = std::env::var(DB_URI_VAR).ok();
    let report = run_delete_admin_with_uri(uri, DELETE_ADMIN_EMAIL).await;

    std::process::exit(report.exit_code());
}
