pub mod schema;
pub mod user_repository;

pub use schema::init_db;
pub use user_repository::UserRepository;
