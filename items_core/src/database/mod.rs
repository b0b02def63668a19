pub mod connection;
pub mod models;
pub mod schema;

pub use connection::{get_database_pool, DatabaseManager, UnitOfWork};
pub use models::{DbItem, DbUser};
pub use schema::{init_schema, EntitySchema};
