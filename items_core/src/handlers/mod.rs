pub mod health;
pub mod items;
pub mod routes;
pub mod users;

pub use routes::create_routes;
