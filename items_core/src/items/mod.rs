pub mod filter;
pub mod repository;

pub use filter::ItemFilter;
pub use repository::{ItemRepository, ItemRepositoryTrait};
