pub mod repository;

pub use repository::{UserRepository, UserRepositoryTrait, INVALID_CREDENTIALS};
