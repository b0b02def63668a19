pub mod items;
pub mod response;
pub mod users;

pub use items::{Item, ItemFilterQuery, ItemPayload};
pub use response::{DataResponse, MessageResponse};
pub use users::{Credentials, LoginResponse, RegisterResponse};
