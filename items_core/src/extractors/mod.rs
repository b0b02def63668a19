pub mod json;
pub mod params;

pub use json::ValidatedJson;
pub use params::{PathParam, QueryParams};
