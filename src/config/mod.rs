pub mod schema;

pub use schema::{ApiConfig, Config, SessionConfig};
