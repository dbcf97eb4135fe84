pub mod error;
pub mod origin;
pub mod resolver;

pub use error::{ServerError, ServerResult};
pub use origin::{ServerOrigin, DEFAULT_SERVER_ORIGIN};
pub use resolver::{resolve_start_url, StartUrl};
