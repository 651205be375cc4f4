//! Typed HTTP client over the `/api/v1` routes.

mod error;
pub use error::{ClientError, ClientResult};

mod http;
pub use http::LmsClient;
