pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use extract::ValidatedJson;
pub use router::{ApiDoc, create_router};
pub use types::*;
