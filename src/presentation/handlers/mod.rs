mod analyze;
mod error;
mod health;

pub use analyze::analyze_handler;
pub use error::{ANALYSIS_FAILURE_MESSAGE, ApiError, ErrorResponse, UPLOAD_REJECTED_MESSAGE};
pub use health::health_handler;
