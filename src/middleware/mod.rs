pub mod api_key;
pub mod rate_limit;
pub mod session;

pub use api_key::require_api_key;
pub use rate_limit::{throttle, RateLimiter};
pub use session::{require_session, AuthUser, SESSION_COOKIE};
