mod helpers;
mod middleware;
mod otp;
mod token;

pub use helpers::open_session;
pub use middleware::{AuthError, RequireApiSession, RequireSession};
pub use otp::OtpCache;
pub use token::{IssuedToken, TokenGenerator, parse_token};
