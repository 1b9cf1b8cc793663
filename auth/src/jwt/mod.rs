pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use claims::TOKEN_LIFETIME_HOURS;
pub use errors::JwtError;
pub use service::TokenService;
