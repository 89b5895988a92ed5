//! Authentication types: login credentials, the cached session token and
//! the claims embedded in it.

mod claims;
mod credentials;
mod token;

pub use claims::{Audience, TokenClaims};
pub use credentials::Credentials;
pub use token::SessionToken;
