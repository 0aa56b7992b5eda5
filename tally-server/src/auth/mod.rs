//! Authentication and authorization
//!
//! Bearer-JWT verification plus a declarative per-route admin capability.
//! Tokens are issued by an external identity service sharing `JWT_SECRET`;
//! this module only verifies them and exposes the caller's identity.

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
