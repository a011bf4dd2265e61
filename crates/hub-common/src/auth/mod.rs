//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, Role, SessionToken};
pub use password::{hash_password, verify_password, AdminCredentials};
