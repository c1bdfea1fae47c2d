//! Bearer token authentication

mod jwt;

pub use jwt::{JwksJwtService, JwtClaims, JwtConfig, JwtService, TokenIssuer, TokenVerifier};
