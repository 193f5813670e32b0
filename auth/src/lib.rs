//! Authentication utilities library
//!
//! Provides the authentication primitives behind the chirpy session endpoints:
//! - Password hashing (Argon2id, fixed work factor)
//! - JWT access token issuance and validation (HS256 only)
//! - `Authorization: Bearer` header parsing
//! - Opaque refresh token generation
//! - Authentication coordination
//!
//! Nothing in here knows about HTTP frameworks or storage. Services adapt these to their
//! own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("not_my_password", &hash).is_err());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("user123", Duration::hours(1)).unwrap();
//! let subject: String = handler.verify_subject(&token).unwrap();
//! assert_eq!(subject, "user123");
//! ```
//!
//! ## Bearer Header
//! ```
//! use auth::extract_bearer_token;
//!
//! assert_eq!(extract_bearer_token(Some("Bearer abc123")), Ok("abc123"));
//! assert!(extract_bearer_token(Some("abc123")).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint tokens
//! let result = auth
//!     .authenticate("password123", &hash, "user123", Duration::hours(1))
//!     .unwrap();
//! assert_eq!(result.refresh_token.len(), 64);
//!
//! // Validate token
//! let subject: String = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "user123");
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer_token;
pub use bearer::BearerError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
pub use refresh::RefreshTokenError;
