pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::chirp;
pub use domain::chirp::service::ChirpService;
pub use domain::session;
pub use domain::session::service::AuthService;
pub use domain::user;
pub use domain::user::service::UserService;
pub use outbound::repositories;
