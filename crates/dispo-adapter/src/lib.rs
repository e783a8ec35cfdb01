/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public disposition-service adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthManager,
    Session,
    SessionFileStore,
    StoredSession,
    TokenData,
    TokenStore,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    DispoClient,
    DispoError,
    Result,
};

// Re-export all types
pub use types::*;
