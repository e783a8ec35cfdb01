/*
[INPUT]:  Credentials, stored tokens, and session files
[OUTPUT]: Authenticated sessions for the request pipeline
[POS]:    Auth layer - module wiring
[UPDATE]: When adding new auth components
*/

pub mod manager;
pub mod persistent;
pub mod session;
pub mod tokens;

pub use manager::AuthManager;
pub use persistent::{SessionFileStore, StoredSession};
pub use session::Session;
pub use tokens::{TokenData, TokenStore};
