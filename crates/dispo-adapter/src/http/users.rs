/*
[INPUT]:  JWT authentication
[OUTPUT]: User directory listings
[POS]:    HTTP layer - user endpoints (require JWT auth)
[UPDATE]: When adding new user endpoints or changing query parameters
*/

use crate::http::{DispoClient, Result};
use crate::types::UserPage;

impl DispoClient {
    /// List directory users
    ///
    /// GET /users
    pub async fn get_users(&self) -> Result<UserPage> {
        self.authed_get("/users").await
    }
}
