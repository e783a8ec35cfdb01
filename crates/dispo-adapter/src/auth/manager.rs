/*
[INPUT]:  Username/password credentials and the HTTP client
[OUTPUT]: Authenticated sessions (tokens + current user), persisted to disk
[POS]:    Auth layer - orchestrates the sign-in flow
[UPDATE]: When auth endpoints or flow steps change
*/

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::Method;
use tracing::{info, warn};

use crate::http::{DispoClient, Result};
use crate::types::{LoginData, LoginRequest, SessionUser};

use super::{Session, SessionFileStore, StoredSession};

/// Manages the sign-in lifecycle: login, session restore, logout.
///
/// Tokens live in the client's store (the request pipeline reads them
/// there); the current user lives in the [`Session`]; both are mirrored to
/// disk so a restarted process can resume without re-entering credentials.
#[derive(Debug)]
pub struct AuthManager {
    client: DispoClient,
    session: Session,
    store: SessionFileStore,
}

impl AuthManager {
    /// Create a new auth manager using the default session directory.
    ///
    /// Default: `./.dispo-config` relative to current working directory.
    pub fn new(client: DispoClient) -> Self {
        Self::new_with_session_dir(client, default_session_dir())
    }

    /// Create a new auth manager with an explicit session directory.
    pub fn new_with_session_dir(client: DispoClient, dir: impl AsRef<Path>) -> Self {
        Self {
            client,
            session: Session::new(),
            store: SessionFileStore::new(dir),
        }
    }

    /// Get the session holding the current user
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &DispoClient {
        &self.client
    }

    /// Sign in with username and password.
    ///
    /// POST /auth/login
    ///
    /// On success the token pair enters the request pipeline, the user is
    /// recorded in the session, and the session is persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionUser> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        let builder = self.client.request(Method::POST, "/auth/login")?.json(&request);
        let data: LoginData = self.client.send_data(builder).await?;

        self.client
            .tokens()
            .set_tokens(&data.tokens.access_token, &data.tokens.refresh_token);
        self.session.set_user(data.user.clone());

        let snapshot = StoredSession {
            user: data.user.clone(),
            access_token: data.tokens.access_token.clone(),
            refresh_token: data.tokens.refresh_token.clone(),
        };
        if let Err(err) = self.store.save(&snapshot) {
            // A session that cannot be persisted still works for this process
            warn!(error = %err, "failed to persist session");
        }

        info!(user = %data.user.username, role = ?data.user.role, "signed in");
        Ok(data.user)
    }

    /// Restore a previously persisted session into the live stores.
    /// Returns whether a session was restored.
    pub fn restore(&self) -> bool {
        let Some(stored) = self.store.load() else {
            return false;
        };

        self.client
            .tokens()
            .set_tokens(&stored.access_token, &stored.refresh_token);
        self.session.set_user(stored.user);
        true
    }

    /// Sign out: clear tokens, session state, and the persisted file
    pub fn logout(&self) -> io::Result<()> {
        self.client.tokens().clear();
        self.session.clear();
        self.store.clear()
    }
}

fn default_session_dir() -> PathBuf {
    let base_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    base_dir.join(".dispo-config")
}
