/*
[INPUT]:  Parsed CLI arguments and application configuration
[OUTPUT]: Wired clients and shared command helpers
[POS]:    CLI layer - module wiring and app context
[UPDATE]: When commands gain new shared dependencies
*/

use std::path::Path;

use anyhow::{Context, Result, bail};

use dispo_adapter::types::Role;
use dispo_adapter::{AuthManager, DispoClient};
use dispo_workflow::{AppConfig, TaskFlow};

pub mod init;
pub mod monitor;
pub mod notifications;
pub mod render;
pub mod session;
pub mod tasks;

/// Everything a command needs: config, auth lifecycle, and the task flow.
pub struct AppContext {
    pub config: AppConfig,
    pub auth: AuthManager,
    pub flow: TaskFlow,
}

impl AppContext {
    pub fn build(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path).context("load config")?;
        tracing::debug!(base_url = %config.base_url, "configuration loaded");

        let client =
            DispoClient::with_config_and_base_url(config.client_config(), &config.base_url)
                .context("build HTTP client")?;
        let auth = AuthManager::new_with_session_dir(client.clone(), config.session_dir());
        let flow = TaskFlow::new(client, auth.session().clone());

        Ok(Self { config, auth, flow })
    }

    /// Restore the persisted session or tell the user to sign in.
    pub fn require_session(&self) -> Result<()> {
        if self.auth.restore() {
            Ok(())
        } else {
            bail!("not signed in; run `dispo login` first")
        }
    }
}

/// Parse a section/leader role argument, case-insensitively.
pub fn parse_role(value: &str) -> Result<Role> {
    let normalized = value.trim().to_ascii_uppercase();
    let role = match normalized.as_str() {
        "LEADER" => Role::Leader,
        "SECTION_PLANNING" => Role::SectionPlanning,
        "SECTION_OPERATIONS" => Role::SectionOperations,
        "SECTION_LOGISTICS" => Role::SectionLogistics,
        "SECTION_PERSONNEL" => Role::SectionPersonnel,
        _ => bail!(
            "unknown role '{value}'; expected LEADER or one of SECTION_PLANNING, \
             SECTION_OPERATIONS, SECTION_LOGISTICS, SECTION_PERSONNEL"
        ),
    };
    Ok(role)
}
