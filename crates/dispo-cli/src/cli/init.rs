/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};

use dispo_workflow::AppConfig;

pub fn run_init(output: Option<PathBuf>) -> Result<()> {
    println!("{}", style("Welcome to dispo init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a configuration file.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = AppConfig::default();

    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Service base URL (including /api/v1)")
        .default(defaults.base_url.clone())
        .interact_text()?;

    let timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout (seconds)")
        .default(defaults.timeout_secs)
        .interact_text()?;

    let config = AppConfig {
        base_url,
        timeout_secs,
        session_dir: None,
    };

    let path = output.unwrap_or_else(AppConfig::default_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("failed to create {}", parent.display()))?;
    }

    let yaml = serde_yaml::to_string(&config).context("failed to serialize config to YAML")?;
    std::fs::write(&path, yaml).context(format!("failed to write config to {}", path.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!("Configuration written to: {}", style(path.display()).cyan());

    Ok(())
}
