/*
[INPUT]:  Credentials from prompts or flags
[OUTPUT]: Signed-in or signed-out sessions
[POS]:    CLI layer - session commands
[UPDATE]: When the sign-in flow changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use super::AppContext;

pub async fn login(context: &AppContext, username: Option<String>) -> Result<()> {
    let theme = ColorfulTheme::default();

    let username = match username {
        Some(username) => username,
        None => Input::with_theme(&theme)
            .with_prompt("Username")
            .interact_text()?,
    };

    let password: String = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    let user = context
        .auth
        .login(&username, &password)
        .await
        .context("sign-in failed")?;

    println!(
        "{} signed in as {} ({})",
        style("OK").bold().green(),
        style(&user.name).bold(),
        user.role.as_str()
    );
    Ok(())
}

pub fn logout(context: &AppContext) -> Result<()> {
    context.auth.logout().context("sign-out failed")?;
    println!("{} signed out", style("OK").bold().green());
    Ok(())
}

pub fn whoami(context: &AppContext) -> Result<()> {
    context.require_session()?;

    // restore() succeeded, so a user is present
    if let Some(user) = context.auth.session().current_user() {
        println!("{} <{}>", style(&user.name).bold(), user.email);
        println!("role: {}", user.role.as_str());
    }
    Ok(())
}
