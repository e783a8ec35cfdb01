/*
[INPUT]:  JWT-authenticated monitoring queries
[OUTPUT]: Rendered dashboard statistics and stuck-task listings
[POS]:    CLI layer - monitoring commands
[UPDATE]: When monitoring commands change
*/

use anyhow::Result;

use super::{AppContext, render};

pub async fn stats(context: &AppContext) -> Result<()> {
    context.require_session()?;
    let client = context.flow.client();

    let statistics = client.dashboard_statistics().await?;
    render::statistics(&statistics);

    let stuck = client.stuck_tasks().await?;
    render::stuck_tasks(&stuck);

    Ok(())
}
