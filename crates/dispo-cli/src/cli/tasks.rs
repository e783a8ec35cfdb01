/*
[INPUT]:  Task identifiers and command arguments
[OUTPUT]: Task listings, details, and checklist transitions
[POS]:    CLI layer - task commands
[UPDATE]: When task commands or their flags change
*/

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use console::style;

use dispo_adapter::types::{CreateTaskRequest, DispositionRequest, Priority};
use dispo_workflow::checklist::ChecklistAction;

use super::{AppContext, parse_role, render};

pub async fn list(context: &AppContext, drafts: bool, section: Option<&str>) -> Result<()> {
    context.require_session()?;
    let client = context.flow.client();

    let page = if drafts {
        client.get_draft_tasks().await?
    } else if let Some(section) = section {
        client.get_tasks_by_section(parse_role(section)?).await?
    } else {
        client.get_tasks().await?
    };

    if page.data.is_empty() {
        println!("{}", style("No tasks.").dim());
        return Ok(());
    }

    for task in &page.data {
        render::task_line(task);
    }
    println!(
        "\npage {}/{} ({} total)",
        page.pagination.page, page.pagination.total_pages, page.pagination.total
    );
    Ok(())
}

pub async fn show(context: &AppContext, task_id: &str) -> Result<()> {
    context.require_session()?;
    let task = context.flow.load_task(task_id).await?;
    let viewer = context.auth.session().current_user();
    render::task_detail(&task, viewer.as_ref());
    Ok(())
}

pub async fn create(
    context: &AppContext,
    title: String,
    description: String,
    priority: u8,
    due_date: &str,
) -> Result<()> {
    context.require_session()?;

    let priority = Priority::try_from(priority).map_err(anyhow::Error::msg)?;
    let due_date = parse_due_date(due_date)?;

    let request = CreateTaskRequest {
        title,
        description,
        priority,
        due_date,
    };
    let ack = context.flow.client().create_task(&request).await?;

    println!("{} {}", style("OK").bold().green(), ack.message);
    Ok(())
}

pub async fn disposition(
    context: &AppContext,
    task_id: &str,
    section: &str,
    note: String,
) -> Result<()> {
    context.require_session()?;

    let request = DispositionRequest {
        assigned_to_role: parse_role(section)?,
        disposition_note: note,
    };
    let ack = context
        .flow
        .client()
        .disposition_task(task_id, &request)
        .await?;

    println!("{} {}", style("OK").bold().green(), ack.message);
    Ok(())
}

pub async fn checklist_start(context: &AppContext, task_id: &str, item_id: &str) -> Result<()> {
    act(context, task_id, item_id, ChecklistAction::Start).await
}

pub async fn checklist_complete(context: &AppContext, task_id: &str, item_id: &str) -> Result<()> {
    act(context, task_id, item_id, ChecklistAction::Complete).await
}

pub async fn checklist_block(
    context: &AppContext,
    task_id: &str,
    item_id: &str,
    note: String,
) -> Result<()> {
    act(context, task_id, item_id, ChecklistAction::Block { note }).await
}

/// Shared fetch-guard-submit path for the checklist subcommands. The flow
/// re-evaluates every guard against the just-fetched task, so a stale CLI
/// invocation fails with a validation message instead of a server round trip.
async fn act(
    context: &AppContext,
    task_id: &str,
    item_id: &str,
    action: ChecklistAction,
) -> Result<()> {
    context.require_session()?;

    let task = context.flow.load_task(task_id).await?;
    let updated = context
        .flow
        .act(&task, item_id, action)
        .await
        .context("checklist update failed")?;

    let viewer = context.auth.session().current_user();
    render::task_detail(&updated, viewer.as_ref());
    Ok(())
}

fn parse_due_date(value: &str) -> Result<chrono::DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .context("due date must be formatted YYYY-MM-DD")?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("due date out of range")?;
    Ok(Utc.from_utc_datetime(&midnight))
}
