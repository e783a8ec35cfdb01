/*
[INPUT]:  Tasks, notifications, and statistics from the service
[OUTPUT]: Styled terminal output
[POS]:    CLI layer - rendering helpers
[UPDATE]: When output formats change
*/

use chrono::{DateTime, Utc};
use console::style;

use dispo_adapter::types::{
    ChecklistItem, ChecklistStatus, DashboardStatistics, Notification, SessionUser, StuckTask,
    Task, TaskStatus,
};
use dispo_workflow::checklist::{ActionKind, available_actions};
use dispo_workflow::compute_progress;

fn date(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|value| value.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn status_style(status: TaskStatus) -> console::StyledObject<&'static str> {
    let label = status.label();
    match status {
        TaskStatus::Completed => style(label).green(),
        TaskStatus::Stuck => style(label).red(),
        TaskStatus::InProgress | TaskStatus::Dispositioned => style(label).cyan(),
        TaskStatus::Draft => style(label).magenta(),
        TaskStatus::Cancelled => style(label).dim(),
    }
}

pub fn task_line(task: &Task) {
    let progress = compute_progress(&task.checklist_items);
    println!(
        "{}  {}  [{}] {} ({}%)  due {}",
        style(&task.id).dim(),
        style(&task.title).bold(),
        task.priority.label(),
        status_style(task.status),
        progress.percentage,
        date(&task.due_date),
    );
}

pub fn task_detail(task: &Task, viewer: Option<&SessionUser>) {
    let progress = compute_progress(&task.checklist_items);

    println!("{}", style(&task.title).bold().underlined());
    println!("{}", style(&task.description).dim());
    println!(
        "status: {}  priority: {}  due: {}",
        status_style(task.status),
        task.priority.label(),
        date(&task.due_date),
    );
    println!("creator: {}", task.creator.name);
    if let Some(assignee) = &task.assigned_to {
        println!("assignee: {} ({})", assignee.name, assignee.role.as_str());
    }
    if let Some(note) = &task.disposition_note {
        println!("disposition note: {note}");
    }
    println!(
        "progress: {}/{} ({}%)",
        progress.completed, progress.total, progress.percentage
    );

    println!("\n{}", style("Checklist").bold());
    // Render in stage order, not whatever order the server sent
    let mut items: Vec<&ChecklistItem> = task.checklist_items.iter().collect();
    items.sort_by_key(|item| item.order);
    for item in items {
        let marker = match item.status {
            ChecklistStatus::Completed => style("[x]").green(),
            ChecklistStatus::InProgress => style("[>]").cyan(),
            ChecklistStatus::Blocked => style("[!]").red(),
            ChecklistStatus::NotStarted => style("[ ]").dim(),
        };
        println!(
            "  {} {}. {} ({})  {}",
            marker,
            item.order,
            item.title,
            item.status.label(),
            style(&item.id).dim(),
        );
        if let Some(note) = &item.blocked_note {
            if item.status == ChecklistStatus::Blocked {
                println!("        blocked: {note}");
            }
        }
        if let Some(started) = item.started_at {
            print!("        started {}", started.format("%d %b %Y"));
            if let Some(completed) = item.completed_at {
                print!("  completed {}", completed.format("%d %b %Y"));
            }
            println!();
        }
        if let Some(viewer) = viewer {
            let actions = available_actions(task, viewer, item);
            if !actions.is_empty() {
                let verbs: Vec<&str> = actions
                    .iter()
                    .map(|action| match action {
                        ActionKind::Start => "start",
                        ActionKind::Resume => "start (resume)",
                        ActionKind::Complete => "complete",
                        ActionKind::Block => "block",
                    })
                    .collect();
                println!("        {} {}", style("can:").dim(), verbs.join(", "));
            }
        }
    }
}

pub fn notification_line(notification: &Notification) {
    let read_marker = if notification.is_read {
        style(" ").dim()
    } else {
        style("*").yellow()
    };
    println!(
        "{} {}  {}",
        read_marker,
        style(&notification.title).bold(),
        style(notification.created_at.format("%d %b %Y %H:%M")).dim(),
    );
    println!(
        "    {}  (task {})",
        notification.subtitle, notification.task.id
    );
}

pub fn statistics(stats: &DashboardStatistics) {
    println!("{}", style("Dashboard").bold().underlined());
    println!(
        "total: {} ({} this month)",
        stats.total_tasks.count, stats.total_tasks.this_month
    );
    println!(
        "completed: {} ({:.0}%)   in progress: {} ({:.0}%)",
        stats.completed_tasks.count,
        stats.completed_tasks.percentage,
        stats.in_progress_tasks.count,
        stats.in_progress_tasks.percentage,
    );
    println!(
        "stuck: {}   awaiting disposition: {}",
        stats.stuck_tasks.count, stats.pending_disposition_tasks.count
    );

    if !stats.by_section.is_empty() {
        println!("\n{}", style("By section").bold());
        for section in &stats.by_section {
            println!(
                "  {:<20} total {:>3}  done {:>3}  active {:>3}  stuck {:>3}",
                section.name, section.total, section.completed, section.in_progress, section.stuck
            );
        }
    }
}

pub fn stuck_tasks(tasks: &[StuckTask]) {
    if tasks.is_empty() {
        return;
    }

    println!("\n{}", style("Stuck tasks").bold());
    for task in tasks {
        println!(
            "  {}  {} ({}) stuck on '{}' for {} days",
            style(&task.id).dim(),
            task.title,
            task.assignee,
            task.stuck_stage,
            task.stuck_days,
        );
    }
}
