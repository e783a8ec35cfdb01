/*
[INPUT]:  Page numbers
[OUTPUT]: Rendered notification feed pages
[POS]:    CLI layer - notification commands
[UPDATE]: When notification commands change
*/

use anyhow::Result;
use console::style;

use super::{AppContext, render};

pub async fn list(context: &AppContext, page: u32) -> Result<()> {
    context.require_session()?;
    let client = context.flow.client();

    let unread = client.unread_count().await?;
    let feed = client.get_notifications(page).await?;

    if unread > 0 {
        println!("{} unread\n", style(unread).bold().yellow());
    }

    if feed.data.is_empty() {
        println!("{}", style("No notifications.").dim());
        return Ok(());
    }

    for notification in &feed.data {
        render::notification_line(notification);
    }

    println!(
        "\npage {}/{}{}",
        feed.pagination.page,
        feed.pagination.total_pages,
        if feed.pagination.has_next() {
            "  (use --page to read more)"
        } else {
            ""
        }
    );
    Ok(())
}
