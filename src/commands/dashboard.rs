use colored::Colorize;
use serde_json::json;

use helpdesk::error::Result;
use helpdesk::pages::DashboardPage;

use super::tickets::TicketRow;
use super::Session;
use crate::output;

pub async fn show(session: &Session<'_>) -> Result<()> {
    let mut page = DashboardPage::new(session.client, session.reporter);
    page.load().await;

    let stats = page.stats();
    if output::is_json_output() {
        let view = json!({ "stats": stats, "recent": page.recent() });
        println!("{}", serde_json::to_string_pretty(&view).unwrap_or_default());
        return Ok(());
    }

    println!("Total tickets:  {}", stats.total.to_string().bold());
    println!("Open:           {}", stats.open.to_string().green());
    println!("Closed:         {}", stats.closed.to_string().bright_black());
    println!("High priority:  {}", stats.high_priority.to_string().red());
    println!();

    if page.recent().is_empty() {
        println!("No tickets yet.");
    } else {
        println!("Recent tickets");
        output::print_table(page.recent(), |t| TicketRow::from(t));
    }

    Ok(())
}
