use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use helpdesk::api::{CommentId, HelpdeskApi, PageRequest, TicketId, UserId};
use helpdesk::error::Result;
use helpdesk::pages::{CreateTicketPage, TicketDetailPage, TicketFilters, TicketListPage};
use helpdesk::responses::Page;
use helpdesk::types::{Comment, Ticket, TicketStatus, TicketUpdate};

use super::{confirm, Session};
use crate::cli::{CommentArgs, PagingArgs, TicketCreateArgs, TicketListArgs, TicketUpdateArgs};
use crate::output::{self, format_date, format_date_only, format_relative, truncate};

#[derive(Tabled)]
pub struct TicketRow {
    #[tabled(rename = "ID")]
    id: TicketId,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Ticket> for TicketRow {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            code: format!("#{}", ticket.code),
            subject: truncate(&ticket.subject, 40),
            owner: ticket.owner.full_name.clone(),
            assignee: ticket.assignee_name().to_string(),
            status: ticket.status.colored(),
            priority: ticket.priority.colored(),
            created: format_date_only(&ticket.created_at),
        }
    }
}

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "ID")]
    id: CommentId,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Comment")]
    body: String,
    #[tabled(rename = "When")]
    created_at: String,
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author_name().to_string(),
            body: truncate(&comment.body.replace('\n', " "), 60),
            created_at: format_relative(&comment.created_at),
        }
    }
}

pub async fn list(session: &Session<'_>, args: TicketListArgs) -> Result<()> {
    let filters = TicketFilters {
        status: args.status,
        priority: args.priority,
        search: args.search,
    };

    let mut page = TicketListPage::new(session.client, session.reporter)
        .with_page_size(args.paging.limit)
        .with_page(args.paging.page_index())
        .with_filters(filters);
    page.refresh().await;

    if page.tickets().is_empty() {
        output::print_message("No tickets found");
        return Ok(());
    }

    output::print_table(page.tickets(), |t| TicketRow::from(t));

    if !output::is_json_output() {
        if let Some((first, last)) = page.showing_range() {
            println!(
                "Showing {first} to {last} of {} results (page {} of {})",
                page.total_elements(),
                page.page() + 1,
                page.total_pages()
            );
        }
    }

    Ok(())
}

pub async fn mine(session: &Session<'_>, paging: PagingArgs) -> Result<()> {
    let owner = session.acting_user()?;
    let request = PageRequest::new(paging.page_index(), paging.limit);
    let page = session.client.list_tickets_by_owner(owner, request).await?;
    print_page(&page, request);
    Ok(())
}

pub async fn assigned(
    session: &Session<'_>,
    user: Option<UserId>,
    paging: PagingArgs,
) -> Result<()> {
    let assignee = match user {
        Some(id) => id,
        None => session.acting_user()?,
    };
    let request = PageRequest::new(paging.page_index(), paging.limit);
    let page = session
        .client
        .list_tickets_by_assignee(assignee, request)
        .await?;
    print_page(&page, request);
    Ok(())
}

fn print_page(page: &Page<Ticket>, request: PageRequest) {
    if page.is_empty() {
        output::print_message("No tickets found");
        return;
    }

    output::print_table(&page.content, |t| TicketRow::from(t));
    if !output::is_json_output() {
        println!(
            "{} results (page {} of {})",
            page.total_elements,
            request.page + 1,
            page.total_pages
        );
    }
}

pub async fn view(session: &Session<'_>, id: TicketId) -> Result<()> {
    let mut page = TicketDetailPage::new(session.client, session.reporter, id);
    page.load().await;
    print_detail(&page);
    Ok(())
}

pub async fn view_by_code(session: &Session<'_>, code: &str) -> Result<()> {
    let ticket = session.client.get_ticket_by_code(code).await?;
    view(session, ticket.id).await
}

pub async fn create(session: &Session<'_>, args: TicketCreateArgs) -> Result<()> {
    let mut page = CreateTicketPage::new(session.client, session.reporter);

    let owner = match args.owner {
        Some(id) => Some(id),
        None => session.default_owner()?,
    };
    if owner.is_none() {
        page.load().await;
    }

    let form = page.form_mut();
    form.subject = args.subject;
    form.description = args.description;
    form.priority = args.priority;
    if owner.is_some() {
        form.owner = owner;
    }

    if let Some(ticket) = page.submit().await {
        output::print_item(&ticket, |t| {
            output::print_message(&format!("Created #{} - {} (id {})", t.code, t.subject, t.id));
        });
    }

    Ok(())
}

pub async fn update(session: &Session<'_>, args: TicketUpdateArgs) -> Result<()> {
    let update = TicketUpdate {
        subject: args.subject,
        description: args.description,
        priority: args.priority,
    };

    if update.is_empty() {
        output::print_message("No updates specified");
        return Ok(());
    }

    let mut page = TicketDetailPage::new(session.client, session.reporter, args.id);
    if page.update(&update).await {
        if let Some(ticket) = page.ticket() {
            output::print_message(&format!("Updated #{} - {}", ticket.code, ticket.subject));
        }
    }

    Ok(())
}

pub async fn delete(session: &Session<'_>, id: TicketId, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to delete this ticket?")? {
        println!("Aborted.");
        return Ok(());
    }

    let mut page = TicketDetailPage::new(session.client, session.reporter, id);
    if page.delete().await {
        output::print_message(&format!("Deleted ticket {id}"));
    }

    Ok(())
}

pub async fn assign(session: &Session<'_>, id: TicketId, assignee: UserId) -> Result<()> {
    let mut page = TicketDetailPage::new(session.client, session.reporter, id);
    if page.assign(assignee).await {
        if let Some(ticket) = page.ticket() {
            output::print_message(&format!(
                "Assigned #{} to {}",
                ticket.code,
                ticket.assignee_name()
            ));
        }
    }

    Ok(())
}

pub async fn change_status(session: &Session<'_>, id: TicketId, status: TicketStatus) -> Result<()> {
    let mut page = TicketDetailPage::new(session.client, session.reporter, id);
    if page.change_status(status).await {
        if let Some(ticket) = page.ticket() {
            output::print_message(&format!("#{} is now {}", ticket.code, ticket.status));
        }
    }

    Ok(())
}

pub async fn comment(session: &Session<'_>, args: CommentArgs) -> Result<()> {
    let author = session.acting_user()?;

    let mut page = TicketDetailPage::new(session.client, session.reporter, args.id);
    if let Some(comment) = page.add_comment(&args.body, author).await {
        output::print_item(comment, |c| {
            output::print_message(&format!("Added comment {} to ticket {}", c.id, c.ticket_id));
        });
    } else if args.body.trim().is_empty() {
        output::print_message("Nothing to add: comment is empty");
    }

    Ok(())
}

pub async fn uncomment(
    session: &Session<'_>,
    id: TicketId,
    comment: CommentId,
    yes: bool,
) -> Result<()> {
    let author = session.acting_user()?;

    if !yes && !confirm("Are you sure you want to delete this comment?")? {
        println!("Aborted.");
        return Ok(());
    }

    let mut page = TicketDetailPage::new(session.client, session.reporter, id);
    page.load().await;
    if page.delete_comment(comment, author).await {
        output::print_message(&format!(
            "Deleted comment {comment}, {} remaining on ticket {id}",
            page.comments().len()
        ));
    }

    Ok(())
}

fn print_detail<A: HelpdeskApi + ?Sized>(page: &TicketDetailPage<'_, A>) {
    match page.ticket() {
        Some(ticket) => print_ticket(ticket, page.comments()),
        None => output::print_message(&format!("Ticket {} not found", page.ticket_id())),
    }
}

fn print_ticket(ticket: &Ticket, comments: &[Comment]) {
    if output::is_json_output() {
        let view = json!({ "ticket": ticket, "comments": comments });
        println!("{}", serde_json::to_string_pretty(&view).unwrap_or_default());
        return;
    }

    println!("{} - {}", format!("#{}", ticket.code).bold(), ticket.subject);
    println!();
    println!("{}", ticket.description);
    println!();
    println!("Status:   {}", ticket.status.colored());
    println!("Priority: {}", ticket.priority.colored());
    println!("Owner:    {}", ticket.owner.full_name);
    println!("Assignee: {}", ticket.assignee_name());
    println!("Created:  {}", format_date(&ticket.created_at));
    println!("Updated:  {}", format_date(&ticket.updated_at));
    if let Some(closed_at) = &ticket.closed_at {
        println!("Closed:   {}", format_date(closed_at));
    }
    println!();

    if comments.is_empty() {
        println!("No comments yet.");
    } else {
        println!("Comments ({})", comments.len());
        output::print_table(comments, |c| CommentRow::from(c));
    }
}
