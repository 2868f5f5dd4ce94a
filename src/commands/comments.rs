use tabled::Tabled;

use helpdesk::api::{CommentId, HelpdeskApi, TicketId, UserId};
use helpdesk::error::Result;
use helpdesk::types::Comment;

use super::Session;
use crate::output::{self, format_date, format_relative, truncate};

#[derive(Tabled)]
struct AuthoredCommentRow {
    #[tabled(rename = "ID")]
    id: CommentId,
    #[tabled(rename = "Ticket")]
    ticket: TicketId,
    #[tabled(rename = "Comment")]
    body: String,
    #[tabled(rename = "When")]
    created_at: String,
}

impl From<&Comment> for AuthoredCommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            ticket: comment.ticket_id,
            body: truncate(&comment.body.replace('\n', " "), 60),
            created_at: format_relative(&comment.created_at),
        }
    }
}

pub async fn view(session: &Session<'_>, id: CommentId) -> Result<()> {
    let comment = session.client.get_comment(id).await?;

    output::print_item(&comment, |c| {
        println!("Comment {} on ticket {}", c.id, c.ticket_id);
        println!("By {} at {}", c.author_name(), format_date(&c.created_at));
        println!();
        println!("{}", c.body);
    });

    Ok(())
}

pub async fn edit(session: &Session<'_>, id: CommentId, body: &str) -> Result<()> {
    let author = session.acting_user()?;
    let comment = session.client.update_comment(id, body, author).await?;

    output::print_item(&comment, |c| {
        output::print_message(&format!("Updated comment {} on ticket {}", c.id, c.ticket_id));
    });

    Ok(())
}

pub async fn count(session: &Session<'_>, ticket: TicketId) -> Result<()> {
    let count = session.client.count_comments(ticket).await?;

    output::print_item(&count, |n| {
        println!("{n} comment{} on ticket {ticket}", if *n == 1 { "" } else { "s" });
    });

    Ok(())
}

pub async fn by_author(session: &Session<'_>, user: Option<UserId>) -> Result<()> {
    let author = match user {
        Some(id) => id,
        None => session.acting_user()?,
    };
    let comments = session.client.list_comments_by_author(author).await?;

    if comments.is_empty() {
        output::print_message(&format!("No comments by user {author}"));
        return Ok(());
    }

    output::print_table(&comments, |c| AuthoredCommentRow::from(c));

    Ok(())
}
