use super::{Phase, Reporter};
use crate::api::{CommentId, HelpdeskApi, TicketId, UserId};
use crate::error::ApiResult;
use crate::types::{Comment, NewComment, Ticket, TicketStatus, TicketUpdate, User};

pub struct TicketDetailPage<'a, A: HelpdeskApi + ?Sized> {
    api: &'a A,
    reporter: &'a dyn Reporter,
    ticket_id: TicketId,
    ticket: Option<Ticket>,
    comments: Vec<Comment>,
    users: Vec<User>,
    phase: Phase,
}

impl<'a, A: HelpdeskApi + ?Sized> TicketDetailPage<'a, A> {
    pub fn new(api: &'a A, reporter: &'a dyn Reporter, ticket_id: TicketId) -> Self {
        Self {
            api,
            reporter,
            ticket_id,
            ticket: None,
            comments: Vec::new(),
            users: Vec::new(),
            phase: Phase::Loading,
        }
    }

    /// Initial mount: the ticket with its comments, and the assignable users,
    /// all in flight at once. The user list is not part of the ticket join;
    /// losing it does not hide the ticket.
    pub async fn load(&mut self) {
        self.phase = Phase::Loading;

        let api = self.api;
        let (ticket_data, users) =
            tokio::join!(Self::fetch_ticket_data(api, self.ticket_id), api.list_active_users());

        self.apply_ticket_data(ticket_data);
        match users {
            Ok(users) => self.users = users,
            Err(e) => self.reporter.error("Error fetching users", &e),
        }

        self.phase = Phase::Ready;
    }

    /// Re-fetch the ticket and its comments together.
    pub async fn reload(&mut self) {
        self.phase = Phase::Loading;
        let ticket_data = Self::fetch_ticket_data(self.api, self.ticket_id).await;
        self.apply_ticket_data(ticket_data);
        self.phase = Phase::Ready;
    }

    async fn fetch_ticket_data(api: &A, id: TicketId) -> ApiResult<(Ticket, Vec<Comment>)> {
        tokio::try_join!(api.get_ticket(id), api.list_comments(id))
    }

    fn apply_ticket_data(&mut self, ticket_data: ApiResult<(Ticket, Vec<Comment>)>) {
        match ticket_data {
            Ok((ticket, comments)) => {
                self.ticket = Some(ticket);
                self.comments = comments;
            }
            Err(e) => self.reporter.error("Error fetching ticket data", &e),
        }
    }

    /// Post a comment and put it at the head of the list without a re-fetch.
    /// Blank text is ignored and sends nothing.
    pub async fn add_comment(&mut self, text: &str, author: UserId) -> Option<&Comment> {
        if text.trim().is_empty() {
            return None;
        }

        let new_comment = NewComment {
            body: text.to_string(),
            ticket_id: self.ticket_id,
        };

        match self.api.create_comment(&new_comment, author).await {
            Ok(comment) => {
                self.comments.insert(0, comment);
                self.comments.first()
            }
            Err(e) => {
                self.reporter.error("Error adding comment", &e);
                self.reporter.alert("Failed to add comment. Please try again.");
                None
            }
        }
    }

    /// Delete a comment and drop it from local state without a re-fetch.
    pub async fn delete_comment(&mut self, id: CommentId, author: UserId) -> bool {
        match self.api.delete_comment(id, author).await {
            Ok(()) => {
                self.comments.retain(|c| c.id != id);
                true
            }
            Err(e) => {
                self.reporter.error("Error deleting comment", &e);
                self.reporter
                    .alert("Failed to delete comment. Please try again.");
                false
            }
        }
    }

    pub async fn assign(&mut self, assignee: UserId) -> bool {
        match self.api.assign_ticket(self.ticket_id, assignee).await {
            Ok(()) => {
                self.reload().await;
                true
            }
            Err(e) => {
                self.reporter.error("Error assigning ticket", &e);
                self.reporter.alert("Failed to assign ticket. Please try again.");
                false
            }
        }
    }

    pub async fn change_status(&mut self, status: TicketStatus) -> bool {
        match self.api.change_ticket_status(self.ticket_id, status).await {
            Ok(()) => {
                self.reload().await;
                true
            }
            Err(e) => {
                self.reporter.error("Error changing ticket status", &e);
                self.reporter
                    .alert("Failed to change ticket status. Please try again.");
                false
            }
        }
    }

    /// The update response is not trusted as the new state; the page reloads.
    pub async fn update(&mut self, update: &TicketUpdate) -> bool {
        match self.api.update_ticket(self.ticket_id, update).await {
            Ok(_) => {
                self.reload().await;
                true
            }
            Err(e) => {
                self.reporter.error("Error updating ticket", &e);
                self.reporter.alert("Failed to update ticket. Please try again.");
                false
            }
        }
    }

    /// Deleting is terminal: on success the page no longer holds a ticket.
    pub async fn delete(&mut self) -> bool {
        match self.api.delete_ticket(self.ticket_id).await {
            Ok(()) => {
                self.ticket = None;
                self.comments.clear();
                true
            }
            Err(e) => {
                self.reporter.error("Error deleting ticket", &e);
                self.reporter.alert("Failed to delete ticket. Please try again.");
                false
            }
        }
    }

    pub fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}
