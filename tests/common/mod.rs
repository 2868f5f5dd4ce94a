#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use helpdesk::api::{CommentId, HelpdeskApi, PageRequest, Sort, SortDirection, TicketId, UserId};
use helpdesk::error::{ApiResult, FailureCause, RequestFailed};
use helpdesk::pages::Reporter;
use helpdesk::responses::{page_count, Page};
use helpdesk::types::{
    Comment, NewComment, NewTicket, Priority, Ticket, TicketStatus, TicketUpdate, User, UserInput,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: &'static str,
    pub detail: String,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    tickets: Vec<Ticket>,
    comments: Vec<Comment>,
    next_id: i64,
    clock: i64,
    calls: Vec<Call>,
    failing: HashSet<&'static str>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Strictly increasing timestamps so "newest first" is deterministic.
    fn tick(&mut self) -> chrono::DateTime<Utc> {
        self.clock += 1;
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::seconds(self.clock)
    }

    fn user(&self, id: UserId) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }
}

/// In-memory stand-in for the help-desk backend. Owns ids, codes, default
/// status and pagination, records every call and can be told to fail.
/// Tickets come back without embedded comments, as the backend sends them.
pub struct FakeBackend {
    state: Mutex<State>,
}

fn rejected(operation: &'static str, status: u16, body: &str) -> RequestFailed {
    RequestFailed::new(
        operation,
        FailureCause::Status {
            status,
            body: body.to_string(),
        },
    )
}

fn paginate(mut tickets: Vec<Ticket>, page: PageRequest) -> Page<Ticket> {
    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = tickets.len() as u64;
    let content = tickets
        .into_iter()
        .skip((page.page * page.size) as usize)
        .take(page.size as usize)
        .collect();

    Page {
        content,
        total_elements: total,
        total_pages: page_count(total, page.size),
        number: Some(page.page),
        size: Some(page.size),
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Two active users (ids 1 and 2) and one inactive user (id 3).
    pub fn seeded() -> Self {
        let backend = Self::new();
        backend.add_user("Ada Admin", "ada@example.com", true);
        backend.add_user("Bob Agent", "bob@example.com", true);
        backend.add_user("Cleo Former", "cleo@example.com", false);
        backend
    }

    pub fn add_user(&self, name: &str, email: &str, active: bool) -> User {
        let mut state = self.state.lock().unwrap();
        let now = state.tick();
        let user = User {
            id: state.next_id(),
            full_name: name.to_string(),
            email: email.to_string(),
            active,
            role_names: BTreeSet::from(["AGENT".to_string()]),
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.users.push(user.clone());
        user
    }

    /// Insert a ticket directly, bypassing call recording.
    pub fn add_ticket(
        &self,
        subject: &str,
        status: TicketStatus,
        priority: Priority,
        owner: UserId,
    ) -> Ticket {
        let mut state = self.state.lock().unwrap();
        let owner = state.user(owner).expect("seeded owner");
        let now = state.tick();
        let id = state.next_id();
        let ticket = Ticket {
            id,
            code: format!("TKT{id:08}"),
            subject: subject.to_string(),
            description: format!("{subject} description"),
            status,
            priority,
            owner,
            assignee: None,
            closed_at: (status == TicketStatus::Closed).then_some(now),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.tickets.push(ticket.clone());
        ticket
    }

    pub fn add_comment(&self, ticket: TicketId, author: UserId, body: &str) -> Comment {
        let mut state = self.state.lock().unwrap();
        let author = state.user(author).expect("seeded author");
        let now = state.tick();
        let comment = Comment {
            id: state.next_id(),
            body: body.to_string(),
            author,
            ticket_id: ticket,
            created_at: now,
            updated_at: now,
        };
        state.comments.push(comment.clone());
        comment
    }

    /// Make every later call to `op` fail with a 500.
    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.state.lock().unwrap().failing.remove(op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn ops(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.op).collect()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.op == op).count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Set a ticket's assignee behind the client's back.
    pub fn assign_directly(&self, ticket: TicketId, assignee: UserId) {
        let mut state = self.state.lock().unwrap();
        let user = state.user(assignee);
        if let Some(t) = state.tickets.iter_mut().find(|t| t.id == ticket) {
            t.assignee = user;
        }
    }

    pub fn ticket(&self, id: TicketId) -> Option<Ticket> {
        let state = self.state.lock().unwrap();
        state.tickets.iter().find(|t| t.id == id).cloned()
    }

    fn enter(
        &self,
        op: &'static str,
        operation: &'static str,
        detail: String,
    ) -> ApiResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call { op, detail });
        if state.failing.contains(op) {
            return Err(rejected(operation, 500, "Internal Server Error"));
        }
        Ok(state)
    }
}

#[async_trait]
impl HelpdeskApi for FakeBackend {
    async fn list_tickets(&self, page: PageRequest, sort: &Sort) -> ApiResult<Page<Ticket>> {
        let state = self.enter(
            "list_tickets",
            "Failed to fetch tickets",
            format!("{} {} {} {}", page.page, page.size, sort.field, sort.direction),
        )?;
        let mut result = paginate(state.tickets.clone(), page);
        if sort.direction == SortDirection::Asc {
            result.content.reverse();
        }
        Ok(result)
    }

    async fn get_ticket(&self, id: TicketId) -> ApiResult<Ticket> {
        let state = self.enter("get_ticket", "Failed to fetch ticket", id.to_string())?;
        state
            .tickets
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| rejected("Failed to fetch ticket", 404, "Ticket not found"))
    }

    async fn get_ticket_by_code(&self, code: &str) -> ApiResult<Ticket> {
        let state = self.enter("get_ticket_by_code", "Failed to fetch ticket", code.to_string())?;
        state
            .tickets
            .iter()
            .find(|t| t.code == code)
            .cloned()
            .ok_or_else(|| rejected("Failed to fetch ticket", 404, "Ticket not found"))
    }

    async fn create_ticket(&self, ticket: &NewTicket, owner: UserId) -> ApiResult<Ticket> {
        const OP: &str = "Failed to create ticket";
        let mut state = self.enter("create_ticket", OP, format!("{} {owner}", ticket.subject))?;
        if ticket.subject.trim().is_empty() || ticket.description.trim().is_empty() {
            return Err(rejected(OP, 400, "Subject is required"));
        }
        let owner = state
            .user(owner)
            .ok_or_else(|| rejected(OP, 404, "Owner not found"))?;
        let now = state.tick();
        let id = state.next_id();
        let created = Ticket {
            id,
            code: format!("TKT{id:08}"),
            subject: ticket.subject.clone(),
            description: ticket.description.clone(),
            status: TicketStatus::Open,
            priority: ticket.priority,
            owner,
            assignee: None,
            closed_at: None,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.tickets.push(created.clone());
        Ok(created)
    }

    async fn update_ticket(&self, id: TicketId, update: &TicketUpdate) -> ApiResult<Ticket> {
        const OP: &str = "Failed to update ticket";
        let mut state = self.enter("update_ticket", OP, id.to_string())?;
        let now = state.tick();
        let ticket = state
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| rejected(OP, 404, "Ticket not found"))?;
        if let Some(subject) = &update.subject {
            ticket.subject = subject.clone();
        }
        if let Some(description) = &update.description {
            ticket.description = description.clone();
        }
        if let Some(priority) = update.priority {
            ticket.priority = priority;
        }
        ticket.updated_at = now;
        Ok(ticket.clone())
    }

    async fn delete_ticket(&self, id: TicketId) -> ApiResult<()> {
        let mut state = self.enter("delete_ticket", "Failed to delete ticket", id.to_string())?;
        let before = state.tickets.len();
        state.tickets.retain(|t| t.id != id);
        if state.tickets.len() == before {
            return Err(rejected("Failed to delete ticket", 404, "Ticket not found"));
        }
        state.comments.retain(|c| c.ticket_id != id);
        Ok(())
    }

    async fn assign_ticket(&self, id: TicketId, assignee: UserId) -> ApiResult<()> {
        const OP: &str = "Failed to assign ticket";
        let mut state = self.enter("assign_ticket", OP, format!("{id} {assignee}"))?;
        let user = state
            .user(assignee)
            .ok_or_else(|| rejected(OP, 404, "Assignee not found"))?;
        let ticket = state
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| rejected(OP, 404, "Ticket not found"))?;
        ticket.assignee = Some(user);
        Ok(())
    }

    async fn change_ticket_status(&self, id: TicketId, status: TicketStatus) -> ApiResult<()> {
        const OP: &str = "Failed to change ticket status";
        let mut state = self.enter("change_ticket_status", OP, format!("{id} {status}"))?;
        let now = state.tick();
        let ticket = state
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| rejected(OP, 404, "Ticket not found"))?;
        ticket.status = status;
        if status == TicketStatus::Closed {
            ticket.closed_at = Some(now);
        }
        Ok(())
    }

    async fn list_tickets_by_status(
        &self,
        status: TicketStatus,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>> {
        let state = self.enter(
            "list_tickets_by_status",
            "Failed to fetch tickets by status",
            format!("{status} {} {}", page.page, page.size),
        )?;
        let matching = state
            .tickets
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }

    async fn list_tickets_by_priority(
        &self,
        priority: Priority,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>> {
        let state = self.enter(
            "list_tickets_by_priority",
            "Failed to fetch tickets by priority",
            format!("{priority} {} {}", page.page, page.size),
        )?;
        let matching = state
            .tickets
            .iter()
            .filter(|t| t.priority == priority)
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }

    async fn search_tickets(&self, term: &str, page: PageRequest) -> ApiResult<Page<Ticket>> {
        let state = self.enter(
            "search_tickets",
            "Failed to search tickets",
            format!("{term} {} {}", page.page, page.size),
        )?;
        let needle = term.to_lowercase();
        let matching = state
            .tickets
            .iter()
            .filter(|t| {
                t.subject.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }

    async fn list_tickets_by_owner(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>> {
        let state = self.enter(
            "list_tickets_by_owner",
            "Failed to fetch tickets by owner",
            owner.to_string(),
        )?;
        let matching = state
            .tickets
            .iter()
            .filter(|t| t.owner.id == owner)
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }

    async fn list_tickets_by_assignee(
        &self,
        assignee: UserId,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>> {
        let state = self.enter(
            "list_tickets_by_assignee",
            "Failed to fetch tickets by assignee",
            assignee.to_string(),
        )?;
        let matching = state
            .tickets
            .iter()
            .filter(|t| t.assignee.as_ref().is_some_and(|u| u.id == assignee))
            .cloned()
            .collect();
        Ok(paginate(matching, page))
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let state = self.enter("list_users", "Failed to fetch users", String::new())?;
        Ok(state.users.clone())
    }

    async fn get_user(&self, id: UserId) -> ApiResult<User> {
        let state = self.enter("get_user", "Failed to fetch user", id.to_string())?;
        state
            .user(id)
            .ok_or_else(|| rejected("Failed to fetch user", 404, "User not found"))
    }

    async fn get_user_by_email(&self, email: &str) -> ApiResult<User> {
        let state = self.enter("get_user_by_email", "Failed to fetch user", email.to_string())?;
        state
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| rejected("Failed to fetch user", 404, "User not found"))
    }

    async fn list_active_users(&self) -> ApiResult<Vec<User>> {
        let state = self.enter(
            "list_active_users",
            "Failed to fetch active users",
            String::new(),
        )?;
        Ok(state.users.iter().filter(|u| u.active).cloned().collect())
    }

    async fn create_user(&self, user: &UserInput) -> ApiResult<User> {
        let mut state = self.enter("create_user", "Failed to create user", user.email.clone())?;
        let now = state.tick();
        let created = User {
            id: state.next_id(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            active: true,
            role_names: BTreeSet::new(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, id: UserId, user: &UserInput) -> ApiResult<User> {
        const OP: &str = "Failed to update user";
        let mut state = self.enter("update_user", OP, id.to_string())?;
        let now = state.tick();
        let existing = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| rejected(OP, 404, "User not found"))?;
        existing.full_name = user.full_name.clone();
        existing.email = user.email.clone();
        existing.updated_at = Some(now);
        Ok(existing.clone())
    }

    async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        let mut state = self.enter("delete_user", "Failed to delete user", id.to_string())?;
        state.users.retain(|u| u.id != id);
        Ok(())
    }

    async fn deactivate_user(&self, id: UserId) -> ApiResult<()> {
        const OP: &str = "Failed to deactivate user";
        let mut state = self.enter("deactivate_user", OP, id.to_string())?;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| rejected(OP, 404, "User not found"))?;
        user.active = false;
        Ok(())
    }

    async fn list_comments(&self, ticket: TicketId) -> ApiResult<Vec<Comment>> {
        let state = self.enter("list_comments", "Failed to fetch comments", ticket.to_string())?;
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.ticket_id == ticket)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn get_comment(&self, id: CommentId) -> ApiResult<Comment> {
        let state = self.enter("get_comment", "Failed to fetch comment", id.to_string())?;
        state
            .comments
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| rejected("Failed to fetch comment", 404, "Comment not found"))
    }

    async fn list_comments_by_author(&self, author: UserId) -> ApiResult<Vec<Comment>> {
        let state = self.enter(
            "list_comments_by_author",
            "Failed to fetch comments by author",
            author.to_string(),
        )?;
        Ok(state
            .comments
            .iter()
            .filter(|c| c.author.id == author)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, comment: &NewComment, author: UserId) -> ApiResult<Comment> {
        const OP: &str = "Failed to create comment";
        let mut state = self.enter(
            "create_comment",
            OP,
            format!("{} {author}", comment.ticket_id),
        )?;
        if !state.tickets.iter().any(|t| t.id == comment.ticket_id) {
            return Err(rejected(OP, 404, "Ticket not found"));
        }
        let author = state
            .user(author)
            .ok_or_else(|| rejected(OP, 404, "Author not found"))?;
        let now = state.tick();
        let created = Comment {
            id: state.next_id(),
            body: comment.body.clone(),
            author,
            ticket_id: comment.ticket_id,
            created_at: now,
            updated_at: now,
        };
        state.comments.push(created.clone());
        Ok(created)
    }

    async fn update_comment(
        &self,
        id: CommentId,
        body: &str,
        author: UserId,
    ) -> ApiResult<Comment> {
        const OP: &str = "Failed to update comment";
        let mut state = self.enter("update_comment", OP, format!("{id} {author}"))?;
        let now = state.tick();
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| rejected(OP, 404, "Comment not found"))?;
        if comment.author.id != author {
            return Err(rejected(OP, 403, "Not the author"));
        }
        comment.body = body.to_string();
        comment.updated_at = now;
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: CommentId, author: UserId) -> ApiResult<()> {
        const OP: &str = "Failed to delete comment";
        let mut state = self.enter("delete_comment", OP, format!("{id} {author}"))?;
        let comment = state
            .comments
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| rejected(OP, 404, "Comment not found"))?;
        if comment.author.id != author {
            return Err(rejected(OP, 403, "Not the author"));
        }
        state.comments.retain(|c| c.id != id);
        Ok(())
    }

    async fn count_comments(&self, ticket: TicketId) -> ApiResult<u64> {
        let state = self.enter(
            "count_comments",
            "Failed to fetch comment count",
            ticket.to_string(),
        )?;
        Ok(state.comments.iter().filter(|c| c.ticket_id == ticket).count() as u64)
    }
}

/// Captures what pages log and alert.
#[derive(Default)]
pub struct RecordingReporter {
    errors: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn error(&self, context: &str, error: &RequestFailed) {
        self.errors.lock().unwrap().push(format!("{context}: {error}"));
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
