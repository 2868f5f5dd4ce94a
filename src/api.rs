//! The backend contract: one async method per REST endpoint.
//!
//! Every method issues exactly one request. Mutations that answer without a
//! body (`assign_ticket`, `change_ticket_status`, deletes, `deactivate_user`)
//! return `()`; callers re-fetch to observe their effect.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiResult;
use crate::responses::Page;
use crate::types::{
    Comment, NewComment, NewTicket, Priority, Ticket, TicketStatus, TicketUpdate, User, UserInput,
};

pub type UserId = i64;
pub type TicketId = i64;
pub type CommentId = i64;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Zero-based page index plus page size.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new("createdAt", SortDirection::Desc)
    }
}

#[async_trait]
pub trait HelpdeskApi: Send + Sync {
    // Tickets
    async fn list_tickets(&self, page: PageRequest, sort: &Sort) -> ApiResult<Page<Ticket>>;
    async fn get_ticket(&self, id: TicketId) -> ApiResult<Ticket>;
    async fn get_ticket_by_code(&self, code: &str) -> ApiResult<Ticket>;
    async fn create_ticket(&self, ticket: &NewTicket, owner: UserId) -> ApiResult<Ticket>;
    async fn update_ticket(&self, id: TicketId, update: &TicketUpdate) -> ApiResult<Ticket>;
    async fn delete_ticket(&self, id: TicketId) -> ApiResult<()>;
    async fn assign_ticket(&self, id: TicketId, assignee: UserId) -> ApiResult<()>;
    async fn change_ticket_status(&self, id: TicketId, status: TicketStatus) -> ApiResult<()>;
    async fn list_tickets_by_status(
        &self,
        status: TicketStatus,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>>;
    async fn list_tickets_by_priority(
        &self,
        priority: Priority,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>>;
    async fn search_tickets(&self, term: &str, page: PageRequest) -> ApiResult<Page<Ticket>>;
    async fn list_tickets_by_owner(&self, owner: UserId, page: PageRequest)
        -> ApiResult<Page<Ticket>>;
    async fn list_tickets_by_assignee(
        &self,
        assignee: UserId,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>>;

    // Users
    async fn list_users(&self) -> ApiResult<Vec<User>>;
    async fn get_user(&self, id: UserId) -> ApiResult<User>;
    async fn get_user_by_email(&self, email: &str) -> ApiResult<User>;
    async fn list_active_users(&self) -> ApiResult<Vec<User>>;
    async fn create_user(&self, user: &UserInput) -> ApiResult<User>;
    async fn update_user(&self, id: UserId, user: &UserInput) -> ApiResult<User>;
    async fn delete_user(&self, id: UserId) -> ApiResult<()>;
    async fn deactivate_user(&self, id: UserId) -> ApiResult<()>;

    // Comments
    async fn list_comments(&self, ticket: TicketId) -> ApiResult<Vec<Comment>>;
    async fn get_comment(&self, id: CommentId) -> ApiResult<Comment>;
    async fn list_comments_by_author(&self, author: UserId) -> ApiResult<Vec<Comment>>;
    async fn create_comment(&self, comment: &NewComment, author: UserId) -> ApiResult<Comment>;
    async fn update_comment(&self, id: CommentId, body: &str, author: UserId)
        -> ApiResult<Comment>;
    async fn delete_comment(&self, id: CommentId, author: UserId) -> ApiResult<()>;
    async fn count_comments(&self, ticket: TicketId) -> ApiResult<u64>;
}
