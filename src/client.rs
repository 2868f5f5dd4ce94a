use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::api::{CommentId, HelpdeskApi, PageRequest, Sort, SortDirection, TicketId, UserId};
use crate::error::{ApiResult, FailureCause, RequestFailed};
use crate::responses::Page;
use crate::types::{
    Comment, NewComment, NewTicket, Priority, Ticket, TicketStatus, TicketUpdate, User, UserInput,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// REST client for the help-desk backend. No retries, no caching: every
/// call is one request, and every failure collapses into [`RequestFailed`].
pub struct HelpdeskClient {
    http: Client,
    base_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SortedPageQuery<'a> {
    page: u32,
    size: u32,
    sort_by: &'a str,
    sort_dir: SortDirection,
}

impl HelpdeskClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        tracing::debug!(%method, %url, "sending request");
        self.http.request(method, url)
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| RequestFailed::new(operation, FailureCause::Transport(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            tracing::warn!(status = status.as_u16(), operation, "request rejected");
            return Err(RequestFailed::new(
                operation,
                FailureCause::Status {
                    status: status.as_u16(),
                    body,
                },
            ));
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.send(operation, request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RequestFailed::new(operation, FailureCause::Transport(e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| RequestFailed::new(operation, FailureCause::Decode(e)))
    }

    async fn execute(&self, operation: &'static str, request: RequestBuilder) -> ApiResult<()> {
        self.send(operation, request).await.map(|_| ())
    }
}

#[async_trait]
impl HelpdeskApi for HelpdeskClient {
    async fn list_tickets(&self, page: PageRequest, sort: &Sort) -> ApiResult<Page<Ticket>> {
        let query = SortedPageQuery {
            page: page.page,
            size: page.size,
            sort_by: &sort.field,
            sort_dir: sort.direction,
        };
        let request = self.request(Method::GET, &["tickets"]).query(&query);
        self.fetch("Failed to fetch tickets", request).await
    }

    async fn get_ticket(&self, id: TicketId) -> ApiResult<Ticket> {
        let request = self.request(Method::GET, &["tickets", &id.to_string()]);
        self.fetch("Failed to fetch ticket", request).await
    }

    async fn get_ticket_by_code(&self, code: &str) -> ApiResult<Ticket> {
        let request = self.request(Method::GET, &["tickets", "code", code]);
        self.fetch("Failed to fetch ticket", request).await
    }

    async fn create_ticket(&self, ticket: &NewTicket, owner: UserId) -> ApiResult<Ticket> {
        let request = self
            .request(Method::POST, &["tickets"])
            .query(&[("ownerId", owner)])
            .json(ticket);
        self.fetch("Failed to create ticket", request).await
    }

    async fn update_ticket(&self, id: TicketId, update: &TicketUpdate) -> ApiResult<Ticket> {
        let request = self
            .request(Method::PUT, &["tickets", &id.to_string()])
            .json(update);
        self.fetch("Failed to update ticket", request).await
    }

    async fn delete_ticket(&self, id: TicketId) -> ApiResult<()> {
        let request = self.request(Method::DELETE, &["tickets", &id.to_string()]);
        self.execute("Failed to delete ticket", request).await
    }

    async fn assign_ticket(&self, id: TicketId, assignee: UserId) -> ApiResult<()> {
        let request = self.request(
            Method::PATCH,
            &["tickets", &id.to_string(), "assign", &assignee.to_string()],
        );
        self.execute("Failed to assign ticket", request).await
    }

    async fn change_ticket_status(&self, id: TicketId, status: TicketStatus) -> ApiResult<()> {
        let request = self.request(
            Method::PATCH,
            &["tickets", &id.to_string(), "status", status.as_str()],
        );
        self.execute("Failed to change ticket status", request).await
    }

    async fn list_tickets_by_status(
        &self,
        status: TicketStatus,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>> {
        let request = self
            .request(Method::GET, &["tickets", "status", status.as_str()])
            .query(&page);
        self.fetch("Failed to fetch tickets by status", request).await
    }

    async fn list_tickets_by_priority(
        &self,
        priority: Priority,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>> {
        let request = self
            .request(Method::GET, &["tickets", "priority", priority.as_str()])
            .query(&page);
        self.fetch("Failed to fetch tickets by priority", request).await
    }

    async fn search_tickets(&self, term: &str, page: PageRequest) -> ApiResult<Page<Ticket>> {
        let request = self
            .request(Method::GET, &["tickets", "search"])
            .query(&[("searchTerm", term)])
            .query(&page);
        self.fetch("Failed to search tickets", request).await
    }

    async fn list_tickets_by_owner(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>> {
        let request = self
            .request(Method::GET, &["tickets", "owner", &owner.to_string()])
            .query(&page);
        self.fetch("Failed to fetch tickets by owner", request).await
    }

    async fn list_tickets_by_assignee(
        &self,
        assignee: UserId,
        page: PageRequest,
    ) -> ApiResult<Page<Ticket>> {
        let request = self
            .request(Method::GET, &["tickets", "assignee", &assignee.to_string()])
            .query(&page);
        self.fetch("Failed to fetch tickets by assignee", request).await
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let request = self.request(Method::GET, &["users"]);
        self.fetch("Failed to fetch users", request).await
    }

    async fn get_user(&self, id: UserId) -> ApiResult<User> {
        let request = self.request(Method::GET, &["users", &id.to_string()]);
        self.fetch("Failed to fetch user", request).await
    }

    async fn get_user_by_email(&self, email: &str) -> ApiResult<User> {
        let request = self.request(Method::GET, &["users", "email", email]);
        self.fetch("Failed to fetch user", request).await
    }

    async fn list_active_users(&self) -> ApiResult<Vec<User>> {
        let request = self.request(Method::GET, &["users", "active"]);
        self.fetch("Failed to fetch active users", request).await
    }

    async fn create_user(&self, user: &UserInput) -> ApiResult<User> {
        let request = self.request(Method::POST, &["users"]).json(user);
        self.fetch("Failed to create user", request).await
    }

    async fn update_user(&self, id: UserId, user: &UserInput) -> ApiResult<User> {
        let request = self
            .request(Method::PUT, &["users", &id.to_string()])
            .json(user);
        self.fetch("Failed to update user", request).await
    }

    async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        let request = self.request(Method::DELETE, &["users", &id.to_string()]);
        self.execute("Failed to delete user", request).await
    }

    async fn deactivate_user(&self, id: UserId) -> ApiResult<()> {
        let request = self.request(Method::PATCH, &["users", &id.to_string(), "deactivate"]);
        self.execute("Failed to deactivate user", request).await
    }

    async fn list_comments(&self, ticket: TicketId) -> ApiResult<Vec<Comment>> {
        let request = self.request(Method::GET, &["comments", "ticket", &ticket.to_string()]);
        self.fetch("Failed to fetch comments", request).await
    }

    async fn get_comment(&self, id: CommentId) -> ApiResult<Comment> {
        let request = self.request(Method::GET, &["comments", &id.to_string()]);
        self.fetch("Failed to fetch comment", request).await
    }

    async fn list_comments_by_author(&self, author: UserId) -> ApiResult<Vec<Comment>> {
        let request = self.request(Method::GET, &["comments", "author", &author.to_string()]);
        self.fetch("Failed to fetch comments by author", request).await
    }

    async fn create_comment(&self, comment: &NewComment, author: UserId) -> ApiResult<Comment> {
        let request = self
            .request(Method::POST, &["comments"])
            .query(&[("authorId", author)])
            .json(comment);
        self.fetch("Failed to create comment", request).await
    }

    async fn update_comment(
        &self,
        id: CommentId,
        body: &str,
        author: UserId,
    ) -> ApiResult<Comment> {
        let author = author.to_string();
        let request = self
            .request(Method::PUT, &["comments", &id.to_string()])
            .query(&[("body", body), ("authorId", author.as_str())]);
        self.fetch("Failed to update comment", request).await
    }

    async fn delete_comment(&self, id: CommentId, author: UserId) -> ApiResult<()> {
        let request = self
            .request(Method::DELETE, &["comments", &id.to_string()])
            .query(&[("authorId", author)]);
        self.execute("Failed to delete comment", request).await
    }

    async fn count_comments(&self, ticket: TicketId) -> ApiResult<u64> {
        let request = self.request(
            Method::GET,
            &["comments", "ticket", &ticket.to_string(), "count"],
        );
        self.fetch("Failed to fetch comment count", request).await
    }
}
