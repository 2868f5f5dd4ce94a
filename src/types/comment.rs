use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::api::{CommentId, TicketId};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub author: User,
    pub ticket_id: TicketId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        &self.author.full_name
    }
}

/// The author is not part of the body; it travels as the `authorId` query parameter.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub body: String,
    pub ticket_id: TicketId,
}
