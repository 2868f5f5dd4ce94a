use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{null_as_default, Comment, Priority, User};
use crate::api::TicketId;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub code: String,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub owner: User,
    pub assignee: Option<User>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Usually `null` from the backend; comments come from their own endpoint.
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn assignee_name(&self) -> &str {
        self.assignee
            .as_ref()
            .map(|u| u.full_name.as_str())
            .unwrap_or("-")
    }
}

/// Ticket lifecycle states. Any value may be sent; the backend decides
/// which transitions it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
        }
    }

    pub fn colored(self) -> String {
        let label = self.as_str();
        match self {
            Self::Open => label.green().to_string(),
            Self::InProgress => label.yellow().to_string(),
            Self::Closed => label.bright_black().to_string(),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(format!("unknown status: {s}")),
        }
    }
}

/// User-supplied fields of a new ticket. The owner is passed separately as
/// the `ownerId` query parameter.
#[derive(Serialize, Debug, Clone)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub priority: Priority,
}

/// Partial ticket update; absent fields are left untouched by the backend.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TicketUpdate {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.description.is_none() && self.priority.is_none()
    }
}
