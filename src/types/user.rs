use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::api::UserId;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_names: BTreeSet<String>,
    /// Only set on full user reads; embedded owners, assignees and authors
    /// carry `null`.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of both user create and user update.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
}
