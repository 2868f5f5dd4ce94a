//! Per-screen controllers built on [`HelpdeskApi`](crate::api::HelpdeskApi).
//!
//! Each page owns its state and follows the same cycle: enter `Loading`,
//! fetch (concurrently when several reads are needed), replace state on
//! success, keep the previous state on failure, and always end `Ready`.
//! Mutations are followed by a full re-fetch, except comment create/delete
//! on the detail page which splice the change into local state.

mod create;
mod dashboard;
mod detail;
mod list;

pub use create::{CreateTicketPage, TicketForm};
pub use dashboard::{DashboardPage, DashboardStats};
pub use detail::TicketDetailPage;
pub use list::{ActiveFilter, TicketFilters, TicketListPage};

use std::sync::atomic::{AtomicUsize, Ordering};

use colored::Colorize;

use crate::error::RequestFailed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// Where pages surface failures: `error` is the operator log, `alert` the
/// blocking user-facing message shown after a failed action.
pub trait Reporter: Send + Sync {
    fn error(&self, context: &str, error: &RequestFailed);
    fn alert(&self, message: &str);
}

/// Logs through `tracing` and prints alerts to stderr. Counts failures so
/// a one-shot caller can still exit non-zero.
#[derive(Default)]
pub struct ConsoleReporter {
    failures: AtomicUsize,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

impl Reporter for ConsoleReporter {
    fn error(&self, context: &str, error: &RequestFailed) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        tracing::error!(cause = %error.cause, "{context}: {error}");
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message.red());
    }
}
