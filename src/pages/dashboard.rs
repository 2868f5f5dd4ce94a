use serde::Serialize;

use super::{Phase, Reporter};
use crate::api::{HelpdeskApi, PageRequest, Sort};
use crate::types::{Priority, Ticket, TicketStatus};

/// Page size used for the aggregate reads; only `total_elements` matters.
const SAMPLE_SIZE: u32 = 1000;
const RECENT_LIMIT: usize = 5;

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: u64,
    pub open: u64,
    pub closed: u64,
    pub high_priority: u64,
}

pub struct DashboardPage<'a, A: HelpdeskApi + ?Sized> {
    api: &'a A,
    reporter: &'a dyn Reporter,
    stats: DashboardStats,
    recent: Vec<Ticket>,
    phase: Phase,
}

impl<'a, A: HelpdeskApi + ?Sized> DashboardPage<'a, A> {
    pub fn new(api: &'a A, reporter: &'a dyn Reporter) -> Self {
        Self {
            api,
            reporter,
            stats: DashboardStats::default(),
            recent: Vec::new(),
            phase: Phase::Loading,
        }
    }

    /// Four aggregate reads issued together. Any failure leaves the previous
    /// stats in place.
    pub async fn load(&mut self) {
        self.phase = Phase::Loading;

        let api = self.api;
        let sample = PageRequest::new(0, SAMPLE_SIZE);
        let sort = Sort::default();
        let result = tokio::try_join!(
            api.list_tickets(sample, &sort),
            api.list_tickets_by_status(TicketStatus::Open, sample),
            api.list_tickets_by_status(TicketStatus::Closed, sample),
            api.list_tickets_by_priority(Priority::High, sample),
        );

        match result {
            Ok((all, open, closed, high)) => {
                self.stats = DashboardStats {
                    total: all.total_elements,
                    open: open.total_elements,
                    closed: closed.total_elements,
                    high_priority: high.total_elements,
                };
                self.recent = all.content.into_iter().take(RECENT_LIMIT).collect();
            }
            Err(e) => self.reporter.error("Error fetching dashboard data", &e),
        }

        self.phase = Phase::Ready;
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn recent(&self) -> &[Ticket] {
        &self.recent
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}
