use super::{Phase, Reporter};
use crate::api::{HelpdeskApi, PageRequest, Sort, TicketId, DEFAULT_PAGE_SIZE};
use crate::error::ApiResult;
use crate::responses::Page;
use crate::types::{Priority, Ticket, TicketStatus};

/// Filter inputs as the user set them. Several may be set at once, but only
/// one is ever sent to the backend; see [`TicketFilters::active`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilters {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFilter<'a> {
    Status(TicketStatus),
    Priority(Priority),
    Search(&'a str),
    Unfiltered,
}

impl TicketFilters {
    /// Status beats priority beats a non-empty search term.
    pub fn active(&self) -> ActiveFilter<'_> {
        if let Some(status) = self.status {
            ActiveFilter::Status(status)
        } else if let Some(priority) = self.priority {
            ActiveFilter::Priority(priority)
        } else if let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            ActiveFilter::Search(term)
        } else {
            ActiveFilter::Unfiltered
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active() == ActiveFilter::Unfiltered
    }
}

pub struct TicketListPage<'a, A: HelpdeskApi + ?Sized> {
    api: &'a A,
    reporter: &'a dyn Reporter,
    tickets: Vec<Ticket>,
    filters: TicketFilters,
    page: u32,
    page_size: u32,
    total_pages: u32,
    total_elements: u64,
    phase: Phase,
}

impl<'a, A: HelpdeskApi + ?Sized> TicketListPage<'a, A> {
    pub fn new(api: &'a A, reporter: &'a dyn Reporter) -> Self {
        Self {
            api,
            reporter,
            tickets: Vec::new(),
            filters: TicketFilters::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            total_elements: 0,
            phase: Phase::Loading,
        }
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Start at a given page without fetching; used when the caller already
    /// knows where it wants to land.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_filters(mut self, filters: TicketFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Fetch the current page through the highest-precedence filter.
    pub async fn refresh(&mut self) {
        self.phase = Phase::Loading;

        match self.fetch().await {
            Ok(page) => {
                self.tickets = page.content;
                self.total_pages = page.total_pages;
                self.total_elements = page.total_elements;
            }
            Err(e) => self.reporter.error("Error fetching tickets", &e),
        }

        self.phase = Phase::Ready;
    }

    async fn fetch(&self) -> ApiResult<Page<Ticket>> {
        let request = PageRequest::new(self.page, self.page_size);
        match self.filters.active() {
            ActiveFilter::Status(status) => self.api.list_tickets_by_status(status, request).await,
            ActiveFilter::Priority(priority) => {
                self.api.list_tickets_by_priority(priority, request).await
            }
            ActiveFilter::Search(term) => self.api.search_tickets(term, request).await,
            ActiveFilter::Unfiltered => self.api.list_tickets(request, &Sort::default()).await,
        }
    }

    pub async fn set_status_filter(&mut self, status: Option<TicketStatus>) {
        self.filters.status = status;
        self.reset_and_refresh().await;
    }

    pub async fn set_priority_filter(&mut self, priority: Option<Priority>) {
        self.filters.priority = priority;
        self.reset_and_refresh().await;
    }

    pub async fn set_search(&mut self, term: Option<String>) {
        self.filters.search = term;
        self.reset_and_refresh().await;
    }

    pub async fn clear_filters(&mut self) {
        self.filters = TicketFilters::default();
        self.reset_and_refresh().await;
    }

    async fn reset_and_refresh(&mut self) {
        self.page = 0;
        self.refresh().await;
    }

    /// Jump to `page`, clamped to the known page range.
    pub async fn go_to_page(&mut self, page: u32) {
        let last = self.total_pages.saturating_sub(1);
        let target = page.min(last);
        if target != self.page {
            self.page = target;
            self.refresh().await;
        }
    }

    pub async fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1)).await;
    }

    pub async fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1)).await;
    }

    pub async fn change_status(&mut self, id: TicketId, status: TicketStatus) -> bool {
        match self.api.change_ticket_status(id, status).await {
            Ok(()) => {
                self.refresh().await;
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

    pub async fn delete(&mut self, id: TicketId) -> bool {
        match self.api.delete_ticket(id).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                self.reporter.error("Error deleting ticket", &e);
                self.reporter.alert("Failed to delete ticket. Please try again.");
                false
            }
        }
    }

    /// 1-based inclusive bounds of the rows on screen, e.g. (11, 20).
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        if self.total_elements == 0 {
            return None;
        }
        let size = u64::from(self.page_size);
        let first = u64::from(self.page) * size + 1;
        let last = (first - 1 + size).min(self.total_elements);
        Some((first, last))
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn filters(&self) -> &TicketFilters {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}
