use super::{Phase, Reporter};
use crate::api::{HelpdeskApi, UserId};
use crate::types::{NewTicket, Priority, Ticket, User};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketForm {
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub owner: Option<UserId>,
}

impl TicketForm {
    pub fn is_complete(&self) -> bool {
        !self.subject.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.owner.is_some()
    }
}

pub struct CreateTicketPage<'a, A: HelpdeskApi + ?Sized> {
    api: &'a A,
    reporter: &'a dyn Reporter,
    users: Vec<User>,
    form: TicketForm,
    phase: Phase,
}

impl<'a, A: HelpdeskApi + ?Sized> CreateTicketPage<'a, A> {
    pub fn new(api: &'a A, reporter: &'a dyn Reporter) -> Self {
        Self {
            api,
            reporter,
            users: Vec::new(),
            form: TicketForm::default(),
            phase: Phase::Ready,
        }
    }

    /// Fetch candidate owners; the first one becomes the default owner
    /// unless the form already names one.
    pub async fn load(&mut self) {
        match self.api.list_active_users().await {
            Ok(users) => {
                if self.form.owner.is_none() {
                    self.form.owner = users.first().map(|u| u.id);
                }
                self.users = users;
            }
            Err(e) => self.reporter.error("Error fetching users", &e),
        }
    }

    pub fn form(&self) -> &TicketForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TicketForm {
        &mut self.form
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Validate locally, then issue exactly one create call.
    pub async fn submit(&mut self) -> Option<Ticket> {
        let owner = match self.form.owner {
            Some(owner) if self.form.is_complete() => owner,
            _ => {
                self.reporter.alert("Please fill in all required fields");
                return None;
            }
        };

        let ticket = NewTicket {
            subject: self.form.subject.clone(),
            description: self.form.description.clone(),
            priority: self.form.priority,
        };

        self.phase = Phase::Loading;
        let result = self.api.create_ticket(&ticket, owner).await;
        self.phase = Phase::Ready;

        match result {
            Ok(created) => Some(created),
            Err(e) => {
                self.reporter.error("Error creating ticket", &e);
                self.reporter.alert("Failed to create ticket. Please try again.");
                None
            }
        }
    }
}
