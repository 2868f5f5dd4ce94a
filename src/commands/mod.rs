pub mod comments;
pub mod dashboard;
pub mod init;
pub mod tickets;
pub mod users;

use std::io::{self, Write};

use helpdesk::api::UserId;
use helpdesk::client::HelpdeskClient;
use helpdesk::config::Config;
use helpdesk::error::Result;
use helpdesk::pages::Reporter;

/// Everything a command needs to talk to the backend on someone's behalf.
pub struct Session<'a> {
    pub client: &'a HelpdeskClient,
    pub reporter: &'a dyn Reporter,
    pub config: &'a Config,
    pub as_user: Option<UserId>,
}

impl Session<'_> {
    pub fn acting_user(&self) -> Result<UserId> {
        self.config.acting_user(self.as_user)
    }

    pub fn default_owner(&self) -> Result<Option<UserId>> {
        self.config.default_owner(self.as_user)
    }
}

/// Ask a yes/no question on stdin; anything but "y" means no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
