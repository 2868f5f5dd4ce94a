use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use helpdesk::api::{CommentId, TicketId, UserId, DEFAULT_PAGE_SIZE};
use helpdesk::types::{Priority, TicketStatus};

#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(about = "A CLI for the help-desk ticketing service", version)]
#[command(after_help = "EXAMPLES:
    helpdesk dashboard                     Ticket counts and recent tickets
    helpdesk tickets --status open         List open tickets
    helpdesk ticket view 42                Show a ticket with its comments
    helpdesk ticket create -s \"Printer offline\" -d \"3rd floor\"
    helpdesk ticket comment 42 \"On it\"     Add a comment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Act as this user id (overrides HELPDESK_USER_ID and the config file)
    #[arg(long, global = true, value_name = "USER_ID")]
    pub as_user: Option<UserId>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ticket counts and the most recent tickets
    #[command(alias = "d")]
    Dashboard,
    /// Manage tickets
    #[command(
        alias = "t",
        after_help = "EXAMPLES:
    helpdesk ticket list --priority high
    helpdesk ticket view 42
    helpdesk ticket status 42 in-progress
    helpdesk ticket assign 42 3"
    )]
    Ticket {
        #[command(subcommand)]
        action: TicketCommands,
    },
    /// List tickets (alias for 'ticket list')
    #[command(after_help = "EXAMPLES:
    helpdesk tickets
    helpdesk tickets --status closed --page 2
    helpdesk tickets --search printer")]
    Tickets(TicketListArgs),
    /// Manage comments
    #[command(alias = "c")]
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Manage users
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// List users (alias for 'user list')
    Users(UserListArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    helpdesk completions bash > ~/.bash_completion.d/helpdesk
    helpdesk completions zsh > ~/.zfunc/_helpdesk")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Subcommand)]
pub enum TicketCommands {
    /// List tickets
    List(TicketListArgs),
    /// Show ticket details and comments
    View {
        /// Ticket id
        id: TicketId,
    },
    /// Show a ticket by its code (e.g., TKT12345678)
    Code {
        /// Ticket code
        code: String,
    },
    /// Create a new ticket
    #[command(after_help = "EXAMPLES:
    helpdesk ticket create -s \"Printer offline\" -d \"Printer on 3rd floor unresponsive\"
    helpdesk ticket create -s \"VPN down\" -d \"Cannot connect\" --priority high --owner 3")]
    Create(TicketCreateArgs),
    /// Update subject, description or priority
    Update(TicketUpdateArgs),
    /// Delete a ticket
    Delete {
        /// Ticket id
        id: TicketId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Assign a ticket to a user
    Assign {
        /// Ticket id
        id: TicketId,
        /// Assignee user id
        assignee: UserId,
    },
    /// Change ticket status
    Status {
        /// Ticket id
        id: TicketId,
        /// New status
        #[arg(value_enum)]
        status: TicketStatus,
    },
    /// Add a comment to a ticket
    Comment(CommentArgs),
    /// Delete a comment from a ticket
    Uncomment {
        /// Ticket id
        id: TicketId,
        /// Comment id
        comment: CommentId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Tickets owned by the acting user
    Mine(PagingArgs),
    /// Tickets assigned to a user (defaults to the acting user)
    Assigned {
        /// Assignee user id
        user: Option<UserId>,
        #[command(flatten)]
        paging: PagingArgs,
    },
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Show a single comment
    View {
        /// Comment id
        id: CommentId,
    },
    /// Replace the body of a comment
    Edit {
        /// Comment id
        id: CommentId,
        /// New body
        body: String,
    },
    /// Count comments on a ticket
    Count {
        /// Ticket id
        ticket: TicketId,
    },
    /// Comments written by a user (defaults to the acting user)
    ByAuthor {
        /// Author user id
        user: Option<UserId>,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List(UserListArgs),
    /// Show a user by id
    View {
        /// User id
        id: UserId,
    },
    /// Show a user by email
    Email {
        /// Email address
        email: String,
    },
    /// Create a user
    Create(UserInputArgs),
    /// Replace a user's name, email and password
    Update {
        /// User id
        id: UserId,
        #[command(flatten)]
        input: UserInputArgs,
    },
    /// Delete a user
    Delete {
        /// User id
        id: UserId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Deactivate a user
    Deactivate {
        /// User id
        id: UserId,
    },
}

#[derive(Args, Clone)]
pub struct TicketListArgs {
    /// Filter by status (takes precedence over --priority and --search)
    #[arg(long, value_enum)]
    pub status: Option<TicketStatus>,

    /// Filter by priority (takes precedence over --search)
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub paging: PagingArgs,
}

#[derive(Args, Clone, Copy)]
pub struct PagingArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Tickets per page
    #[arg(long, short, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub limit: u32,
}

impl PagingArgs {
    pub fn page_index(&self) -> u32 {
        self.page.saturating_sub(1)
    }
}

#[derive(Args)]
pub struct TicketCreateArgs {
    /// Ticket subject
    #[arg(long, short)]
    pub subject: String,

    /// Ticket description
    #[arg(long, short)]
    pub description: String,

    /// Priority
    #[arg(long, short, value_enum, default_value = "medium")]
    pub priority: Priority,

    /// Owner user id (defaults to the acting user, then the first active user)
    #[arg(long)]
    pub owner: Option<UserId>,
}

#[derive(Args)]
pub struct TicketUpdateArgs {
    /// Ticket id
    pub id: TicketId,

    /// New subject
    #[arg(long, short)]
    pub subject: Option<String>,

    /// New description
    #[arg(long, short)]
    pub description: Option<String>,

    /// New priority
    #[arg(long, short, value_enum)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct CommentArgs {
    /// Ticket id
    pub id: TicketId,

    /// Comment body
    pub body: String,
}

#[derive(Args, Clone, Copy)]
pub struct UserListArgs {
    /// Only active users
    #[arg(long)]
    pub active: bool,
}

#[derive(Args)]
pub struct UserInputArgs {
    /// Full name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Email address
    #[arg(long, short)]
    pub email: String,

    /// Password
    #[arg(long, short)]
    pub password: String,
}
