mod cli;
mod commands;
mod output;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, CommentCommands, Commands, TicketCommands, UserCommands};
use commands::Session;
use helpdesk::client::HelpdeskClient;
use helpdesk::config::Config;
use helpdesk::error::Result;
use helpdesk::pages::ConsoleReporter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let reporter = ConsoleReporter::new();

    if let Err(e) = run(cli, &reporter).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }

    // Page-level failures were already reported; still signal them.
    if reporter.failures() > 0 {
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("HELPDESK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, reporter: &ConsoleReporter) -> Result<()> {
    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "helpdesk", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let client = HelpdeskClient::new(config.base_url()?);
            let session = Session {
                client: &client,
                reporter,
                config: &config,
                as_user: cli.as_user,
            };

            match command {
                Commands::Dashboard => {
                    commands::dashboard::show(&session).await?;
                }
                Commands::Tickets(args) => {
                    commands::tickets::list(&session, args).await?;
                }
                Commands::Ticket { action } => match action {
                    TicketCommands::List(args) => {
                        commands::tickets::list(&session, args).await?;
                    }
                    TicketCommands::View { id } => {
                        commands::tickets::view(&session, id).await?;
                    }
                    TicketCommands::Code { code } => {
                        commands::tickets::view_by_code(&session, &code).await?;
                    }
                    TicketCommands::Create(args) => {
                        commands::tickets::create(&session, args).await?;
                    }
                    TicketCommands::Update(args) => {
                        commands::tickets::update(&session, args).await?;
                    }
                    TicketCommands::Delete { id, yes } => {
                        commands::tickets::delete(&session, id, yes).await?;
                    }
                    TicketCommands::Assign { id, assignee } => {
                        commands::tickets::assign(&session, id, assignee).await?;
                    }
                    TicketCommands::Status { id, status } => {
                        commands::tickets::change_status(&session, id, status).await?;
                    }
                    TicketCommands::Comment(args) => {
                        commands::tickets::comment(&session, args).await?;
                    }
                    TicketCommands::Uncomment { id, comment, yes } => {
                        commands::tickets::uncomment(&session, id, comment, yes).await?;
                    }
                    TicketCommands::Mine(paging) => {
                        commands::tickets::mine(&session, paging).await?;
                    }
                    TicketCommands::Assigned { user, paging } => {
                        commands::tickets::assigned(&session, user, paging).await?;
                    }
                },
                Commands::Comment { action } => match action {
                    CommentCommands::View { id } => {
                        commands::comments::view(&session, id).await?;
                    }
                    CommentCommands::Edit { id, body } => {
                        commands::comments::edit(&session, id, &body).await?;
                    }
                    CommentCommands::Count { ticket } => {
                        commands::comments::count(&session, ticket).await?;
                    }
                    CommentCommands::ByAuthor { user } => {
                        commands::comments::by_author(&session, user).await?;
                    }
                },
                Commands::Users(args) => {
                    commands::users::list(&session, args.active).await?;
                }
                Commands::User { action } => match action {
                    UserCommands::List(args) => {
                        commands::users::list(&session, args.active).await?;
                    }
                    UserCommands::View { id } => {
                        commands::users::view(&session, id).await?;
                    }
                    UserCommands::Email { email } => {
                        commands::users::view_by_email(&session, &email).await?;
                    }
                    UserCommands::Create(args) => {
                        commands::users::create(&session, args).await?;
                    }
                    UserCommands::Update { id, input } => {
                        commands::users::update(&session, id, input).await?;
                    }
                    UserCommands::Delete { id, yes } => {
                        commands::users::delete(&session, id, yes).await?;
                    }
                    UserCommands::Deactivate { id } => {
                        commands::users::deactivate(&session, id).await?;
                    }
                },
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
