use colored::Colorize;
use tabled::Tabled;

use helpdesk::api::{HelpdeskApi, UserId};
use helpdesk::error::Result;
use helpdesk::types::{User, UserInput};

use super::{confirm, Session};
use crate::cli::UserInputArgs;
use crate::output::{self, format_date, format_date_only};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: UserId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Roles")]
    roles: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Since")]
    since: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.full_name.clone(),
            email: user.email.clone(),
            roles: user.role_names.iter().cloned().collect::<Vec<_>>().join(", "),
            active: active_label(user.active),
            since: user
                .created_at
                .as_ref()
                .map(format_date_only)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn active_label(active: bool) -> String {
    if active {
        "yes".green().to_string()
    } else {
        "no".bright_black().to_string()
    }
}

impl From<UserInputArgs> for UserInput {
    fn from(args: UserInputArgs) -> Self {
        Self {
            full_name: args.name,
            email: args.email,
            password: args.password,
        }
    }
}

pub async fn list(session: &Session<'_>, active_only: bool) -> Result<()> {
    let users = if active_only {
        session.client.list_active_users().await?
    } else {
        session.client.list_users().await?
    };

    if users.is_empty() {
        output::print_message("No users found");
        return Ok(());
    }

    output::print_table(&users, |u| UserRow::from(u));

    Ok(())
}

pub async fn view(session: &Session<'_>, id: UserId) -> Result<()> {
    let user = session.client.get_user(id).await?;
    output::print_item(&user, print_user);
    Ok(())
}

pub async fn view_by_email(session: &Session<'_>, email: &str) -> Result<()> {
    let user = session.client.get_user_by_email(email).await?;
    output::print_item(&user, print_user);
    Ok(())
}

pub async fn create(session: &Session<'_>, args: UserInputArgs) -> Result<()> {
    let user = session.client.create_user(&args.into()).await?;
    output::print_item(&user, |u| {
        output::print_message(&format!("Created user {} - {}", u.id, u.full_name));
    });
    Ok(())
}

pub async fn update(session: &Session<'_>, id: UserId, args: UserInputArgs) -> Result<()> {
    let user = session.client.update_user(id, &args.into()).await?;
    output::print_item(&user, |u| {
        output::print_message(&format!("Updated user {} - {}", u.id, u.full_name));
    });
    Ok(())
}

pub async fn delete(session: &Session<'_>, id: UserId, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to delete this user?")? {
        println!("Aborted.");
        return Ok(());
    }

    session.client.delete_user(id).await?;
    output::print_message(&format!("Deleted user {id}"));
    Ok(())
}

pub async fn deactivate(session: &Session<'_>, id: UserId) -> Result<()> {
    session.client.deactivate_user(id).await?;
    output::print_message(&format!("Deactivated user {id}"));
    Ok(())
}

fn print_user(user: &User) {
    println!("{} <{}>", user.full_name.bold(), user.email);
    println!();
    println!("ID:      {}", user.id);
    println!("Active:  {}", active_label(user.active));
    if !user.role_names.is_empty() {
        let roles: Vec<&str> = user.role_names.iter().map(String::as_str).collect();
        println!("Roles:   {}", roles.join(", "));
    }
    if let Some(created) = &user.created_at {
        println!("Created: {}", format_date(created));
    }
    if let Some(updated) = &user.updated_at {
        println!("Updated: {}", format_date(updated));
    }
}
