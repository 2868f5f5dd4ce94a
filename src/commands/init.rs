use std::io::{self, Write};

use helpdesk::client::DEFAULT_BASE_URL;
use helpdesk::config::{self, Config};
use helpdesk::error::{HelpdeskError, Result};

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Helpdesk CLI Configuration");
    println!("==========================\n");

    let base_url = prompt(&format!("Backend API URL [{DEFAULT_BASE_URL}]: "))?;
    let base_url = if base_url.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        config::parse_base_url(&base_url)?;
        base_url
    };

    let user_id = prompt("Your user id (used for comments and as default owner) [optional]: ")?;
    let user_id = if user_id.is_empty() {
        None
    } else {
        Some(user_id.parse().map_err(|_| HelpdeskError::InvalidInput {
            field: "user id",
            value: user_id.clone(),
        })?)
    };

    let config = Config {
        base_url: Some(base_url),
        user_id,
    };
    let contents = toml::to_string(&config).map_err(|e| HelpdeskError::InvalidInput {
        field: "config",
        value: e.to_string(),
    })?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| HelpdeskError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, contents).map_err(|e| HelpdeskError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'helpdesk' commands!");

    Ok(())
}
