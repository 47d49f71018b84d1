use clap::Parser;
use owo_colors::{OwoColorize, Style};
use taskboard_core::error::CoreError;
use taskboard_core::repository::JsonRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::new().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring invalid configuration");
        config::Config::default()
    });
    let repository =
        JsonRepository::new(&config.data_file).with_max_backups(config.max_backups);
    let today = repository.today();

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&repository, command).await,
        cli::Commands::List(command) => {
            commands::list::list_tasks(&repository, command, &config, today).await
        }
        cli::Commands::Day(command) => commands::day::show_day(&repository, command, today).await,
        cli::Commands::Do(command) => commands::r#do::do_task(&repository, command).await,
        cli::Commands::End(command) => {
            commands::end::end_series(&repository, command, today).await
        }
        cli::Commands::Edit(command) => commands::edit::edit_task(&repository, command).await,
        cli::Commands::Delete(command) => {
            commands::delete::delete_task(&repository, command).await
        }
        cli::Commands::Preview(command) => {
            commands::preview::preview_task(&repository, command, today).await
        }
        cli::Commands::Export(command) => {
            commands::export::export_board(&repository, command).await
        }
        cli::Commands::Labels => commands::labels::list_labels(&repository).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in tasks {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidRule(s) => {
                eprintln!(
                    "{} Invalid recurrence rule: {}",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
            CoreError::Serialization(e) => {
                eprintln!(
                    "{} The data file is not a valid task board: {}",
                    "Error:".style(error_style),
                    e
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
