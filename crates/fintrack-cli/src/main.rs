//! Fintrack CLI - Personal finance tracker
//!
//! Usage:
//!   fintrack init                              Initialize database
//!   fintrack categories add Food --kind expense
//!   fintrack transactions add -c 1 -k expense -a 12.50
//!   fintrack report summary                    This month at a glance
//!   fintrack serve --port 3000                 Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt).await,
        Commands::Categories { user, action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(CategoriesAction::List) => {
                    commands::cmd_categories_list(&db, &user.user)
                }
                Some(CategoriesAction::Add { name, kind }) => {
                    commands::cmd_categories_add(&db, &user.user, &name, &kind)
                }
                Some(CategoriesAction::Delete { id }) => {
                    commands::cmd_categories_delete(&db, &user.user, id)
                }
            }
        }
        Commands::Transactions { user, action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, &user.user, None, None, "-date"),
                Some(TransactionsAction::List { from, to, ordering }) => {
                    commands::cmd_transactions_list(
                        &db,
                        &user.user,
                        from.as_deref(),
                        to.as_deref(),
                        &ordering,
                    )
                }
                Some(TransactionsAction::Add {
                    category,
                    kind,
                    amount,
                    date,
                    description,
                }) => commands::cmd_transactions_add(
                    &db,
                    &user.user,
                    category,
                    &kind,
                    &amount,
                    date.as_deref(),
                    description,
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, &user.user, id)
                }
            }
        }
        Commands::Report { user, report_type } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match report_type {
                ReportType::Summary { args } => {
                    commands::cmd_report_summary(&db, &user.user, args.as_of.as_deref(), args.json)
                }
                ReportType::Categories { args } => commands::cmd_report_categories(
                    &db,
                    &user.user,
                    args.as_of.as_deref(),
                    args.json,
                ),
                ReportType::Anomalies { args } => commands::cmd_report_anomalies(
                    &db,
                    &user.user,
                    args.as_of.as_deref(),
                    args.json,
                ),
            }
        }
        Commands::Audit { user, limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_audit(&db, &user.user, limit)
        }
    }
}
