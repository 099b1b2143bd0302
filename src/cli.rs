//! Command line front end.
//!
//! Parses arguments, runs one command against a [`Dashboard`] and maps the
//! result to an [`Exit`] code. Output goes to the writers passed in, so the
//! binary hands over stdout/stderr and tests hand over buffers.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Config;
use crate::dashboard::{Dashboard, Notice, NoticeLevel};
use crate::edit::{Attachment, EditError, EditRequest};
use crate::model::{OrderId, Status};
use crate::render::{Card, SectionListing};
use crate::store::HttpOrderStore;
use crate::view::Section;

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    /// The order is missing or the save did not go through.
    Failed = 1,
    /// Configuration or input error.
    Usage = 2,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

#[derive(Debug, Parser)]
#[command(name = "orderdesk")]
#[command(about = "Order sheet dashboard for the dispatch desk")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Order store URL, overrides configuration
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the orders in one section
    List {
        /// summary, manufacturing or dispatch
        #[arg(long, default_value_t = Section::Summary)]
        section: Section,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show one order
    Show {
        order_id: OrderId,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Update an order's status and attach documents
    Save {
        order_id: OrderId,
        /// New status; defaults to the order's current one
        #[arg(long)]
        status: Option<Status>,
        /// PAN card scan (png, jpg or pdf)
        #[arg(long)]
        pan: Option<PathBuf>,
        /// Tracking proof (png, jpg or pdf)
        #[arg(long)]
        tracking: Option<PathBuf>,
    },
    /// Print the lifecycle statuses
    Statuses,
}

/// Success notices go to `out`; warnings and errors go to `err`.
pub fn write_notice<O: Write, E: Write>(
    out: &mut O,
    err: &mut E,
    notice: &Notice,
) -> io::Result<()> {
    match notice.level {
        NoticeLevel::Success => writeln!(out, "{}", notice),
        NoticeLevel::Warning => writeln!(err, "warning: {}", notice),
        NoticeLevel::Error => writeln!(err, "error: {}", notice),
    }
}

pub fn write_statuses<O: Write>(out: &mut O) -> io::Result<()> {
    for status in Status::ALL {
        writeln!(out, "{}", status)?;
    }
    Ok(())
}

fn refuse<E: Write>(err: &mut E, text: impl Into<String>, exit: Exit) -> io::Result<Exit> {
    writeln!(err, "error: {}", Notice::error(text))?;
    Ok(exit)
}

async fn attach(path: Option<PathBuf>) -> Result<Option<Attachment>, EditError> {
    match path {
        Some(path) => Attachment::from_path(&path).await.map(Some),
        None => Ok(None),
    }
}

/// Load configuration, connect to the store and run the command.
pub async fn run<O: Write, E: Write>(cli: Cli, out: &mut O, err: &mut E) -> io::Result<Exit> {
    if let Commands::Statuses = cli.command {
        write_statuses(out)?;
        return Ok(Exit::Success);
    }

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return refuse(err, e.to_string(), Exit::Usage),
    };
    if let Some(endpoint) = cli.endpoint {
        config.store.endpoint = endpoint;
    }

    let store = match HttpOrderStore::new(config.store) {
        Ok(store) => store,
        Err(e) => return refuse(err, e.to_string(), Exit::Usage),
    };
    info!(endpoint = %store.endpoint(), "orderdesk started");

    let mut dashboard = Dashboard::new(Arc::new(store));
    run_command(cli.command, &mut dashboard, out, err).await
}

/// Load the session and run one command against it.
///
/// Load warnings are written to `err` and do not change the exit code.
pub async fn run_command<O: Write, E: Write>(
    command: Commands,
    dashboard: &mut Dashboard,
    out: &mut O,
    err: &mut E,
) -> io::Result<Exit> {
    if let Commands::Statuses = command {
        write_statuses(out)?;
        return Ok(Exit::Success);
    }

    if let Some(notice) = dashboard.load().await.notice {
        write_notice(out, err, &notice)?;
    }

    match command {
        Commands::List { section, json } => {
            let records = dashboard.section(section);
            if json {
                serde_json::to_writer_pretty(&mut *out, &records)?;
                writeln!(out)?;
            } else {
                write!(
                    out,
                    "{}",
                    SectionListing {
                        section,
                        records: &records
                    }
                )?;
            }
            Ok(Exit::Success)
        }
        Commands::Show { order_id, json } => {
            let Some(record) = dashboard.record(&order_id) else {
                return refuse(err, format!("Order {} not found", order_id), Exit::Failed);
            };
            if json {
                serde_json::to_writer_pretty(&mut *out, record)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", Card(record))?;
            }
            Ok(Exit::Success)
        }
        Commands::Save {
            order_id,
            status,
            pan,
            tracking,
        } => {
            let Some(record) = dashboard.record(&order_id) else {
                return refuse(err, format!("Order {} not found", order_id), Exit::Failed);
            };

            let mut request = match status {
                Some(status) => EditRequest::new(record.order_id.clone(), status),
                None => match EditRequest::for_record(record) {
                    Ok(request) => request,
                    Err(e) => return refuse(err, e.to_string(), Exit::Usage),
                },
            };
            request.pan_card = match attach(pan).await {
                Ok(attachment) => attachment,
                Err(e) => return refuse(err, e.to_string(), Exit::Usage),
            };
            request.tracking_doc = match attach(tracking).await {
                Ok(attachment) => attachment,
                Err(e) => return refuse(err, e.to_string(), Exit::Usage),
            };

            let outcome = dashboard.save(request).await;
            write_notice(out, err, &outcome.notice())?;
            if outcome.is_saved() {
                Ok(Exit::Success)
            } else {
                Ok(Exit::Failed)
            }
        }
        // Answered before loading.
        Commands::Statuses => Ok(Exit::Success),
    }
}
