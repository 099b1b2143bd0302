//! orderdesk: dispatch desk command line
//!
//! Lists, inspects and updates orders held in the order sheet.
//!
//! ## Architecture
//! ```text
//! [orderdesk] --(GET rows / POST edit, JSON)--> [order sheet web app]
//! ```
//!
//! ## Configuration
//! - `--config` or ORDERDESK_CONFIG: YAML file with a `store` section
//! - ORDERDESK__STORE__ENDPOINT / `--endpoint`: store URL
//! - ORDERDESK__STORE__TIMEOUT_SECS: request timeout (default: 30)
//! - ORDERDESK_LOG: log filter (default: warn)
//!
//! Exit codes: 0 on success, 1 when an order is missing or a save does not
//! go through, 2 for configuration and input errors.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use orderdesk::cli::{run, Cli};
use orderdesk::utils::bootstrap::init_tracing;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let exit = run(cli, &mut io::stdout(), &mut io::stderr()).await?;
    Ok(exit.into())
}
