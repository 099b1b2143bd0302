//! Dashboard scenarios using Cucumber.
//!
//! Runs the desk's Gherkin scenarios against the in-memory order store:
//!
//! ```bash
//! cargo test --test scenarios
//! ```

mod steps;

use cucumber::World;
use steps::dashboard::DashboardWorld;

#[tokio::main]
async fn main() {
    DashboardWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/features"))
        .await;
}
