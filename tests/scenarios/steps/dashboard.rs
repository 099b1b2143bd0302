//! Dashboard step definitions.

use std::sync::Arc;

use cucumber::gherkin::Step;
use cucumber::{given, then, when, World};
use serde_json::Value;

use orderdesk::{
    Dashboard, EditRequest, LoadReport, MockOrderStore, NoticeLevel, OrderId, SaveOutcome,
    Section, Status, StoreReply,
};

/// Test context for dashboard scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct DashboardWorld {
    store: Arc<MockOrderStore>,
    dashboard: Option<Dashboard>,
    last_load: Option<LoadReport>,
    last_save: Option<SaveOutcome>,
}

impl DashboardWorld {
    fn new() -> Self {
        Self {
            store: Arc::new(MockOrderStore::default()),
            dashboard: None,
            last_load: None,
            last_save: None,
        }
    }

    async fn load(&mut self) {
        let mut dashboard = Dashboard::new(self.store.clone());
        self.last_load = Some(dashboard.load().await);
        self.dashboard = Some(dashboard);
    }

    fn dashboard(&self) -> &Dashboard {
        self.dashboard.as_ref().expect("Orders not loaded")
    }

    fn report(&self) -> &LoadReport {
        self.last_load.as_ref().expect("No load performed")
    }

    fn outcome(&self) -> &SaveOutcome {
        self.last_save.as_ref().expect("No save performed")
    }
}

fn order_id(raw: &str) -> OrderId {
    raw.parse().expect("Order id must not be blank")
}

fn section_ids(world: &DashboardWorld, section: Section) -> String {
    world
        .dashboard()
        .section(section)
        .iter()
        .map(|r| r.order_id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// --- Background ---

#[given("an order store")]
async fn given_order_store(world: &mut DashboardWorld) {
    world.store = Arc::new(MockOrderStore::default());
}

// --- Given steps ---

#[given("the store holds rows:")]
async fn given_store_rows(world: &mut DashboardWorld, step: &Step) {
    let docstring = step.docstring.as_ref().expect("Rows docstring missing");
    let rows: Value = serde_json::from_str(docstring).expect("Rows must be JSON");
    world.store.set_rows(rows).await;
}

#[given("the store is unreachable")]
async fn given_store_unreachable(world: &mut DashboardWorld) {
    world.store.set_fail_on_fetch(true).await;
}

#[given(expr = "the store refuses edits with {string}")]
async fn given_store_refuses(world: &mut DashboardWorld, message: String) {
    world.store.set_reply(StoreReply::failure(message)).await;
}

#[given("the store fails on submit")]
async fn given_store_fails_submit(world: &mut DashboardWorld) {
    world.store.set_fail_on_submit(true).await;
}

#[given("the desk has loaded orders")]
async fn given_desk_loaded(world: &mut DashboardWorld) {
    world.load().await;
}

// --- When steps ---

#[when("the desk loads orders")]
async fn when_desk_loads(world: &mut DashboardWorld) {
    world.load().await;
}

#[when(expr = "the desk saves order {word} as {string}")]
async fn when_desk_saves(world: &mut DashboardWorld, id: String, status: String) {
    let status: Status = status.parse().expect("Unknown status in scenario");
    let request = EditRequest::new(order_id(&id), status);
    let outcome = world.dashboard().save(request).await;
    world.last_save = Some(outcome);
}

// --- Then steps ---

#[then(expr = "{int} orders are loaded")]
async fn then_orders_loaded(world: &mut DashboardWorld, count: usize) {
    assert_eq!(world.report().count, count);
    assert_eq!(world.dashboard().records().len(), count);
}

#[then(expr = "the {word} section lists {string}")]
async fn then_section_lists(world: &mut DashboardWorld, section: String, expected: String) {
    let section: Section = section.parse().expect("Unknown section in scenario");
    assert_eq!(section_ids(world, section), expected);
}

#[then(expr = "order {word} has customer {string}")]
async fn then_order_customer(world: &mut DashboardWorld, id: String, customer: String) {
    let record = world
        .dashboard()
        .record(&order_id(&id))
        .expect("Order not in session");
    assert_eq!(record.customer_name.as_deref(), Some(customer.as_str()));
}

#[then(expr = "the load warns {string}")]
async fn then_load_warns(world: &mut DashboardWorld, text: String) {
    let notice = world.report().notice.as_ref().expect("No load warning");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.text, text);
}

#[then(expr = "the load warning mentions {string}")]
async fn then_load_warning_mentions(world: &mut DashboardWorld, text: String) {
    let notice = world.report().notice.as_ref().expect("No load warning");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(
        notice.text.contains(&text),
        "warning {:?} does not mention {:?}",
        notice.text,
        text
    );
}

#[then(expr = "the desk shows success {string}")]
async fn then_shows_success(world: &mut DashboardWorld, text: String) {
    let notice = world.outcome().notice();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.text, text);
}

#[then(expr = "the desk shows error {string}")]
async fn then_shows_error(world: &mut DashboardWorld, text: String) {
    let notice = world.outcome().notice();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, text);
}

#[then(expr = "the store received {int} edit(s)")]
async fn then_store_received(world: &mut DashboardWorld, count: usize) {
    assert_eq!(world.store.submitted_count().await, count);
}

#[then(expr = "the last edit has status {string} and empty attachments")]
async fn then_last_edit(world: &mut DashboardWorld, status: String) {
    let submitted = world.store.take_submitted().await;
    let last = submitted.last().expect("No edit submitted");
    assert_eq!(last.status.as_str(), status);
    assert_eq!(last.pan_card_link, "");
    assert_eq!(last.tracking_doc_link, "");
}
