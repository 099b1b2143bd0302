//! orderdesk - order sheet client for the dispatch desk
//!
//! Fetches order rows from a spreadsheet-backed web app, normalizes their
//! column names, groups them into the Summary / Manufacturing / Dispatch
//! sections, and submits status edits with optional PAN and tracking
//! documents.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod edit;
pub mod model;
pub mod normalize;
pub mod render;
pub mod store;
pub mod utils;
pub mod view;

pub use dashboard::{Dashboard, LoadReport, Notice, NoticeLevel, SaveOutcome};
pub use edit::{Attachment, AttachmentKind, EditError, EditPayload, EditRequest, StoreReply};
pub use model::{OrderId, OrderRecord, Status};
pub use store::{HttpOrderStore, MockOrderStore, OrderStore, StoreError};
pub use view::Section;
