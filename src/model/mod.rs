//! Order domain types.
//!
//! These are the shapes the rest of the crate works with once rows have
//! left the store and been normalized.

mod field;
mod order_id;
mod record;
mod status;

pub use field::{CanonicalField, FieldKind};
pub use order_id::{BlankOrderId, OrderId};
pub use record::{FieldValue, OrderRecord};
pub(crate) use record::Slot;
pub use status::{Status, UnknownStatus};
