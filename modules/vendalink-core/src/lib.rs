//! Topic-routed event dispatcher for vending-machine telemetry.
//!
//! Classifies inbound pub/sub messages by topic shape, decodes the
//! payload for that shape, and issues the corresponding inventory/sales
//! API calls. All errors are message-scoped; the transport and the HTTP
//! client are external collaborators behind [`InventoryApi`].

pub mod dispatcher;
pub mod error;
pub mod payload;
pub mod testing;
pub mod topic;
pub mod traits;
pub mod units;

pub use dispatcher::{Dispatcher, InboundMessage, Outcome};
pub use error::DispatchError;
pub use topic::Route;
pub use traits::InventoryApi;
