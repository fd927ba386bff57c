pub mod store;
pub mod sweep;
pub mod types;

pub use store::SessionStore;
pub use types::{EntryInfo, Payload, SessionEntry, StoreConfig};
