//! Client-side query engine.
//!
//! Owns the loaded user list and the operator's query parameters, and derives
//! the filtered set, the current page and the distinct city list from them.
//!
//! ```text
//! raw users ─┬─► distinct cities
//!            └─► filtered (search ∧ city) ─► paged (offset/limit)
//! ```
//!
//! - [`store`]: [`QueryStore`] state container and intents
//! - [`derive`]: pure derivation functions and [`DerivedView`]

pub mod derive;
pub mod store;

pub use derive::DerivedView;
pub use store::{LoadStatus, QueryStore, LOAD_FAILED_MESSAGE, PAGE_SIZE};
