//! Enchantment engine: weighted stat rolls against per-instance records.
//!
//! Ordinary items are fungible stack counts; the first enchant session
//! splits the equipped copy into its own ledger record keyed by a unique
//! instance id. Sessions replace the record's lines wholesale (locked lines
//! carry over), rings take a single gem instead of tiered sessions, and all
//! consumer-facing reads go through the projection queries.

pub mod gems;
pub mod locks;
pub mod persistence;
pub mod projection;
pub mod roller;
pub mod session;
pub mod stats;
pub mod tiers;
pub mod types;

pub use gems::*;
pub use locks::*;
pub use persistence::*;
pub use projection::*;
pub use roller::*;
pub use session::*;
pub use stats::*;
pub use tiers::*;
pub use types::*;
