//! Card system: definitions, live instances, and their registries.
//!
//! ## Key Types
//!
//! - `DefineId` / `CardDefine`: static card templates with an ordered
//!   effect list and custom properties
//! - `CardId` / `Card`: live instances bound to one definition
//! - `DefineRegistry`: content lookup (missing definitions fail loudly)
//! - `CardRegistry`: instance arena with smallest-unused id allocation
//! - `UsabilityRule`: caller-supplied "can this card be used" hook

pub mod card;
pub mod define;
pub mod registry;

pub use card::{Card, CardId};
pub use define::{CardDefine, DefineId, UsabilityRule};
pub use registry::{CardRegistry, DefineRegistry};
