//! Entity structs for every stored Beacon record.
//!
//! Each entity maps to a table in the libSQL store. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON output and schema export.

mod alert;
mod citation;
mod competitor;
mod settings;

pub use alert::{Alert, NewAlert};
pub use citation::{Citation, NewCitation};
pub use competitor::Competitor;
pub use settings::UserSettings;
