pub mod alerts;
pub mod citation;
pub mod competitor;
pub mod dispatch;
pub mod gaps;
pub mod settings;
pub mod shared;
pub mod shares;
