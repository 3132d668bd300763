mod alerts;
mod citation;
mod competitor;
mod settings;

pub use alerts::AlertCommands;
pub use citation::CitationCommands;
pub use competitor::CompetitorCommands;
pub use settings::SettingsCommands;
