//! Infrastructure configuration modules.

pub mod logging;
pub mod paper;
pub mod settings;
pub mod telegram;

pub use logging::LoggingConfig;
pub use paper::{PaperConfig, PaperVenueConfig};
pub use settings::Config;
pub use telegram::TelegramAppConfig;
