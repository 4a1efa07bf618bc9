//! Shared building blocks for the calendar locale tools: validated locale
//! codes and the stderr logger used by both binaries.

pub mod locale;
pub mod logging;

pub use locale::{LocaleCode, LocaleError, ROOT_LOCALE};
pub use logging::{LOG_LEVEL_ENV, LoggingError, init_logging};
