// Sat Oct 17 2026 - Alex

pub mod logging;
pub mod workdir;

pub use logging::{LogFormat, LoggingUtils};
pub use workdir::WorkingDirGuard;
