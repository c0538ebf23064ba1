pub mod file;
pub mod logging;
pub mod progress;
