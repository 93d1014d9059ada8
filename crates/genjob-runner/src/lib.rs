/*
[INPUT]:  Public API exports for genjob-runner crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod display;
pub mod error;
pub mod launcher;
pub mod navigator;
pub mod poller;

// Re-export main types for convenience
pub use config::RunnerConfig;
pub use display::{StatusDisplay, StatusUpdate, TerminalDisplay};
pub use error::GenerationFailure;
pub use launcher::TaskLauncher;
pub use navigator::{DownloadNavigator, Navigator, PrintNavigator};
pub use poller::{CompletedGeneration, StatusPoller};
