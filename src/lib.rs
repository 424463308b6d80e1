pub mod config;
pub mod manifest;
pub mod file_discovery;
pub mod scanner;
pub mod issues;
pub mod analyzer;
pub mod reporter;

pub use config::Config;
pub use file_discovery::FileDiscovery;
pub use scanner::SourceScanner;
pub use issues::IssueChecker;
pub use analyzer::{AnalysisReport, Analyzer};
pub use reporter::Reporter;

pub type Result<T> = anyhow::Result<T>;
