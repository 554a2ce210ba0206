pub mod config;
pub mod error;
pub mod probe;
pub mod progress;
pub mod queue;
pub mod report;
pub mod scanner;
pub mod sink;
pub mod wordlist;

pub use config::ScanConfig;
pub use error::ScanError;
pub use probe::ProbeOutcome;
pub use scanner::{FoundCallback, ProgressCallback, Scanner};
pub use sink::{Finding, ResultSink};
