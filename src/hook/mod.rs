//! Host hook boundary
//! - input.rs: PostToolUse event deserialization
//! - output.rs: structured hook result
//! - report.rs: summary table and detail sections
//! - runner.rs: the end-to-end pipeline

pub mod input;
pub mod output;
pub mod report;
pub mod runner;

pub use input::HookInput;
pub use output::HookOutput;
pub use runner::Pipeline;
