//! Shell command classification and parsing
//! - manager.rs: PackageManager enum and invocation-pattern matching
//! - parser.rs: cd-prefix resolution, flag stripping, explicit package extraction

pub mod manager;
pub mod parser;

pub use manager::{ManagerDetector, PackageManager};
pub use parser::{CommandInterpreter, ParsedCommand};
