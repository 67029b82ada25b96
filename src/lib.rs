pub mod command;
pub mod config;
pub mod hook;
pub mod manifest;
pub mod registry;
pub mod research;
pub mod version;
