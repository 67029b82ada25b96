//! Breaking-change research
//! - agent.rs: ResearchAgent trait and the `claude` subprocess implementation
//! - cache.rs: persistent research cache keyed by major-version transition
//! - dispatcher.rs: bounded-concurrency fan-out over uncached diffs

pub mod agent;
pub mod cache;
pub mod dispatcher;

pub use agent::{ClaudeAgent, ResearchAgent, ResearchError};
pub use cache::{ResearchCache, cache_key};
pub use dispatcher::{ResearchResult, dispatch};
