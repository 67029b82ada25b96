//! Structured hook result
//!
//! Emitted on stdout when at least one diff was found. The host couples
//! this document with exit status 2 to surface the context to both the
//! user and the agent.

use serde::Serialize;

/// Hook event name the host expects in the output envelope
pub const HOOK_EVENT_NAME: &str = "PostToolUse";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Short human-readable summary line
    pub system_message: String,
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    /// Composed summary table and per-package detail sections
    pub additional_context: String,
}

impl HookOutput {
    pub fn new(system_message: String, additional_context: String) -> Self {
        Self {
            system_message,
            hook_specific_output: HookSpecificOutput {
                hook_event_name: HOOK_EVENT_NAME.to_string(),
                additional_context,
            },
        }
    }
}
