//! PostToolUse event deserialization

use serde::Deserialize;

/// Tool name of shell executions; any other tool is ignored
pub const SHELL_TOOL_NAME: &str = "Bash";

/// The event delivered on stdin, one per process start.
///
/// Unknown fields are ignored and missing fields default to empty so a
/// partially populated event still classifies cleanly as a no-op.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: ToolInput,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ToolInput {
    #[serde(default)]
    pub command: String,
}

impl HookInput {
    pub fn is_shell_command(&self) -> bool {
        self.tool_name == SHELL_TOOL_NAME
    }
}
