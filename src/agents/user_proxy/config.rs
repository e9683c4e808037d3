use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_CONSECUTIVE_AUTO_REPLY: usize = 100;
pub const DEFAULT_CODE_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalExecutorConfig {
    /// Runs happen in a fresh temporary directory when unset.
    pub work_dir: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for LocalExecutorConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            timeout: Duration::from_secs(DEFAULT_CODE_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CodeExecutionConfig {
    #[default]
    Disabled,
    Local(LocalExecutorConfig),
}

impl CodeExecutionConfig {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, CodeExecutionConfig::Disabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HumanInputMode {
    #[default]
    Never,
    /// Ask on the terminal before every reply.
    Always,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProxyConfig {
    pub code_execution: CodeExecutionConfig,
    pub human_input_mode: HumanInputMode,
    pub max_consecutive_auto_reply: usize,
}

impl Default for UserProxyConfig {
    fn default() -> Self {
        Self {
            code_execution: CodeExecutionConfig::Disabled,
            human_input_mode: HumanInputMode::Never,
            max_consecutive_auto_reply: DEFAULT_MAX_CONSECUTIVE_AUTO_REPLY,
        }
    }
}
