use std::path::Path;
use std::process::Stdio;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::agents::user_proxy::config::LocalExecutorConfig;
use crate::types::AgentResult;

pub const DEFAULT_LANGUAGE: &str = "python";
pub const TIMEOUT_EXIT_CODE: i32 = 124;

lazy_static! {
    static ref CODE_BLOCK: Regex = Regex::new(r"```[ \t]*([\w+-]*)[^\n]*\n([\s\S]*?)```").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub code: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeResult {
    pub exit_code: i32,
    pub output: String,
}

impl CodeResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// Text sent back to the agent that wrote the code.
    pub fn to_reply(&self) -> String {
        let status = if self.succeeded() { "execution succeeded" } else { "execution failed" };
        format!("exitcode: {} ({})\nCode output: {}", self.exit_code, status, self.output)
    }
}

pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock> {
    CODE_BLOCK
        .captures_iter(text)
        .map(|caps| {
            let language = caps.get(1).map(|m| m.as_str().to_lowercase()).unwrap_or_default();
            CodeBlock {
                code: caps[2].to_string(),
                language: if language.is_empty() { DEFAULT_LANGUAGE.to_string() } else { language },
            }
        })
        .collect()
}

fn interpreter_for(language: &str) -> Option<(&'static str, &'static str)> {
    match language {
        "sh" | "bash" | "shell" => Some(("sh", "sh")),
        "python" | "py" | "python3" => Some(("python3", "py")),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct LocalCodeExecutor {
    config: LocalExecutorConfig,
}

impl LocalCodeExecutor {
    pub fn new(config: LocalExecutorConfig) -> Self {
        Self { config }
    }

    /// Runs the blocks in order and stops at the first failure.
    pub async fn execute(&self, blocks: &[CodeBlock]) -> AgentResult<CodeResult> {
        let temp_dir;
        let work_dir: &Path = match &self.config.work_dir {
            Some(dir) => {
                tokio::fs::create_dir_all(dir).await?;
                dir
            }
            None => {
                temp_dir = tempfile::tempdir()?;
                temp_dir.path()
            }
        };

        let mut output = String::new();
        let mut exit_code = 0;
        for (i, block) in blocks.iter().enumerate() {
            let result = self.run_block(work_dir, i, block).await?;
            output.push_str(&result.output);
            exit_code = result.exit_code;
            if !result.succeeded() {
                break;
            }
        }

        Ok(CodeResult { exit_code, output })
    }

    async fn run_block(&self, work_dir: &Path, index: usize, block: &CodeBlock) -> AgentResult<CodeResult> {
        let Some((program, extension)) = interpreter_for(&block.language) else {
            warn!(language = %block.language, "refusing to run code in unknown language");
            return Ok(CodeResult {
                exit_code: 1,
                output: format!("unknown language {}", block.language),
            });
        };

        let file_name = format!("code_block_{}.{}", index, extension);
        tokio::fs::write(work_dir.join(&file_name), &block.code).await?;
        debug!(program, file = %file_name, "running code block");

        let child = Command::new(program)
            .arg(&file_name)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.config.timeout, child).await {
            Ok(result) => {
                let out = result?;
                let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
                output.push_str(&String::from_utf8_lossy(&out.stderr));
                Ok(CodeResult {
                    exit_code: out.status.code().unwrap_or(-1),
                    output,
                })
            }
            Err(_) => {
                warn!(timeout = ?self.config.timeout, "code block timed out");
                Ok(CodeResult {
                    exit_code: TIMEOUT_EXIT_CODE,
                    output: "Timeout".to_string(),
                })
            }
        }
    }
}
