// External command runner: every gh/git call goes through here.
// Outcomes are folded into CmdOutput; nothing escapes as an error or panic.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdOutput {
    pub success: bool,
    /// stdout on success, otherwise the trimmed diagnostic.
    pub output: String,
}

impl CmdOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { success: true, output: output.into() }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self { success: false, output: output.into() }
    }
}

pub trait CommandRunner {
    fn run(&self, argv: &[&str], cwd: Option<&Path>) -> CmdOutput;
}

/// Spawns real processes via `std::process::Command` (no shell).
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[&str], cwd: Option<&Path>) -> CmdOutput {
        let Some((program, args)) = argv.split_first() else {
            return CmdOutput::failed("Empty command");
        };
        log::debug!("run {:?} (cwd: {:?})", argv, cwd);

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let out = match cmd.output() {
            Ok(out) => out,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("{} not found on PATH", program);
                return CmdOutput::failed(format!("Command not found: {}", program));
            }
            Err(e) => {
                log::warn!("spawning {} failed: {}", program, e);
                return CmdOutput::failed(e.to_string());
            }
        };

        let stdout = String::from_utf8_lossy(&out.stdout).to_string();
        if out.status.success() {
            return CmdOutput::ok(stdout);
        }
        let stderr = String::from_utf8_lossy(&out.stderr);
        let msg = failure_text(&stderr, &stdout, program, &out.status.to_string());
        log::warn!("{:?} failed: {}", argv, msg);
        CmdOutput::failed(msg)
    }
}

/// Prefer stderr, then stdout; never empty.
fn failure_text(stderr: &str, stdout: &str, program: &str, status: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    format!("{} failed ({})", program, status)
}

#[cfg(test)]
pub mod testing {
    //! Scripted runner for tests: records calls and answers by argv prefix.

    use super::{CmdOutput, CommandRunner};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Call {
        pub argv: Vec<String>,
        pub cwd: Option<PathBuf>,
    }

    #[derive(Default)]
    pub struct ScriptedRunner {
        // (argv prefix, response); first match wins, later entries are fallbacks
        responses: Vec<(Vec<String>, CmdOutput)>,
        calls: RefCell<Vec<Call>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(mut self, prefix: &[&str], response: CmdOutput) -> Self {
            self.responses
                .push((prefix.iter().map(|s| s.to_string()).collect(), response));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        pub fn argvs(&self) -> Vec<Vec<String>> {
            self.calls.borrow().iter().map(|c| c.argv.clone()).collect()
        }

        pub fn called_with(&self, argv: &[&str]) -> bool {
            self.calls.borrow().iter().any(|c| c.argv == argv)
        }

        pub fn count_matching(&self, pred: impl Fn(&[String]) -> bool) -> usize {
            self.calls.borrow().iter().filter(|c| pred(&c.argv)).count()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, argv: &[&str], cwd: Option<&Path>) -> CmdOutput {
            let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
            self.calls.borrow_mut().push(Call {
                argv: argv.clone(),
                cwd: cwd.map(Path::to_path_buf),
            });
            self.responses
                .iter()
                .find(|(prefix, _)| argv.starts_with(prefix))
                .map(|(_, resp)| resp.clone())
                .unwrap_or_else(|| CmdOutput::ok(""))
        }
    }
}
