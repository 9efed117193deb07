//! Recording tool runner for testing.
//!
//! Provides [`RecordingRunner`] for exercising build orchestration without
//! spawning processes.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::tool::{ToolError, ToolOutput, ToolRunner};

type Effect = Box<dyn Fn(&Path) -> io::Result<()> + Send + Sync>;

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub command: String,
    pub cwd: PathBuf,
}

/// [`ToolRunner`] that records invocations instead of running commands.
///
/// Commands succeed with empty output unless configured otherwise. An effect
/// registered with [`on_run`](Self::on_run) is called with the working
/// directory, which lets tests simulate the files a real tool would produce.
///
/// # Example
///
/// ```ignore
/// use docus_cache::{RecordingRunner, ToolRunner};
///
/// let runner = RecordingRunner::new()
///     .on_run("docusaurus-init", |cwd| std::fs::create_dir_all(cwd.join("website")))
///     .failing("docusaurus-build", "Error: no docs");
///
/// runner.run("docusaurus-init", Path::new("/tmp/cache")).unwrap();
/// assert_eq!(runner.call_count(), 1);
/// ```
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<ToolCall>>,
    effects: HashMap<String, Effect>,
    failures: HashMap<String, String>,
}

impl fmt::Debug for RecordingRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingRunner")
            .field("calls", &self.calls)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

impl RecordingRunner {
    /// Create a runner where every command succeeds without side effects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `effect` with the working directory whenever `command` runs.
    #[must_use]
    pub fn on_run(
        mut self,
        command: impl Into<String>,
        effect: impl Fn(&Path) -> io::Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.effects.insert(command.into(), Box::new(effect));
        self
    }

    /// Make `command` exit with status 1 and the given output.
    #[must_use]
    pub fn failing(mut self, command: impl Into<String>, output: impl Into<String>) -> Self {
        self.failures.insert(command.into(), output.into());
        self
    }

    /// All recorded invocations, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded invocations.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<ToolOutput, ToolError> {
        self.calls.lock().unwrap().push(ToolCall {
            command: command.to_owned(),
            cwd: cwd.to_path_buf(),
        });

        if let Some(output) = self.failures.get(command) {
            return Err(ToolError::Failed {
                command: command.to_owned(),
                code: Some(1),
                output: output.clone(),
            });
        }
        if let Some(effect) = self.effects.get(command) {
            effect(cwd).map_err(|source| ToolError::Spawn {
                command: command.to_owned(),
                source,
            })?;
        }
        Ok(ToolOutput::default())
    }
}
