// src/output/formatter.rs

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::constants::qvgen_constants::DEFAULT_FORMAT_TIMEOUT_SECS;
use crate::core::{GenError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// External source formatter invoked on the written artifact.
///
/// The command line is `<program> <args...> <file>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self::new("rustfmt", ["--edition", "2021"])
    }
}

impl FormatterConfig {
    /// Formatter with the default time limit.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: Duration::from_secs(DEFAULT_FORMAT_TIMEOUT_SECS),
        }
    }

    /// Sets the time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Executable name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the file path.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Time limit for one run.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Formats `file` in place.
    ///
    /// # Errors
    /// * `GenError::FormatterSpawn` if the program cannot be started.
    /// * `GenError::FormatterFailed` with the captured output on non-zero exit.
    /// * `GenError::FormatterTimeout` if the time limit passes; the child is killed.
    pub fn run(&self, file: &Path) -> Result<()> {
        debug!(program = %self.program, args = ?self.args, file = %file.display(), "starting formatter");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GenError::FormatterSpawn {
                program: self.program.clone(),
                source,
            })?;

        // Pipes are drained on their own threads while the child is polled.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait_with_timeout(&mut child)?;
        let output = [join(stdout), join(stderr)]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if status.success() {
            Ok(())
        } else {
            Err(GenError::FormatterFailed {
                program: self.program.clone(),
                status: status.to_string(),
                output,
            })
        }
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<ExitStatus> {
        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if start.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(GenError::FormatterTimeout {
                            program: self.program.clone(),
                            timeout: self.timeout,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(GenError::FormatterSpawn {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
