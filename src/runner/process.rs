//! Spawning step scripts
//!
//! A script's stdout and stderr are attached to the write end of a single
//! pipe, so both streams reach the runner interleaved in the order the script
//! wrote them.

use std::io::{self, BufRead, BufReader, PipeReader};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use super::env::Environment;
use crate::common::{Error, Result};

/// A running step script and its combined output stream
#[derive(Debug)]
pub struct ScriptProcess {
    child: Child,
    output: BufReader<PipeReader>,
    reaped: bool,
}

impl ScriptProcess {
    /// Spawn the script at `path` with exactly the variables in `env`
    pub fn spawn(path: &Path, env: &Environment) -> Result<Self> {
        let (reader, writer) = io::pipe().map_err(|e| Error::script_spawn(path, e))?;
        let stderr = writer
            .try_clone()
            .map_err(|e| Error::script_spawn(path, e))?;

        let mut cmd = Command::new(path);
        cmd.env_clear()
            .envs(env.iter())
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr);

        tracing::debug!(script = %path.display(), vars = env.len(), "spawning script");
        let child = cmd.spawn().map_err(|e| Error::script_spawn(path, e))?;

        // The command still owns our copies of the write end; the reader only
        // sees EOF once every write end is closed.
        drop(cmd);

        Ok(Self {
            child,
            output: BufReader::new(reader),
            reaped: false,
        })
    }

    /// Read the next line of output into `buf`, without its terminator
    ///
    /// `buf` is cleared first. Returns `false` at end of stream. A `\r`
    /// before the `\n` is stripped as well.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();
        if self.output.read_until(b'\n', buf)? == 0 {
            return Ok(false);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(true)
    }

    /// Wait for the script to exit and return its exit code
    pub fn wait(&mut self) -> Result<i32> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(exit_code(status))
    }
}

impl Drop for ScriptProcess {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }

        // abandoned mid-stream, don't leave it running behind us
        tracing::debug!(pid = self.child.id(), "killing abandoned script");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Map an exit status to the code the run terminates with
///
/// A signal-terminated child yields `128 + signal` like a shell would.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
