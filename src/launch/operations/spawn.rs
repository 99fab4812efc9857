//! Detached process start through the host shell

use std::io;
use std::process::{Command, Stdio};

/// Starts a prepared command line without waiting for it.
pub trait ProcessSpawner: Send + Sync {
    fn spawn(&self, command_line: &str) -> io::Result<()>;
}

/// Hands the command line to `sh -c` (or `cmd /S /C` on Windows).
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellSpawner;

impl ProcessSpawner for ShellSpawner {
    fn spawn(&self, command_line: &str) -> io::Result<()> {
        let mut cmd = shell_command(command_line);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        // Own process group so the game outlives us and ignores our signals
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd.spawn()?;
        tracing::debug!(pid = child.id(), "launch process spawned");
        // Not waited on; the game is not monitored after spawn
        drop(child);
        Ok(())
    }
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;

    let mut cmd = Command::new("cmd");
    cmd.raw_arg(format!("/S /C \"{command_line}\""));
    cmd.creation_flags(DETACHED_PROCESS);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}
