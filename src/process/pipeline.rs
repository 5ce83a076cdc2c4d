use std::ffi::CString;
use std::os::fd::IntoRawFd;
use std::os::unix::io::RawFd;
use std::process;

use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{close, dup, dup2, execvp, fork, pipe, ForkResult, Pid};

use super::{signal, ProcessError};
use crate::flags::Flags;
use crate::path::PathResolver;
use crate::token::tokenize;

const STDIN_FD: RawFd = 0;
const STDOUT_FD: RawFd = 1;

/// What the shell loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Restores the saved stdin descriptor when dropped, so every exit path
/// from pipeline execution performs the same cleanup and pipe plumbing
/// never leaks into later commands.
struct StdinGuard(RawFd);

impl Drop for StdinGuard {
    fn drop(&mut self) {
        let _ = dup2(self.0, STDIN_FD);
        let _ = close(self.0);
    }
}

#[derive(Clone)]
pub struct PipelineExecutor {
    quiet_mode: bool,
}

impl PipelineExecutor {
    pub fn new(flags: &Flags) -> Self {
        PipelineExecutor {
            quiet_mode: flags.is_set("quiet"),
        }
    }

    /// Runs one stand-alone command: fork a child that applies its own
    /// redirections and loads the program image, then block until it
    /// reports completion. A non-zero exit surfaces as `AbnormalExit`.
    pub fn run_command(&self, tokens: &[&str]) -> Result<(), ProcessError> {
        match unsafe { fork() }.map_err(ProcessError::Spawn)? {
            ForkResult::Child => exec_stage(tokens),
            ForkResult::Parent { child } => self.wait_for(child),
        }
    }

    /// Runs a validated pipeline strictly left to right.
    ///
    /// Each non-builtin stage gets a fresh pipe; the child attaches its
    /// stdout to the write end whenever a next stage exists, and the parent
    /// attaches the read end to its own stdin so the following stage
    /// inherits it. `cd` runs directly in the parent (a child's directory
    /// change would be invisible to the shell) and `exit` anywhere in the
    /// line terminates the shell. A stage that exits non-zero aborts the
    /// stages after it.
    pub fn run_pipeline(
        &self,
        line: &str,
        resolver: &mut PathResolver,
    ) -> Result<Outcome, ProcessError> {
        let saved = dup(STDIN_FD).map_err(ProcessError::Plumbing)?;
        let _stdin_guard = StdinGuard(saved);

        let stages: Vec<&str> = line.split(" | ").collect();
        let last = stages.len().saturating_sub(1);

        for (index, stage) in stages.iter().enumerate() {
            let tokens = tokenize(stage);

            if tokens.first().copied() == Some("cd") {
                if let Some(target) = tokens.get(1) {
                    if let Err(err) = resolver.change_directory(target) {
                        if !self.quiet_mode {
                            eprintln!("rill: cd: {}", err);
                        }
                    }
                }
                continue;
            }

            if tokens.contains(&"exit") {
                return Ok(Outcome::Exit);
            }

            let (read_end, write_end) = pipe().map_err(ProcessError::Plumbing)?;
            let (read_fd, write_fd) = (read_end.into_raw_fd(), write_end.into_raw_fd());

            match unsafe { fork() }.map_err(ProcessError::Spawn)? {
                ForkResult::Child => {
                    if index < last {
                        let _ = dup2(write_fd, STDOUT_FD);
                    }
                    let _ = close(read_fd);
                    let _ = close(write_fd);
                    exec_stage(&tokens);
                }
                ForkResult::Parent { child } => {
                    // The next stage reads from this pipe through the
                    // parent's stdin; both raw ends are closed before the
                    // wait so the child sees EOF when its writer is done.
                    dup2(read_fd, STDIN_FD).map_err(ProcessError::Plumbing)?;
                    let _ = close(read_fd);
                    let _ = close(write_fd);
                    self.wait_for(child)?;
                }
            }
        }

        Ok(Outcome::Continue)
    }

    fn wait_for(&self, child: Pid) -> Result<(), ProcessError> {
        signal::shield_parent_from_sigint()?;
        match waitpid(child, None).map_err(ProcessError::Plumbing)? {
            WaitStatus::Exited(_, 0) => Ok(()),
            WaitStatus::Exited(pid, code) => Err(ProcessError::AbnormalExit {
                pid: pid.as_raw(),
                code,
            }),
            WaitStatus::Signaled(pid, sig, _) => Err(ProcessError::Killed {
                pid: pid.as_raw(),
                signal: sig as i32,
            }),
            // No job control: stopped/continued states are never requested.
            _ => Ok(()),
        }
    }
}

/// Scans a stage's tokens for `<` and `>`. Each operator consumes the
/// following token as a filename, and the argv handed to the program is
/// truncated at the first operator position.
fn split_redirections<'a>(
    tokens: &[&'a str],
) -> (Vec<&'a str>, Option<&'a str>, Option<&'a str>) {
    let mut argv = Vec::new();
    let mut input = None;
    let mut output = None;
    let mut truncated = false;

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "<" => {
                truncated = true;
                input = tokens.get(i + 1).copied();
                i += 2;
            }
            ">" => {
                truncated = true;
                output = tokens.get(i + 1).copied();
                i += 2;
            }
            tok => {
                if !truncated {
                    argv.push(tok);
                }
                i += 1;
            }
        }
    }

    (argv, input, output)
}

/// Child side of a stage: wire up redirections, then replace this process
/// image with the named program. Never returns; every failure path prints
/// one diagnostic and exits non-zero before any program output happens.
fn exec_stage(tokens: &[&str]) -> ! {
    let (argv, input, output) = split_redirections(tokens);

    if let Some(path) = input {
        match open(path, OFlag::O_RDONLY, Mode::empty()) {
            Ok(fd) => {
                let _ = dup2(fd, STDIN_FD);
                let _ = close(fd);
            }
            Err(err) => {
                eprintln!("rill: failed to open input file {}: {}", path, err);
                process::exit(1);
            }
        }
    }

    if let Some(path) = output {
        let flags = OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC;
        match open(path, flags, Mode::from_bits_truncate(0o644)) {
            Ok(fd) => {
                let _ = dup2(fd, STDOUT_FD);
                let _ = close(fd);
            }
            Err(err) => {
                eprintln!("rill: failed to open output file {}: {}", path, err);
                process::exit(1);
            }
        }
    }

    let program = match argv.first() {
        Some(name) => *name,
        None => process::exit(1),
    };
    let collected: Result<Vec<CString>, _> = argv.iter().map(|arg| CString::new(*arg)).collect();
    let cstrings = match collected {
        Ok(strings) => strings,
        Err(_) => {
            eprintln!("rill: {}: argument contains an interior NUL byte", program);
            process::exit(1);
        }
    };

    let errno = match execvp(&cstrings[0], &cstrings) {
        Ok(never) => match never {},
        Err(errno) => errno,
    };
    if errno == Errno::ENOENT {
        eprintln!("rill: command not found: {}", program);
    } else {
        eprintln!("rill: failed to execute {}: {}", program, errno);
    }
    process::exit(127);
}
