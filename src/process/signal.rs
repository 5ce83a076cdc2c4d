use crate::process::ProcessError;

use libc::{signal, sighandler_t, SIG_ERR, SIGINT};

extern "C" fn handle_sigint(_: i32) {
    // Do nothing, let the foreground child handle the keystroke
}

/// Parks SIGINT on a no-op handler for the parent, so ^C while a child runs
/// interrupts the child without tearing down the shell itself.
pub fn shield_parent_from_sigint() -> Result<(), ProcessError> {
    let previous = unsafe { signal(SIGINT, handle_sigint as sighandler_t) };
    if previous == SIG_ERR {
        return Err(ProcessError::SignalError(
            "failed to install SIGINT handler".to_string(),
        ));
    }
    Ok(())
}
