//! cli::report
//!
//! The single place failures are reported.
//!
//! Every error that escapes [`crate::cli::run`] ends up here: it is printed
//! once as `error: <message>`, followed by any causes not already part of
//! the message and a hint when the error has one. The caller exits with the
//! returned status.

use std::io::Write;

use colored::Colorize;

use crate::engine::MigrateError;

/// Exit status for any failed invocation.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Print `err` to `out` and return the process exit status.
pub fn report(err: &anyhow::Error, out: &mut impl Write) -> i32 {
    let message = err.to_string();
    // A broken stderr leaves nothing to report to.
    let _ = writeln!(out, "{} {}", "error:".red().bold(), message);

    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            let _ = writeln!(out, "  caused by: {}", cause);
        }
    }

    if let Some(hint) = err.downcast_ref::<MigrateError>().and_then(MigrateError::hint) {
        let _ = writeln!(out, "{} {}", "hint:".cyan(), hint);
    }

    FAILURE_EXIT_CODE
}
