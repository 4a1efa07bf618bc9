//! Converts a binary's run result into a process exit code.

use std::fmt::Display;
use std::io::Write;

/// Map `result` to an exit code, printing the error chain on failure.
///
/// Returns `0` on success and `1` otherwise.
pub fn exit_code_for_run_result<E>(result: Result<(), E>, stderr: &mut dyn Write) -> i32
where
    E: std::error::Error,
{
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            let mut source = err.source();
            while let Some(cause) = source {
                write_stderr_line(stderr, format_args!("  caused by: {cause}"));
                source = cause.source();
            }
            1
        }
    }
}

/// Write one line to `stderr`.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("failed to copy fr.json")]
    struct CopyFailed(#[source] io::Error);

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result::<CopyFailed>(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_chain_and_returns_one() {
        let err = CopyFailed(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert_eq!(
            stderr_text,
            "error: failed to copy fr.json\n  caused by: denied\n"
        );
    }
}
