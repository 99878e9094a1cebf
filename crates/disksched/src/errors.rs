//! Error handling and exit codes.

use disksched_core::{exit_codes, SchedError};
use disksched_orchestration::SessionSummary;

/// Exit code for a scheduling error.
pub fn handle_error(err: &SchedError) -> i32 {
    match err {
        SchedError::MalformedWorkload(_) => exit_codes::ERROR_MALFORMED,
        SchedError::Config(_) => exit_codes::ERROR_CONFIG,
        SchedError::WorkerUnavailable(_) | SchedError::WorkerFailed { .. } => {
            exit_codes::ERROR_WORKER
        }
        SchedError::ShutDown => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any error reaching `main`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<SchedError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}

/// Exit code for a session that ran to completion.
///
/// Rejected inputs were reported as they happened; they still make the
/// process exit with `ERROR_MALFORMED`.
pub fn session_exit_code(summary: &SessionSummary) -> i32 {
    if summary.rejected > 0 {
        exit_codes::ERROR_MALFORMED
    } else {
        exit_codes::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use disksched_core::Algorithm;

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&SchedError::MalformedWorkload("x".into())), 3);
        assert_eq!(handle_error(&SchedError::Config("bad".into())), 4);
        assert_eq!(handle_error(&SchedError::WorkerUnavailable("gone".into())), 5);
        assert_eq!(
            handle_error(&SchedError::WorkerFailed {
                algorithm: Algorithm::Sstf,
                reason: "panicked".into(),
            }),
            5
        );
        assert_eq!(handle_error(&SchedError::ShutDown), 1);
    }

    #[test]
    fn exit_code_sees_through_context() {
        let err = Err::<(), _>(SchedError::Config("bad".into()))
            .context("starting")
            .unwrap_err();
        assert_eq!(exit_code(&err), exit_codes::ERROR_CONFIG);
        assert_eq!(exit_code(&anyhow::anyhow!("plain")), exit_codes::ERROR_GENERIC);
    }

    #[test]
    fn rejected_inputs_fail_the_session() {
        let clean = SessionSummary {
            cycles: 2,
            ..SessionSummary::default()
        };
        let dirty = SessionSummary {
            rejected: 1,
            ..clean
        };
        assert_eq!(session_exit_code(&clean), exit_codes::SUCCESS);
        assert_eq!(session_exit_code(&dirty), exit_codes::ERROR_MALFORMED);
    }
}
