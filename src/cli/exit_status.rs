use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every checked key is complete, or the command succeeded
/// - `Failure` (1): incomplete keys were found, or a write was refused
/// - `Error` (2): a config, I/O or parse error stopped the command
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
