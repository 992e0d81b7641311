use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitStatus {
    Success,
    Error,
}

/// Outcome of a command: the process exit code plus an optional message for
/// stderr.
#[derive(Debug)]
pub struct Exit {
    status: ExitStatus,
    message: Option<String>,
}

impl Exit {
    /// Exit code for failures that prevented a check from running at all.
    pub const FATAL_CODE: u8 = 2;

    #[must_use]
    pub fn success() -> Self {
        Self {
            status: ExitStatus::Success,
            message: None,
        }
    }

    #[must_use]
    pub fn error() -> Self {
        Self {
            status: ExitStatus::Error,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Print the message (unless `quiet`) and turn this into a process exit code.
    pub fn report(self, quiet: bool) -> ExitCode {
        if let (Some(message), false) = (&self.message, quiet) {
            eprintln!("{message}");
        }
        match self.status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Error => ExitCode::FAILURE,
        }
    }
}
