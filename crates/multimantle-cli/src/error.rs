//! Process exit codes.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Runtime error (storage, I/O, bad import data) |
//! | 2 | Configuration or usage error |

use multimantle_core::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CliExitCode {
    Success = 0,
    Error = 1,
    Usage = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

/// Exit code for a failure that ends the process.
pub fn exit_code_for_error(err: &CoreError) -> CliExitCode {
    match err {
        CoreError::ConfigError(_) => CliExitCode::Usage,
        _ => CliExitCode::Error,
    }
}
