use std::process::ExitCode;

pub mod compare;
pub mod dispatch;
pub mod inspect;
pub mod schema;

/// How a command finished, mapped onto the process exit status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The command succeeded; for `compare`, the corpora match.
    Success,
    /// `compare` found at least one divergence.
    Mismatch,
    /// Loading, alignment or configuration failed.
    Failed,
}

impl Outcome {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Mismatch => 1,
            Self::Failed => 2,
        }
    }

    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(Outcome::Success.code(), 0);
        assert_eq!(Outcome::Mismatch.code(), 1);
        assert_eq!(Outcome::Failed.code(), 2);
    }
}
