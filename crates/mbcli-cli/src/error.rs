// SPDX-License-Identifier: GPL-3.0-or-later

use mbcli_musicbrainz::{MusicBrainzError, ResolveError};
use std::io;
use thiserror::Error;

pub const EXIT_NOT_FOUND: u8 = 1;
pub const EXIT_SERVICE: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Failure of a command handler, mapped to a process exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Nothing matched the user's query.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Api(#[from] MusicBrainzError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// Ctrl-C arrived before the command finished.
    #[error("Interrupted by user.")]
    Interrupted,
}

impl From<ResolveError> for CommandError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Service(inner) => CommandError::Api(inner),
            not_found @ ResolveError::NotFound { .. } => {
                CommandError::NotFound(not_found.to_string())
            }
        }
    }
}

impl CommandError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::NotFound(_) | CommandError::Output(_) => EXIT_NOT_FOUND,
            CommandError::Api(_) => EXIT_SERVICE,
            CommandError::Interrupted => EXIT_INTERRUPTED,
        }
    }

    /// Line printed to stderr.
    pub fn report(&self) -> String {
        match self {
            CommandError::Api(e) => format!("API Error: {}", e),
            CommandError::Interrupted => format!("\n{}", self),
            other => format!("Error: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbcli_musicbrainz::EntityKind;

    #[test]
    fn test_resolution_failure_exits_1() {
        let err = CommandError::from(ResolveError::NotFound {
            kind: EntityKind::Artist,
            query: "Nobody".to_string(),
            disambiguator: None,
        });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.report(), "Error: Artist 'Nobody' not found");
    }

    #[test]
    fn test_service_failure_exits_2() {
        let err = CommandError::from(ResolveError::Service(
            MusicBrainzError::ServiceUnavailable,
        ));
        assert_eq!(err.exit_code(), 2);
        assert!(err.report().starts_with("API Error: "));
        assert!(err.report().contains("503"));
    }

    #[test]
    fn test_interrupt_exits_130() {
        let err = CommandError::Interrupted;
        assert_eq!(err.exit_code(), 130);
        assert_eq!(err.report(), "\nInterrupted by user.");
    }

    #[test]
    fn test_output_failure_exits_1() {
        let err = CommandError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert_eq!(err.exit_code(), 1);
        assert!(err.report().starts_with("Error: failed to write output"));
    }
}
