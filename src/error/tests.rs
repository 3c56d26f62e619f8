//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod league_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let league_error = LeagueError::from(json_error);

        match league_error {
            LeagueError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
        assert_eq!(
            LeagueError::from(serde_json::from_str::<u8>("x").unwrap_err()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let league_error = LeagueError::from(io_error);

        match league_error {
            LeagueError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_storage_context_names_the_step() {
        let raw: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = raw.step("updating match 7").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StorageFailure);
        assert!(err.to_string().contains("updating match 7"));
    }

    #[test]
    fn test_validation_kinds() {
        assert_eq!(
            LeagueError::validation("bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            LeagueError::InvalidTeamCount {
                expected: 4,
                found: 3
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            LeagueError::InvalidStrength { value: 101 }.kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_not_found_message() {
        let error = LeagueError::NotFound {
            entity: "Match",
            id: 42,
        };

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.to_string(), "Match with id 42 not found");
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_predictions_not_ready_is_precondition() {
        let error = LeagueError::PredictionsNotReady {
            completed_weeks: 2,
            required: 4,
        };

        assert_eq!(error.kind(), ErrorKind::PreconditionFailed);
        assert!(error.to_string().contains("at least 4 weeks"));
        assert_eq!(error.exit_code(), 4);
    }

    #[test]
    fn test_state_conflicts() {
        assert_eq!(
            LeagueError::FixtureMissing { week: 3 }.kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            LeagueError::InsufficientTeams {
                required: 4,
                found: 2
            }
            .exit_code(),
            5
        );
    }
}
