//! Typed errors for the order board.
//!
//! Handlers return `BoardError` internally; the dispatcher in `board::app`
//! logs and swallows them so that a missing id or marker never reaches the
//! user.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Order {id} not found")]
    OrderNotFound { id: String },

    #[error("Invalid column '{column}': {message}")]
    InvalidColumn { column: String, message: String },

    #[error("Element #{id} not found")]
    ElementNotFound { id: String },

    #[error("No element carries the '{key}' marker")]
    MissingMarker { key: String },

    #[error("Invalid script: {0}")]
    InvalidScript(String),
}

impl BoardError {
    /// Errors that stand for "nothing to act on" rather than bad input.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            BoardError::OrderNotFound { .. } | BoardError::MissingMarker { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_not_found_carries_id() {
        let err = BoardError::OrderNotFound { id: "o1".into() };
        match &err {
            BoardError::OrderNotFound { id } => assert_eq!(id, "o1"),
            _ => panic!("Expected OrderNotFound"),
        }
        assert!(err.to_string().contains("o1"));
    }

    #[test]
    fn invalid_column_formats_message() {
        let err = BoardError::InvalidColumn {
            column: "kitchen".into(),
            message: "Invalid column: kitchen".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid column 'kitchen': Invalid column: kitchen"
        );
    }

    #[test]
    fn silent_errors_are_lookup_misses() {
        assert!(BoardError::OrderNotFound { id: "x".into() }.is_silent());
        assert!(BoardError::MissingMarker { key: "id".into() }.is_silent());
        assert!(
            !BoardError::InvalidColumn {
                column: "x".into(),
                message: "bad".into()
            }
            .is_silent()
        );
        assert!(!BoardError::ElementNotFound { id: "board".into() }.is_silent());
    }

    #[test]
    fn implements_std_error() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&BoardError::InvalidScript("empty".into()));
    }
}
