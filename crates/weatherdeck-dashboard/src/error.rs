//! Search error taxonomy.

use thiserror::Error;
use weatherdeck_weather::LookupFailed;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a city name";
pub const LOOKUP_FAILED_MESSAGE: &str = "City not found. Please try again.";

/// Why a search ended in the failed state. Both kinds are recovered locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The query was empty after trimming; no lookup was made.
    #[error("empty query")]
    EmptyQuery,

    #[error("lookup failed: {0}")]
    LookupFailed(#[from] LookupFailed),
}

impl SearchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyQuery => EMPTY_QUERY_MESSAGE,
            Self::LookupFailed(_) => LOOKUP_FAILED_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(SearchError::EmptyQuery.user_message(), "Please enter a city name");
        assert_eq!(
            SearchError::from(LookupFailed).user_message(),
            "City not found. Please try again."
        );
    }
}
