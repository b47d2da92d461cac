//! Match request submitted by the view layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MatchMode, NOW_SLOT};

/// Reasons a request is rejected before it reaches the match store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// No location was chosen.
    #[error("Pick a location first")]
    MissingLocation,

    /// No time slot was chosen.
    #[error("Pick at least one time slot")]
    MissingTimeSlots,
}

/// What a user asks for when looking for a meal buddy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Campus location name.
    pub location: String,
    /// Selected time slots, in selection order.
    pub time_slots: Vec<String>,
    /// Whether the requester stays anonymous.
    pub is_anonymous: bool,
    /// How the request is resolved.
    pub mode: MatchMode,
}

impl MatchRequest {
    /// Creates a visible random-mode request.
    pub fn new(location: impl Into<String>, time_slots: Vec<String>) -> Self {
        Self {
            location: location.into(),
            time_slots,
            is_anonymous: false,
            mode: MatchMode::Random,
        }
    }

    /// Requests a buddy at `location` right now.
    pub fn join_now(location: impl Into<String>) -> Self {
        Self::new(location, vec![NOW_SLOT.to_string()])
    }

    /// Requests a buddy for an announced meetup at `location` and `time`.
    pub fn join_meetup(location: impl Into<String>, time: impl Into<String>) -> Self {
        Self::new(location, vec![time.into()])
    }

    /// Sets whether the requester stays anonymous.
    pub fn with_anonymous(mut self, is_anonymous: bool) -> Self {
        self.is_anonymous = is_anonymous;
        self
    }

    /// Sets the match mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks the request before it is handed to the match store.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.location.trim().is_empty() {
            return Err(RequestError::MissingLocation);
        }
        if self.time_slots.is_empty() {
            return Err(RequestError::MissingTimeSlots);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_now() {
        let request = MatchRequest::join_now("Library Café");

        assert_eq!(request.time_slots, vec![NOW_SLOT.to_string()]);
        assert_eq!(request.mode, MatchMode::Random);
        assert!(!request.is_anonymous);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let request = MatchRequest::join_meetup("Susam Café", "13:00")
            .with_anonymous(true)
            .with_mode(MatchMode::Manual);

        assert_eq!(request.time_slots, vec!["13:00".to_string()]);
        assert!(request.is_anonymous);
        assert_eq!(request.mode, MatchMode::Manual);
    }

    #[test]
    fn test_validate_rejects_incomplete_requests() {
        let request = MatchRequest::new("  ", vec!["12:00".to_string()]);
        assert_eq!(request.validate(), Err(RequestError::MissingLocation));

        let request = MatchRequest::new("Cafeteria", Vec::new());
        assert_eq!(request.validate(), Err(RequestError::MissingTimeSlots));
    }
}
