//! Match-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name shown whenever a person's identity is withheld.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous User";

/// Status of a MatchRecord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Waiting for the user to accept or decline.
    #[default]
    Pending,
    /// Accepted, the two people can now chat.
    Accepted,
    /// Declined and removed from the active list.
    Declined,
}

impl MatchStatus {
    /// Converts the status to its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Parses a status from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// How a match request is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Pair immediately with a single generated buddy.
    #[default]
    Random,
    /// Generate several candidates and let the user choose.
    Manual,
}

impl MatchMode {
    /// Converts the mode to its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Manual => "manual",
        }
    }

    /// Parses a mode from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "random" => Some(Self::Random),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// An uncommitted manual-mode proposal the user can browse and pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateOption {
    /// Unique identifier, carried over to the MatchRecord on selection.
    pub id: Uuid,
    /// Name shown to the user.
    pub display_name: String,
    /// Whether the candidate withholds their identity.
    pub is_anonymous: bool,
    /// Campus location name.
    pub location: String,
    /// Requested time slots.
    pub time_slots: Vec<String>,
    /// Interest tags.
    pub interests: Vec<String>,
    /// Cosmetic compatibility score.
    pub match_score: u32,
    /// Department, absent for anonymous candidates.
    pub department: Option<String>,
    /// Short bio.
    pub bio: Option<String>,
}

impl CandidateOption {
    /// Commits this candidate as a pending MatchRecord created at `created_at`.
    pub fn into_record(self, created_at: DateTime<Utc>) -> MatchRecord {
        MatchRecord {
            id: self.id,
            display_name: self.display_name,
            is_anonymous: self.is_anonymous,
            location: self.location,
            time_slots: self.time_slots,
            interests: self.interests,
            match_score: self.match_score,
            department: self.department,
            bio: self.bio,
            status: MatchStatus::Pending,
            created_at,
        }
    }
}

/// A committed pairing held by the match store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Name shown to the user.
    pub display_name: String,
    /// Whether the buddy withholds their identity.
    pub is_anonymous: bool,
    /// Campus location name.
    pub location: String,
    /// Requested time slots, never empty.
    pub time_slots: Vec<String>,
    /// Interest tags.
    pub interests: Vec<String>,
    /// Cosmetic compatibility score.
    pub match_score: u32,
    /// Department, absent for anonymous buddies.
    pub department: Option<String>,
    /// Short bio.
    pub bio: Option<String>,
    /// Current status.
    pub status: MatchStatus,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Returns true while the record awaits a decision.
    pub fn is_pending(&self) -> bool {
        self.status == MatchStatus::Pending
    }

    /// Returns true once the record has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.status == MatchStatus::Accepted
    }

    /// Moves a pending record to accepted.
    ///
    /// Returns false and leaves the record untouched for any other status.
    pub fn accept(&mut self) -> bool {
        if self.status != MatchStatus::Pending {
            return false;
        }
        self.status = MatchStatus::Accepted;
        true
    }

    /// Joins the time slots for display, e.g. `12:30, 13:00`.
    pub fn time_label(&self) -> String {
        self.time_slots.join(", ")
    }
}
