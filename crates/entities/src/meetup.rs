//! Announced group meetups the user can join in one step.

use serde::Serialize;

use crate::MatchRequest;

/// A meetup other users already set up at a campus location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Meetup {
    pub id: u32,
    /// Campus location name.
    pub location: &'static str,
    /// Time slot the group meets at.
    pub time: &'static str,
    /// People already going.
    pub people: u32,
    pub spots_left: u32,
}

/// Meetups shown on the explore view, soonest first.
pub const UPCOMING_MEETUPS: &[Meetup] = &[
    Meetup {
        id: 101,
        location: "Cafeteria",
        time: "12:30",
        people: 3,
        spots_left: 1,
    },
    Meetup {
        id: 102,
        location: "Susam Café",
        time: "13:00",
        people: 2,
        spots_left: 2,
    },
    Meetup {
        id: 103,
        location: "Library Café",
        time: "14:00",
        people: 2,
        spots_left: 2,
    },
];

impl Meetup {
    /// Looks a meetup up by ID.
    pub fn find(id: u32) -> Option<&'static Meetup> {
        UPCOMING_MEETUPS.iter().find(|m| m.id == id)
    }

    /// Builds the random, visible request that joins this meetup.
    pub fn request(&self) -> MatchRequest {
        MatchRequest::join_meetup(self.location, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{is_known_slot, CampusLocation, MatchMode};

    #[test]
    fn test_find() {
        let meetup = Meetup::find(102).unwrap();
        assert_eq!(meetup.location, "Susam Café");
        assert_eq!(meetup.spots_left, 2);
        assert!(Meetup::find(7).is_none());
    }

    #[test]
    fn test_meetups_reference_known_places_and_slots() {
        for meetup in UPCOMING_MEETUPS {
            assert!(CampusLocation::find_by_name(meetup.location).is_some());
            assert!(is_known_slot(meetup.time));
        }
    }

    #[test]
    fn test_request() {
        let request = Meetup::find(101).unwrap().request();

        assert_eq!(request.location, "Cafeteria");
        assert_eq!(request.time_slots, vec!["12:30".to_string()]);
        assert_eq!(request.mode, MatchMode::Random);
        assert!(!request.is_anonymous);
    }
}
