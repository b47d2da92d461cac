//! Campus location definitions.

use serde::Serialize;

/// A spot on campus where people meet for a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CampusLocation {
    /// Display name, also used as the location of a match.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Whether the spot is currently popular.
    pub trending: bool,
}

const fn spot(name: &'static str, description: &'static str, trending: bool) -> CampusLocation {
    CampusLocation {
        name,
        description,
        trending,
    }
}

/// All campus locations a match can be requested for.
pub const CAMPUS_LOCATIONS: &[CampusLocation] = &[
    spot("Cafeteria", "Main campus dining hall", true),
    spot("Çarşı", "Student marketplace area", true),
    spot("Physics Building Café", "Quiet spot near labs", false),
    spot("Mathematics Building", "Quick bites between classes", false),
    spot("Susam Café", "Best coffee on campus", true),
    spot("Dorm 1 Café", "Cozy dormitory café", false),
    spot("Dorm 5 Café", "Popular evening spot", false),
    spot("Library Café", "Study break favorite", true),
    spot("Dorm 9 Café", "Quiet and peaceful", false),
    spot("Engineering Canteen", "Engineers' hangout", true),
    spot("Sports Complex Café", "Post-workout fuel", false),
    spot("Art Building Café", "Creative atmosphere", false),
];

impl CampusLocation {
    /// Looks a location up by name, ignoring case.
    pub fn find_by_name(name: &str) -> Option<&'static CampusLocation> {
        let needle = name.trim().to_lowercase();
        CAMPUS_LOCATIONS
            .iter()
            .find(|l| l.name.to_lowercase() == needle)
    }

    /// Returns every location whose name contains `query`, ignoring case.
    ///
    /// An empty query matches everything.
    pub fn search(query: &str) -> Vec<&'static CampusLocation> {
        let needle = query.trim().to_lowercase();
        CAMPUS_LOCATIONS
            .iter()
            .filter(|l| l.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Returns the trending locations in catalog order.
    pub fn trending() -> Vec<&'static CampusLocation> {
        CAMPUS_LOCATIONS.iter().filter(|l| l.trending).collect()
    }
}
