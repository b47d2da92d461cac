//! Core entity definitions for MealBuddy.
//!
//! This crate defines the data types shared between the match store and the
//! view layer: match records, manual-mode candidates, campus locations, time
//! slots, announced meetups and the request a user submits when looking for a
//! meal buddy.

mod location;
mod matching;
mod meetup;
mod request;
mod time_slot;

pub use location::*;
pub use matching::*;
pub use meetup::*;
pub use request::*;
pub use time_slot::*;
