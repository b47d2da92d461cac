//! Match lifecycle and buddy candidate generation for MealBuddy
//!
//! This crate holds the session's match list and the manual-selection
//! workflow, and generates the synthetic buddies the user is paired with.
//! Everything lives in process memory for the duration of one session.

mod catalog;
mod config;
mod error;
mod generator;
mod notification;
mod store;

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use notification::*;
pub use store::*;
