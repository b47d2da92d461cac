//! Selectable meal time slots.

/// Slot used by quick-join requests that want to eat right away.
pub const NOW_SLOT: &str = "Now";

/// Time slots offered when planning a meal.
pub const TIME_SLOTS: &[&str] = &[
    "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "14:00", "14:30", "15:00",
];

/// Returns true if `slot` is one of the offered slots or [`NOW_SLOT`].
pub fn is_known_slot(slot: &str) -> bool {
    slot == NOW_SLOT || TIME_SLOTS.contains(&slot)
}
