use std::cmp::Ordering;

use sweepstake_core::{Order, Side};

/// Ranks two orders on the same side; `Less` means higher priority
pub type Priority = fn(&Order, &Order) -> Ordering;

/// Bids: highest price first, then earliest submission, then arrival
pub fn bid_priority(a: &Order, b: &Order) -> Ordering {
    b.price
        .cmp(&a.price)
        .then_with(|| a.submitted_at.cmp(&b.submitted_at))
        .then_with(|| a.sequence.cmp(&b.sequence))
}

/// Asks: lowest price first, then earliest submission, then arrival
pub fn ask_priority(a: &Order, b: &Order) -> Ordering {
    a.price
        .cmp(&b.price)
        .then_with(|| a.submitted_at.cmp(&b.submitted_at))
        .then_with(|| a.sequence.cmp(&b.sequence))
}

pub fn priority_for(side: Side) -> Priority {
    match side {
        Side::Bid => bid_priority,
        Side::Ask => ask_priority,
    }
}
