use std::cmp::Ordering;

use sweepstake_core::{Order, ParticipantId};

use crate::price_time::Priority;

/// One side of a book: orders kept fully sorted by a priority function,
/// at most one per participant
///
/// Books hold a handful of orders (one per participant), so a sorted `Vec`
/// with binary-search insertion beats a tree here.
#[derive(Debug, Clone)]
pub struct SortedBook {
    orders: Vec<Order>,
    priority: Priority,
}

impl SortedBook {
    pub fn new(priority: Priority) -> Self {
        Self {
            orders: Vec::new(),
            priority,
        }
    }

    /// Insert, or replace the participant's existing order
    ///
    /// Returns `true` when an existing order was replaced (an amend).
    pub fn upsert(&mut self, order: Order) -> bool {
        let amended = match self.position(&order.participant) {
            Some(idx) => {
                self.orders.remove(idx);
                true
            }
            None => false,
        };
        self.insert_sorted(order);
        amended
    }

    fn insert_sorted(&mut self, order: Order) {
        let priority = self.priority;
        let idx = self
            .orders
            .partition_point(|resting| priority(resting, &order) != Ordering::Greater);
        self.orders.insert(idx, order);
    }

    fn position(&self, participant: &ParticipantId) -> Option<usize> {
        self.orders
            .iter()
            .position(|o| &o.participant == participant)
    }

    /// Highest-priority order
    pub fn best(&self) -> Option<&Order> {
        self.orders.first()
    }

    pub fn is_best(&self, participant: &ParticipantId) -> bool {
        self.best().is_some_and(|o| &o.participant == participant)
    }

    pub fn get(&self, participant: &ParticipantId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.participant == participant)
    }

    pub fn remove(&mut self, participant: &ParticipantId) -> Option<Order> {
        let idx = self.position(participant)?;
        Some(self.orders.remove(idx))
    }

    /// Remove every order `matches` accepts, returning them in priority order
    pub fn remove_where(&mut self, mut matches: impl FnMut(&Order) -> bool) -> Vec<Order> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.orders.len());
        for order in self.orders.drain(..) {
            if matches(&order) {
                removed.push(order);
            } else {
                kept.push(order);
            }
        }
        self.orders = kept;
        removed
    }

    /// Remove everything, returning how many orders were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.orders.len();
        self.orders.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Orders in priority order, best first
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn to_vec(&self) -> Vec<Order> {
        self.orders.clone()
    }

    /// Every adjacent pair respects the priority function
    pub fn is_sorted(&self) -> bool {
        self.orders
            .windows(2)
            .all(|pair| (self.priority)(&pair[0], &pair[1]) != Ordering::Greater)
    }
}
