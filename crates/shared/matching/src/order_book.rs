use sweepstake_core::{InstrumentCode, Order, ParticipantId, Side};

use crate::price_time::priority_for;
use crate::sorted_book::SortedBook;

/// Order book for a single instrument
///
/// Holds at most one resting order per participant per side. Every accepted
/// insert or amend is stamped with the book's next arrival sequence, which
/// settles ties between equal price and equal submission time.
#[derive(Debug, Clone)]
pub struct OrderBook {
    instrument: InstrumentCode,
    bids: SortedBook,
    asks: SortedBook,
    next_sequence: u64,
}

impl OrderBook {
    pub fn new(instrument: InstrumentCode) -> Self {
        Self {
            instrument,
            bids: SortedBook::new(priority_for(Side::Bid)),
            asks: SortedBook::new(priority_for(Side::Ask)),
            next_sequence: 1,
        }
    }

    pub fn instrument(&self) -> &InstrumentCode {
        &self.instrument
    }

    pub fn side(&self, side: Side) -> &SortedBook {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SortedBook {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Insert an order, or amend the participant's resting order on that side
    ///
    /// Returns `true` for an amend. Resubmitting the resting price changes
    /// nothing: the original submission time and sequence are kept.
    pub fn upsert(&mut self, mut order: Order) -> bool {
        let unchanged = self
            .side(order.side)
            .get(&order.participant)
            .is_some_and(|resting| resting.price == order.price);
        if unchanged {
            return true;
        }

        order.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.side_mut(order.side).upsert(order)
    }

    pub fn best(&self, side: Side) -> Option<&Order> {
        self.side(side).best()
    }

    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.best()
    }

    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.best()
    }

    pub fn get(&self, side: Side, participant: &ParticipantId) -> Option<&Order> {
        self.side(side).get(participant)
    }

    pub fn is_best(&self, side: Side, participant: &ParticipantId) -> bool {
        self.side(side).is_best(participant)
    }

    pub fn remove(&mut self, side: Side, participant: &ParticipantId) -> Option<Order> {
        self.side_mut(side).remove(participant)
    }

    /// Remove orders on one side matching a predicate
    pub fn remove_where(
        &mut self,
        side: Side,
        matches: impl FnMut(&Order) -> bool,
    ) -> Vec<Order> {
        self.side_mut(side).remove_where(matches)
    }

    /// Sorted snapshot of one side, best first
    pub fn orders(&self, side: Side) -> Vec<Order> {
        self.side(side).to_vec()
    }

    pub fn clear_side(&mut self, side: Side) -> usize {
        self.side_mut(side).clear()
    }

    /// Clear both sides, returning how many orders were removed
    pub fn clear(&mut self) -> usize {
        self.bids.clear() + self.asks.clear()
    }

    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Best bid at or above best ask
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }
}
