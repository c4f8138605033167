use sweepstake_core::{
    Instrument, InstrumentCode, Order, ParticipantId, Price, Side, Timestamp, Trade,
};
use sweepstake_ports::{MatchingError, MatchingResult, RegistryError};

use crate::order_book::OrderBook;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The order crossed and ownership moved to the buyer
    Traded(Trade),
    /// The order is resting on the book
    Accepted { order: Order, amended: bool },
}

impl Submission {
    pub fn trade(&self) -> Option<&Trade> {
        match self {
            Submission::Traded(trade) => Some(trade),
            Submission::Accepted { .. } => None,
        }
    }

    pub fn is_trade(&self) -> bool {
        matches!(self, Submission::Traded(_))
    }
}

/// Outcome of withdrawing an instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub previous_owner: Option<ParticipantId>,
    pub cleared_orders: usize,
    /// The instrument was already dropped and nothing changed
    pub already_dropped: bool,
}

/// Matching engine for one instrument
///
/// Owns the instrument's registry entry together with its book, so every
/// mutation updates both under the same `&mut self`.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    instrument: Instrument,
    book: OrderBook,
}

impl MatchingEngine {
    pub fn new(code: InstrumentCode) -> Self {
        Self {
            book: OrderBook::new(code.clone()),
            instrument: Instrument::new(code),
        }
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn code(&self) -> &InstrumentCode {
        self.instrument.code()
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn owner(&self) -> Option<&ParticipantId> {
        self.instrument.owner()
    }

    /// Check whether `participant` may hold an order on `side`
    fn check_eligible(&self, side: Side, participant: &ParticipantId) -> MatchingResult<()> {
        let code = self.code();
        if self.instrument.is_dropped() {
            return Err(RegistryError::InstrumentUnavailable(code.clone()).into());
        }

        match side {
            Side::Bid if !self.instrument.is_owned() => Err(MatchingError::NoOwner(code.clone())),
            Side::Bid if self.instrument.is_owner(participant) => {
                Err(MatchingError::AlreadyOwner {
                    instrument: code.clone(),
                    participant: participant.clone(),
                })
            }
            Side::Ask if !self.instrument.is_owner(participant) => Err(MatchingError::NotOwner {
                instrument: code.clone(),
                participant: participant.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Submit an order: insert or amend it, then cross if it is best
    ///
    /// A cross consumes both orders and trades at the incoming order's
    /// price. An amended order that is not best on its side after the
    /// update never triggers a cross.
    pub fn submit(&mut self, order: Order) -> MatchingResult<Submission> {
        if &order.instrument != self.code() {
            return Err(RegistryError::NotFound(order.instrument.to_string()).into());
        }
        self.check_eligible(order.side, &order.participant)?;

        let side = order.side;
        let participant = order.participant.clone();
        let amended = self.book.upsert(order);

        if amended && !self.book.is_best(side, &participant) {
            return self.accepted(side, &participant, amended);
        }

        let crossed = match (
            self.book.get(side, &participant),
            self.book.best(side.opposite()),
        ) {
            (Some(aggressor), Some(resting)) => {
                resting.participant != participant && aggressor.crosses(resting)
            }
            _ => false,
        };
        if !crossed {
            return self.accepted(side, &participant, amended);
        }

        let (Some(aggressor), Some(resting)) = (
            self.book.remove(side, &participant),
            self.take_best(side.opposite()),
        ) else {
            return self.accepted(side, &participant, amended);
        };

        let (buyer, seller) = match side {
            Side::Bid => (aggressor.participant, resting.participant),
            Side::Ask => (resting.participant, aggressor.participant),
        };
        let trade = Trade::new_with_time(
            aggressor.instrument,
            buyer.clone(),
            seller,
            aggressor.price,
            side,
            aggressor.submitted_at,
        );

        self.instrument.set_owner(buyer)?;
        self.enforce_ownership();

        Ok(Submission::Traded(trade))
    }

    fn take_best(&mut self, side: Side) -> Option<Order> {
        let participant = self.book.best(side)?.participant.clone();
        self.book.remove(side, &participant)
    }

    fn accepted(
        &self,
        side: Side,
        participant: &ParticipantId,
        amended: bool,
    ) -> MatchingResult<Submission> {
        let order = self
            .book
            .get(side, participant)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(self.code().to_string()))?;
        Ok(Submission::Accepted { order, amended })
    }

    /// Remove orders the current owner makes invalid: the owner's own bid
    /// and every ask not placed by the owner
    fn enforce_ownership(&mut self) {
        let Some(owner) = self.instrument.owner().cloned() else {
            self.book.clear_side(Side::Ask);
            return;
        };
        self.book.remove_where(Side::Bid, |o| o.participant == owner);
        self.book.remove_where(Side::Ask, |o| o.participant != owner);
    }

    /// Cancel a resting order; `None` if there was nothing to cancel
    pub fn cancel(&mut self, side: Side, participant: &ParticipantId) -> Option<Order> {
        self.book.remove(side, participant)
    }

    /// Administrative ownership change
    ///
    /// Returns the previous owner. Orders the new owner could no longer hold
    /// are removed.
    pub fn assign_owner(
        &mut self,
        participant: ParticipantId,
    ) -> Result<Option<ParticipantId>, RegistryError> {
        let previous = self.instrument.set_owner(participant)?;
        self.enforce_ownership();
        Ok(previous)
    }

    /// Clear every bid and rest an ask for the house at `price`
    ///
    /// The house must already own the instrument.
    pub fn seed_house_ask(
        &mut self,
        house: &ParticipantId,
        price: Price,
        now: Timestamp,
    ) -> MatchingResult<Order> {
        self.check_eligible(Side::Ask, house)?;
        self.book.clear_side(Side::Bid);

        let ask = Order::ask(self.code().clone(), house.clone(), price, now);
        self.book.upsert(ask);
        self.book
            .get(Side::Ask, house)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(self.code().to_string()).into())
    }

    /// Withdraw the instrument, clearing the book and the owner
    pub fn drop_instrument(&mut self) -> Withdrawal {
        if self.instrument.is_dropped() {
            return Withdrawal {
                previous_owner: None,
                cleared_orders: 0,
                already_dropped: true,
            };
        }

        let cleared_orders = self.book.clear();
        let previous_owner = self.instrument.withdraw();
        Withdrawal {
            previous_owner,
            cleared_orders,
            already_dropped: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sweepstake_core::Lifecycle;

    fn fra() -> InstrumentCode {
        InstrumentCode::new("FRA").unwrap()
    }

    fn who(name: &str) -> ParticipantId {
        ParticipantId::new(name).unwrap()
    }

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::milliseconds(ms)
    }

    fn price(p: Decimal) -> Price {
        Price::new(p).unwrap()
    }

    fn bid(name: &str, p: Decimal, ms: i64) -> Order {
        Order::bid(fra(), who(name), price(p), at(ms))
    }

    fn ask(name: &str, p: Decimal, ms: i64) -> Order {
        Order::ask(fra(), who(name), price(p), at(ms))
    }

    fn owned_by(name: &str) -> MatchingEngine {
        let mut engine = MatchingEngine::new(fra());
        engine.assign_owner(who(name)).unwrap();
        engine
    }

    #[test]
    fn test_bid_then_owner_ask_trades_at_ask_price() {
        let mut engine = owned_by("alice");

        let result = engine.submit(bid("bob", dec!(10.00), 0)).unwrap();
        assert!(matches!(result, Submission::Accepted { amended: false, .. }));

        let result = engine.submit(ask("alice", dec!(9.50), 1)).unwrap();
        let trade = result.trade().expect("should trade");
        assert_eq!(trade.price.inner(), dec!(9.50));
        assert_eq!(trade.buyer, who("bob"));
        assert_eq!(trade.seller, who("alice"));
        assert_eq!(trade.aggressor, Side::Ask);
        assert_eq!(trade.timestamp, at(1));

        assert!(engine.instrument().is_owner(&who("bob")));
        assert!(engine.book().is_empty());
    }

    #[test]
    fn test_incoming_bid_trades_at_bid_price() {
        let mut engine = owned_by("alice");
        engine.submit(ask("alice", dec!(5), 0)).unwrap();

        let result = engine.submit(bid("bob", dec!(7), 1)).unwrap();
        let trade = result.trade().unwrap();
        assert_eq!(trade.price.inner(), dec!(7));
        assert_eq!(trade.aggressor, Side::Bid);
        assert_eq!(engine.owner(), Some(&who("bob")));
        assert!(engine.book().is_empty());
    }

    #[test]
    fn test_cross_takes_best_bid_and_leaves_others() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(6), 0)).unwrap();
        engine.submit(bid("carol", dec!(8), 1)).unwrap();
        engine.submit(bid("dave", dec!(8), 2)).unwrap();

        let trade = engine.submit(ask("alice", dec!(7), 3)).unwrap();
        assert_eq!(trade.trade().unwrap().buyer, who("carol"));

        let remaining: Vec<_> = engine
            .book()
            .orders(Side::Bid)
            .into_iter()
            .map(|o| o.participant)
            .collect();
        assert_eq!(remaining, vec![who("dave"), who("bob")]);
        assert!(engine.book().best_ask().is_none());
    }

    #[test]
    fn test_non_crossing_ask_rests() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(4), 0)).unwrap();

        let result = engine.submit(ask("alice", dec!(6), 1)).unwrap();
        assert!(!result.is_trade());
        assert_eq!(engine.book().len(), 2);
        assert!(!engine.book().is_crossed());
    }

    #[test]
    fn test_owner_cannot_bid() {
        let mut engine = owned_by("bob");
        let err = engine.submit(bid("bob", dec!(5), 0)).unwrap_err();
        assert_eq!(
            err,
            MatchingError::AlreadyOwner {
                instrument: fra(),
                participant: who("bob"),
            }
        );
        assert!(engine.book().is_empty());
    }

    #[test]
    fn test_non_owner_cannot_ask() {
        let mut engine = owned_by("bob");
        let err = engine.submit(ask("carol", dec!(5), 0)).unwrap_err();
        assert!(matches!(err, MatchingError::NotOwner { .. }));
    }

    #[test]
    fn test_unowned_rejects_bids() {
        let mut engine = MatchingEngine::new(fra());
        let err = engine.submit(bid("bob", dec!(5), 0)).unwrap_err();
        assert_eq!(err, MatchingError::NoOwner(fra()));
    }

    #[test]
    fn test_wrong_instrument_rejected() {
        let mut engine = owned_by("alice");
        let order = Order::bid(
            InstrumentCode::new("WAL").unwrap(),
            who("bob"),
            price(dec!(5)),
            at(0),
        );
        let err = engine.submit(order).unwrap_err();
        assert_eq!(err, MatchingError::Registry(RegistryError::NotFound("WAL".into())));
    }

    #[test]
    fn test_amend_not_best_does_not_cross() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(8), 0)).unwrap();
        engine.submit(bid("carol", dec!(5), 1)).unwrap();
        engine.submit(ask("alice", dec!(9), 2)).unwrap();

        let result = engine.submit(bid("carol", dec!(6), 3)).unwrap();
        assert!(matches!(result, Submission::Accepted { amended: true, .. }));
        assert_eq!(engine.book().len(), 3);
    }

    #[test]
    fn test_amend_to_best_crosses() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(8), 0)).unwrap();
        engine.submit(bid("carol", dec!(5), 1)).unwrap();
        engine.submit(ask("alice", dec!(9), 2)).unwrap();

        let result = engine.submit(bid("carol", dec!(9.5), 3)).unwrap();
        let trade = result.trade().unwrap();
        assert_eq!(trade.buyer, who("carol"));
        assert_eq!(trade.price.inner(), dec!(9.5));

        // Amended aggressor is consumed too
        assert!(engine.book().get(Side::Bid, &who("carol")).is_none());
        assert!(engine.book().get(Side::Bid, &who("bob")).is_some());
        assert!(!engine.book().is_crossed());
    }

    #[test]
    fn test_amended_ask_crosses() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(8), 0)).unwrap();
        engine.submit(ask("alice", dec!(9), 1)).unwrap();

        let trade = engine.submit(ask("alice", dec!(7.5), 2)).unwrap();
        let trade = trade.trade().unwrap();
        assert_eq!(trade.price.inner(), dec!(7.5));
        assert_eq!(engine.owner(), Some(&who("bob")));
        assert!(engine.book().is_empty());
    }

    #[test]
    fn test_resubmitting_same_price_is_noop() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(5), 0)).unwrap();
        let before = engine.book().orders(Side::Bid);

        let result = engine.submit(bid("bob", dec!(5), 9)).unwrap();
        assert!(matches!(result, Submission::Accepted { amended: true, .. }));
        assert_eq!(engine.book().orders(Side::Bid), before);
    }

    #[test]
    fn test_seller_can_bid_after_trade() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(5), 0)).unwrap();
        engine.submit(ask("alice", dec!(5), 1)).unwrap();

        let result = engine.submit(bid("alice", dec!(6), 2)).unwrap();
        assert!(!result.is_trade());
    }

    #[test]
    fn test_cancel() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(5), 0)).unwrap();

        assert!(engine.cancel(Side::Bid, &who("bob")).is_some());
        assert!(engine.cancel(Side::Bid, &who("bob")).is_none());
        assert!(engine.book().is_empty());
    }

    #[test]
    fn test_assign_owner_removes_invalid_orders() {
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(5), 0)).unwrap();
        engine.submit(bid("carol", dec!(4), 1)).unwrap();
        engine.submit(ask("alice", dec!(9), 2)).unwrap();

        let previous = engine.assign_owner(who("bob")).unwrap();
        assert_eq!(previous, Some(who("alice")));

        let book = engine.book();
        assert!(book.get(Side::Bid, &who("bob")).is_none());
        assert!(book.get(Side::Ask, &who("alice")).is_none());
        assert!(book.get(Side::Bid, &who("carol")).is_some());
    }

    #[test]
    fn test_seed_house_ask() {
        let house = who("house");
        let mut engine = owned_by("alice");
        engine.submit(bid("bob", dec!(5), 0)).unwrap();

        // Not the owner yet
        assert!(engine.seed_house_ask(&house, price(dec!(1)), at(1)).is_err());

        engine.assign_owner(house.clone()).unwrap();
        let ask = engine.seed_house_ask(&house, price(dec!(1)), at(2)).unwrap();
        assert_eq!(ask.participant, house);
        assert!(engine.book().best_bid().is_none());
        assert_eq!(engine.book().best_ask(), Some(&ask));
    }

    #[test]
    fn test_drop_clears_book_and_owner() {
        let mut engine = owned_by("bob");
        engine.submit(ask("bob", dec!(5), 0)).unwrap();
        engine.submit(bid("carol", dec!(3), 1)).unwrap();

        let withdrawal = engine.drop_instrument();
        assert_eq!(withdrawal.previous_owner, Some(who("bob")));
        assert_eq!(withdrawal.cleared_orders, 2);
        assert!(!withdrawal.already_dropped);
        assert!(engine.book().is_empty());
        assert_eq!(engine.instrument().lifecycle(), Lifecycle::Dropped);

        let err = engine.submit(bid("carol", dec!(3), 2)).unwrap_err();
        assert_eq!(
            err,
            MatchingError::Registry(RegistryError::InstrumentUnavailable(fra()))
        );
        assert!(engine.assign_owner(who("carol")).is_err());

        let again = engine.drop_instrument();
        assert!(again.already_dropped);
        assert_eq!(again.previous_owner, None);
    }
}
