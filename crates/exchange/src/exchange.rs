use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info, warn};
use rust_decimal::Decimal;
use sweepstake_clock::SystemClock;
use sweepstake_core::{Instrument, InstrumentCode, Order, ParticipantId, Price, Side};
use sweepstake_matching::Submission;
use sweepstake_ports::{
    Clock, EventSink, ExchangeEvent, InstrumentDroppedEvent, MatchingResult, OrderAcceptedEvent,
    OrderCanceledEvent, OwnerChangedEvent, RegistryError,
};

use crate::config::ExchangeConfig;
use crate::error::{ExchangeError, Result};
use crate::event_sink::NullEventSink;
use crate::registry::InstrumentRegistry;

/// The sweepstake exchange: one matching engine per listed team
///
/// Constructed once at startup and shared by reference (or `Arc`) with
/// every caller. Each operation locks only the instrument it targets, and
/// events are published after that lock is released.
pub struct Exchange<C: Clock = SystemClock> {
    /// Roster of per-instrument engines
    registry: InstrumentRegistry,

    /// Market-maker participant
    house: ParticipantId,

    /// Ask seeded whenever the house takes ownership
    house_ask: Price,

    /// Source of submission timestamps
    clock: C,

    /// Downstream persistence / notification
    events: Arc<dyn EventSink>,
}

impl Exchange<SystemClock> {
    /// Full tournament roster, nobody owning anything yet
    pub fn new() -> Result<Self> {
        Self::from_config(ExchangeConfig::default())
    }

    pub fn from_config(config: ExchangeConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Exchange<C> {
    /// Create an exchange reading time from `clock`
    pub fn with_clock(config: ExchangeConfig, clock: C) -> Result<Self> {
        let registry = InstrumentRegistry::new(config.instrument_codes()?)?;
        let owners = config.owners()?;

        let exchange = Self {
            registry,
            house: config.house_participant()?,
            house_ask: config.house_ask_price()?,
            clock,
            events: Arc::new(NullEventSink),
        };

        for (code, owner) in owners {
            exchange.assign(&code, owner)?;
        }

        info!(
            "Exchange ready: {} instruments, house '{}', clock {}",
            exchange.registry.len(),
            exchange.house,
            exchange.clock.name()
        );
        Ok(exchange)
    }

    /// Route events to `sink` instead of discarding them
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    pub fn roster(&self) -> &[InstrumentCode] {
        self.registry.roster()
    }

    pub fn house(&self) -> &ParticipantId {
        &self.house
    }

    pub fn house_ask(&self) -> Price {
        self.house_ask
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn registry(&self) -> &InstrumentRegistry {
        &self.registry
    }

    fn parse_code(raw: &str) -> Result<InstrumentCode> {
        InstrumentCode::new(raw.trim()).map_err(|reason| ExchangeError::InvalidInstrumentCode {
            code: raw.to_string(),
            reason,
        })
    }

    fn parse_participant(raw: &str) -> Result<ParticipantId> {
        ParticipantId::new(raw).map_err(ExchangeError::InvalidParticipant)
    }

    fn parse_price(raw: Decimal) -> Result<Price> {
        Price::new(raw).map_err(|reason| ExchangeError::InvalidPrice {
            price: raw.to_string(),
            reason,
        })
    }

    fn publish(&self, event: ExchangeEvent) {
        debug!("Publishing event for {}: {:?}", event.instrument(), event);
        self.events.publish(event);
    }

    /// Submit a priced order
    ///
    /// Returns the trade when the order crosses, otherwise the resting
    /// order. Errors leave the instrument untouched.
    pub fn submit_order(
        &self,
        side: Side,
        code: &str,
        participant: &str,
        price: Decimal,
    ) -> Result<Submission> {
        let code = Self::parse_code(code)?;
        let participant = Self::parse_participant(participant)?;
        let price = Self::parse_price(price)?;
        self.submit(Order::new(side, code, participant, price, self.clock.now()))
    }

    /// Same as [`Exchange::submit_order`], parsing the price from text
    pub fn submit_order_str(
        &self,
        side: Side,
        code: &str,
        participant: &str,
        price: &str,
    ) -> Result<Submission> {
        let code = Self::parse_code(code)?;
        let participant = Self::parse_participant(participant)?;
        let price = Price::parse(price).map_err(|reason| ExchangeError::InvalidPrice {
            price: price.to_string(),
            reason,
        })?;
        self.submit(Order::new(side, code, participant, price, self.clock.now()))
    }

    fn submit(&self, order: Order) -> Result<Submission> {
        let code = order.instrument.clone();
        let side = order.side;
        let participant = order.participant.clone();

        let outcome = self.registry.write(&code, |engine| {
            let previous = engine.owner().cloned();
            engine.submit(order).map(|submission| (submission, previous))
        })?;
        let (submission, previous) = outcome.map_err(|e| {
            let err = ExchangeError::from(e);
            debug!("Rejected {} on {} from {}: {}", side, code, participant, err);
            err
        })?;

        match &submission {
            Submission::Traded(trade) => {
                info!(
                    "Trade {} on {}: {} bought from {} at {} ({} aggressor)",
                    trade.id,
                    trade.instrument,
                    trade.buyer,
                    trade.seller,
                    trade.price,
                    trade.aggressor
                );
                self.publish(ExchangeEvent::TradeExecuted(trade.clone()));
                self.publish(ExchangeEvent::OwnerChanged(OwnerChangedEvent {
                    instrument: trade.instrument.clone(),
                    previous,
                    owner: trade.buyer.clone(),
                    timestamp: trade.timestamp,
                }));
            }
            Submission::Accepted { order, amended } => {
                debug!(
                    "{} {} on {} at {} resting (amended: {})",
                    order.participant, order.side, order.instrument, order.price, amended
                );
                self.publish(ExchangeEvent::OrderAccepted(OrderAcceptedEvent {
                    order: order.clone(),
                    amended: *amended,
                }));
            }
        }

        Ok(submission)
    }

    /// Cancel a resting order; `false` when there was nothing to cancel
    pub fn cancel_order(&self, side: Side, code: &str, participant: &str) -> Result<bool> {
        let code = Self::parse_code(code)?;
        let participant = Self::parse_participant(participant)?;
        Ok(self.cancel(side, &code, &participant)?.is_some())
    }

    /// Cancel a resting order, failing when there is none
    pub fn withdraw_order(&self, side: Side, code: &str, participant: &str) -> Result<Order> {
        let code = Self::parse_code(code)?;
        let participant = Self::parse_participant(participant)?;
        match self.cancel(side, &code, &participant)? {
            Some(order) => Ok(order),
            None => Err(ExchangeError::NoRestingOrder {
                instrument: code,
                side,
                participant,
            }),
        }
    }

    fn cancel(
        &self,
        side: Side,
        code: &InstrumentCode,
        participant: &ParticipantId,
    ) -> Result<Option<Order>> {
        let removed = self.registry.write(code, |engine| {
            if engine.instrument().is_dropped() {
                return Err(RegistryError::InstrumentUnavailable(engine.code().clone()));
            }
            Ok(engine.cancel(side, participant))
        })??;

        if let Some(order) = &removed {
            debug!("{} canceled {} on {}", participant, side, code);
            self.publish(ExchangeEvent::OrderCanceled(OrderCanceledEvent {
                order: order.clone(),
                timestamp: self.clock.now(),
            }));
        }
        Ok(removed)
    }

    /// Withdraw an instrument from the tournament
    ///
    /// Returns the owner it had. Dropping it again is a no-op returning
    /// `None`.
    pub fn drop_instrument(&self, code: &str) -> Result<Option<ParticipantId>> {
        let code = Self::parse_code(code)?;
        let withdrawal = self.registry.drop(&code)?;

        if withdrawal.already_dropped {
            warn!("{} is already dropped", code);
            return Ok(None);
        }

        info!(
            "Dropped {}: owner {:?}, {} orders cleared",
            code,
            withdrawal.previous_owner.as_ref().map(ParticipantId::as_str),
            withdrawal.cleared_orders
        );
        self.publish(ExchangeEvent::InstrumentDropped(InstrumentDroppedEvent {
            instrument: code,
            previous_owner: withdrawal.previous_owner.clone(),
            cleared_orders: withdrawal.cleared_orders,
            timestamp: self.clock.now(),
        }));
        Ok(withdrawal.previous_owner)
    }

    /// Administrative ownership override
    ///
    /// Returns `true` when the owner changed. Assigning to the house clears
    /// the bids and seeds the house ask.
    pub fn set_owner(&self, code: &str, participant: &str) -> Result<bool> {
        let code = Self::parse_code(code)?;
        let participant = Self::parse_participant(participant)?;
        self.assign(&code, participant)
    }

    fn assign(&self, code: &InstrumentCode, participant: ParticipantId) -> Result<bool> {
        let now = self.clock.now();
        let is_house = participant == self.house;

        let outcome = self.registry.write(code, |engine| -> MatchingResult<_> {
            let previous = engine.assign_owner(participant.clone())?;
            let seeded = if is_house {
                Some(engine.seed_house_ask(&self.house, self.house_ask, now)?)
            } else {
                None
            };
            Ok((previous, seeded))
        })?;
        let (previous, seeded) = outcome?;

        let changed = previous.as_ref() != Some(&participant);
        if changed {
            info!(
                "{} assigned to {} (was {:?})",
                code,
                participant,
                previous.as_ref().map(ParticipantId::as_str)
            );
            self.publish(ExchangeEvent::OwnerChanged(OwnerChangedEvent {
                instrument: code.clone(),
                previous,
                owner: participant,
                timestamp: now,
            }));
        }
        if let Some(order) = seeded {
            debug!("House ask seeded on {} at {}", code, order.price);
            self.publish(ExchangeEvent::OrderAccepted(OrderAcceptedEvent {
                order,
                amended: false,
            }));
        }

        Ok(changed)
    }

    pub fn best_bid(&self, code: &str) -> Result<Option<Order>> {
        self.best(Side::Bid, code)
    }

    pub fn best_ask(&self, code: &str) -> Result<Option<Order>> {
        self.best(Side::Ask, code)
    }

    pub fn best(&self, side: Side, code: &str) -> Result<Option<Order>> {
        let code = Self::parse_code(code)?;
        Ok(self
            .registry
            .read(&code, |engine| engine.book().best(side).cloned())?)
    }

    /// One side of the book in price-time priority, best first
    pub fn book(&self, code: &str, side: Side) -> Result<Vec<Order>> {
        let code = Self::parse_code(code)?;
        Ok(self
            .registry
            .read(&code, |engine| engine.book().orders(side))?)
    }

    pub fn owner(&self, code: &str) -> Result<Option<ParticipantId>> {
        let code = Self::parse_code(code)?;
        Ok(self.registry.owner(&code)?)
    }

    pub fn instrument(&self, code: &str) -> Result<Instrument> {
        let code = Self::parse_code(code)?;
        Ok(self
            .registry
            .read(&code, |engine| engine.instrument().clone())?)
    }

    /// Current owner of every listed instrument
    pub fn owners(&self) -> BTreeMap<InstrumentCode, Option<ParticipantId>> {
        self.registry
            .instruments()
            .into_iter()
            .map(|instrument| {
                let owner = instrument.owner().cloned();
                (instrument.code().clone(), owner)
            })
            .collect()
    }

    /// Every listed instrument with its lifecycle, in roster order
    pub fn instruments(&self) -> Vec<Instrument> {
        self.registry.instruments()
    }
}
