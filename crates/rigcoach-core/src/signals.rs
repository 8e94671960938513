//! Completion signals raised by sensors and the spawner.
//!
//! Sensors push signals during a tick; the orchestrator drains them after all
//! sensors have run. Each source has at most one handler. A signal whose
//! source has no handler is dropped, both when it is emitted and when it is
//! drained, so a goal transition discards anything its predecessor's sensors
//! still had queued and nothing raised before a goal armed can complete it.

use std::collections::{HashMap, VecDeque};

use hecs::Entity;
use log::debug;
use rigcoach_logic::parts::PartSlot;

/// Who raised a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSource {
    Spawner,
    Snap(Entity),
    RotationSnap(Entity),
    Latch(Entity),
    Screwdriver(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Spawned { slot: PartSlot, entity: Entity },
    Snapped(Entity),
    RotationSnapped(Entity),
    Touched(Entity),
    Screwed(Entity),
}

impl Signal {
    pub fn source(&self) -> SignalSource {
        match *self {
            Signal::Spawned { .. } => SignalSource::Spawner,
            Signal::Snapped(e) => SignalSource::Snap(e),
            Signal::RotationSnapped(e) => SignalSource::RotationSnap(e),
            Signal::Touched(e) => SignalSource::Latch(e),
            Signal::Screwed(e) => SignalSource::Screwdriver(e),
        }
    }
}

/// What the orchestrator does with a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    CountSpawns,
    CompleteOnSnap,
    CompleteOnRotation,
    SettleLatch,
    DriveScrew,
}

#[derive(Debug, Default)]
pub struct SignalBus {
    queue: VecDeque<Signal>,
    handlers: HashMap<SignalSource, Handler>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `source`, replacing any previous one.
    pub fn subscribe(&mut self, source: SignalSource, handler: Handler) {
        self.handlers.insert(source, handler);
    }

    pub fn unsubscribe(&mut self, source: SignalSource) -> Option<Handler> {
        self.handlers.remove(&source)
    }

    pub fn is_subscribed(&self, source: SignalSource) -> bool {
        self.handlers.contains_key(&source)
    }

    pub fn subscription_count(&self) -> usize {
        self.handlers.len()
    }

    /// Drop every handler. Queued signals stay and are discarded on drain.
    pub fn clear_subscriptions(&mut self) {
        self.handlers.clear();
    }

    /// Drop everything, queued signals included.
    pub fn reset(&mut self) {
        self.handlers.clear();
        self.queue.clear();
    }

    /// Queue `signal` if its source has a handler right now.
    pub fn emit(&mut self, signal: Signal) {
        if self.handlers.contains_key(&signal.source()) {
            self.queue.push_back(signal);
        } else {
            debug!("no handler for {:?}", signal);
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Next queued signal that still has a handler.
    pub fn next(&mut self) -> Option<(Signal, Handler)> {
        while let Some(signal) = self.queue.pop_front() {
            match self.handlers.get(&signal.source()) {
                Some(handler) => return Some((signal, *handler)),
                None => debug!("dropping unhandled {:?}", signal),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    #[test]
    fn test_one_handler_per_source() {
        let mut world = World::new();
        let e = world.spawn(());
        let mut bus = SignalBus::new();
        bus.subscribe(SignalSource::Snap(e), Handler::CompleteOnSnap);
        bus.subscribe(SignalSource::Snap(e), Handler::CompleteOnRotation);
        assert_eq!(bus.subscription_count(), 1);

        bus.emit(Signal::Snapped(e));
        assert_eq!(bus.next(), Some((Signal::Snapped(e), Handler::CompleteOnRotation)));
        assert_eq!(bus.next(), None);
    }

    #[test]
    fn test_unhandled_signals_dropped() {
        let mut world = World::new();
        let a = world.spawn(());
        let b = world.spawn(());
        let mut bus = SignalBus::new();
        bus.subscribe(SignalSource::Screwdriver(b), Handler::DriveScrew);

        bus.emit(Signal::Screwed(a));
        bus.emit(Signal::Screwed(b));
        assert_eq!(bus.next(), Some((Signal::Screwed(b), Handler::DriveScrew)));
        assert_eq!(bus.pending(), 0);

        bus.emit(Signal::Screwed(b));
        bus.clear_subscriptions();
        assert_eq!(bus.next(), None);
    }

    #[test]
    fn test_signal_before_subscribe_is_dropped() {
        let mut world = World::new();
        let e = world.spawn(());
        let mut bus = SignalBus::new();

        bus.emit(Signal::Spawned {
            slot: PartSlot::first(rigcoach_logic::parts::PartType::Tower),
            entity: e,
        });
        assert_eq!(bus.pending(), 0);

        bus.subscribe(SignalSource::Spawner, Handler::CountSpawns);
        assert_eq!(bus.next(), None);
    }
}
