//! Topic-based event bus implementation.

use tokio::sync::broadcast;

use combat_core::{CombatEvent, Outcome};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Resource, effect and resolution notifications
    Combat,
    /// Turn flow: state transitions, skips, passes, rejections
    Turn,
    /// Every event from both topics, in publish order
    All,
}

/// Event wrapper published on the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A notification drained from the engine.
    Combat { round: u32, event: CombatEvent },

    /// The player must choose an action.
    AwaitingInput { round: u32 },

    /// The fight is over. Published once per session.
    Finished { outcome: Outcome, rounds: u32 },
}

impl Event {
    /// The routed topic: `Combat` or `Turn`, never `All`.
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat { event, .. } if event.is_turn_flow() => Topic::Turn,
            Event::Combat { .. } => Topic::Combat,
            Event::AwaitingInput { .. } | Event::Finished { .. } => Topic::Turn,
        }
    }
}

/// Topic-based event bus
///
/// Consumers subscribe to the topics they care about. A consumer that needs
/// the relative order of combat and turn events (a log) subscribes to
/// [`Topic::All`]; separate receivers give no ordering across topics.
/// Cloning the bus shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    combat: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    all: broadcast::Sender<Event>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a bus with `capacity` buffered events per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            combat: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
            all: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Turn => &self.turn,
            Topic::All => &self.all,
        }
    }

    /// Publish an event to its corresponding topic and to [`Topic::All`]
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        // No subscribers is normal, not an error
        if self.all.send(event.clone()).is_err() {
            tracing::trace!("No subscribers for topic {:?}", Topic::All);
        }
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
