use serde::{Deserialize, Serialize};

use crate::timer::PhaseRecord;

/// A semantic moment produced by the engine during a control action or poll.
///
/// Within one poll, events are always reported in declaration order:
/// `Half`, `Tick`, `End`, `PhaseSwitch`, `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Half,
    Tick,
    End,
    PhaseSwitch,
    Start,
}

impl Event {
    /// The cue this event sounds, if any. `PhaseSwitch` is silent.
    pub fn cue_kind(self) -> Option<crate::audio::CueKind> {
        use crate::audio::CueKind;
        match self {
            Event::Start => Some(CueKind::Start),
            Event::Half => Some(CueKind::Half),
            Event::Tick => Some(CueKind::Tick),
            Event::End => Some(CueKind::End),
            Event::PhaseSwitch => None,
        }
    }
}

/// Everything a single poll produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollOutcome {
    pub events: Vec<Event>,
    /// Rhythmic beat position of the tick in `events`. `None` when no tick
    /// fired or the interval is not rhythmic.
    pub beat: Option<u8>,
    /// Record of the phase that just completed, if any.
    pub completed: Option<PhaseRecord>,
}

impl PollOutcome {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, event: Event) -> bool {
        self.events.contains(&event)
    }
}
