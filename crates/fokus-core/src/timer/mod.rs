mod engine;
mod phase;
mod scheduler;
mod settings;
mod state;

pub use engine::{DisplaySnapshot, TimerEngine};
pub use phase::{advance, PhaseRecord};
pub use scheduler::{tick, END_EPSILON};
pub use settings::{IntervalMode, SignalPolicy, TimerSettings};
pub use state::{elapsed, Phase, RunStatus, TimerState};
