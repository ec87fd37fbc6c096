//! Lock-picking simulation engine for Pathfinder 2e tables.
//!
//! Automates the bookkeeping of a repeated Thievery check against a lock:
//! typed bonus stacking, four-step degrees of success, a progress loop with
//! the Sneaky Key bonus and tool breakage, an on-demand "request roll"
//! resolver for inline `@Check[...]` tags, and a presentation adapter that
//! turns every run into a transcript report.
//!
//! The engine never rolls dice or looks up character data on its own. Both
//! arrive through small traits ([`FaceSource`], [`ModifierSource`]) so a
//! host can plug in its own dice tray and character sheets.

pub mod actor;
pub mod degree;
pub mod dice;
pub mod error;
pub mod lock;
pub mod modifier;
pub mod report;
pub mod request;
pub mod session;
pub mod skill;

pub use actor::ModifierSource;
pub use degree::{Degree, evaluate};
pub use dice::{FaceSource, HostDice, ScriptedFaces, SilentDice};
pub use error::{LockError, LockResult};
pub use lock::{
    AttemptRecord, Feasibility, LockConfiguration, LockPreset, SimulationOutcome,
    SimulationResult,
};
pub use modifier::{AggregatedModifier, BonusCategory, Modifier, aggregate};
pub use report::{Report, ReportSink};
pub use request::{RequestCheckSpec, RequestRoll, RequestRollResult, StopReason};
pub use session::{PickOutcome, PickRequest, pick_a_lock, request_roll, request_roll_from_tag};
pub use skill::Skill;
