//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the session state machine (`ShotSession`, `AnalysisTicket`)
//! - `view`: phases and screen derivation (`SessionPhase`, `Screen`, `View`)
//! - `error`: rejected transitions (`SessionError`)
//!
//! # Usage
//!
//! ```ignore
//! use cueshot_core::session::{ShotSession, SessionPhase, Screen};
//! ```

mod error;
mod model;
mod view;


pub use error::SessionError;
pub use model::{AnalysisTicket, ShotSession};
pub use view::{AnalysisStatus, Screen, SessionPhase, View};
