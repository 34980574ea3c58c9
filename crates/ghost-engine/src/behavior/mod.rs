//! Entity behavior: the state/trigger table, seek-and-stop steering and the
//! per-tick brain that ties sensors to both.

pub mod brain;
pub mod state;
pub mod steering;

pub use brain::{sense, step, Arrival, BehaviorParams, Sensors};
pub use state::{EntityState, Intent, Rule, Trigger, TransitionTable};
pub use steering::{angle_of, flee_target, seek, SeekParams, SeekStep};
