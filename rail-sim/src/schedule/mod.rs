//! Train positions from the timetable.
//!
//! This module answers: "where is this train, and which way is it facing,
//! at simulation time `t`?"
//!
//! Every query is computed from scratch from the dataset; nothing is cached
//! between frames. A train that is not on a leg, or whose leg refers to a
//! track or station that does not exist, has no position: callers hide it.

mod position;

pub use position::{TrainPosition, active_leg, leg_progress, position_at, positions_at, sub_path};
