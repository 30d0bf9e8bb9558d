//! Action-result protocol and the movement resolver.
//!
//! # Module Structure
//!
//! - `result`: [`ActionResult`], the return value of every behavior
//! - `accumulate`: folding many results into one per scheduler pass
//! - `kind`: symbolic actions and directions
//! - `movement`: [`try_move`] / [`execute_action`], the only position mutator

mod accumulate;
mod kind;
mod movement;
mod result;

pub use accumulate::ActionAccumulator;
pub use kind::{Action, CoreAction, Direction};
pub use movement::{blocks_movement, execute_action, is_walkable_by, position_of, try_move};
pub use result::{ActionResult, Blocker, Effect, LookInfo, LookSubject, ResultFlags};
