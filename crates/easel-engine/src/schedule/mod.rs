//! Cooperative, frame-polled scheduling.
//!
//! A [`Waiter`] pairs a condition with a one-shot continuation; the
//! [`Scheduler`] polls every pending waiter once per tick. A [`Routine`] runs
//! a multi-step [`Task`] by suspending on waiters between steps.

mod completion;
mod routine;
mod scheduler;
mod waiter;

pub use completion::{Completer, Completion, Outcome};
pub use routine::{Routine, RoutineHandle, Step, Task};
pub use scheduler::{Scheduler, TaskCtx, WaiterId};
pub use waiter::{CancelToken, Continuation, Waiter};
