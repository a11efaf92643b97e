use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::{Completion, TaskCtx};

/// One-shot work run when a waiter's condition holds.
pub type Continuation = Box<dyn FnOnce(&mut TaskCtx<'_>) -> anyhow::Result<()>>;

type Predicate = Box<dyn FnMut(&TaskCtx<'_>) -> anyhow::Result<bool>>;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

enum Condition {
    Predicate(Predicate),
    /// Satisfied once the polled time reaches the deadline.
    Deadline(Instant),
    /// Satisfied once the completion settles either way.
    Settled(Completion),
    /// Satisfied on the first poll that sees it.
    NextTick,
}

/// A condition polled once per tick plus a continuation fired once when it
/// holds. Built with one of the constructors, then given work with
/// [`then`](Self::then) and registered on a [`Scheduler`](super::Scheduler).
pub struct Waiter {
    condition: Condition,
    process: Option<Continuation>,
    cancel: Vec<CancelToken>,
}

impl Waiter {
    fn with_condition(condition: Condition) -> Self {
        Self { condition, process: None, cancel: Vec::new() }
    }

    pub fn until(mut predicate: impl FnMut(&TaskCtx<'_>) -> bool + 'static) -> Self {
        Self::with_condition(Condition::Predicate(Box::new(move |ctx| Ok(predicate(ctx)))))
    }

    /// Like [`until`](Self::until); a predicate error drops the waiter
    /// without running its continuation.
    pub fn try_until(predicate: impl FnMut(&TaskCtx<'_>) -> anyhow::Result<bool> + 'static) -> Self {
        Self::with_condition(Condition::Predicate(Box::new(predicate)))
    }

    pub fn deadline(at: Instant) -> Self {
        Self::with_condition(Condition::Deadline(at))
    }

    /// Deadline `millis` after now.
    pub fn millis(millis: u64) -> Self {
        Self::millis_from(Instant::now(), millis)
    }

    pub fn millis_from(start: Instant, millis: u64) -> Self {
        Self::deadline(start + Duration::from_millis(millis))
    }

    /// Deadline `seconds` after now. Negative or non-finite values mean "now".
    pub fn seconds(seconds: f32) -> Self {
        Self::seconds_from(Instant::now(), seconds)
    }

    pub fn seconds_from(start: Instant, seconds: f32) -> Self {
        let wait = Duration::try_from_secs_f32(seconds).unwrap_or(Duration::ZERO);
        Self::deadline(start + wait)
    }

    /// Fires once `completion` settles, success or failure. Inspect
    /// [`Completion::outcome`] in the continuation to tell them apart.
    pub fn settled(completion: Completion) -> Self {
        Self::with_condition(Condition::Settled(completion))
    }

    pub fn next_tick() -> Self {
        Self::with_condition(Condition::NextTick)
    }

    /// Sets the continuation, replacing any previous one.
    pub fn then(
        mut self,
        process: impl FnOnce(&mut TaskCtx<'_>) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.process = Some(Box::new(process));
        self
    }

    /// The waiter is discarded unfired once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel.push(token);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.iter().any(CancelToken::is_cancelled)
    }

    pub(crate) fn check(&mut self, ctx: &TaskCtx<'_>) -> anyhow::Result<bool> {
        Ok(match &mut self.condition {
            Condition::Predicate(p) => p(ctx)?,
            Condition::Deadline(at) => ctx.now >= *at,
            Condition::Settled(c) => c.is_settled(),
            Condition::NextTick => true,
        })
    }

    pub(crate) fn take_process(&mut self) -> Option<Continuation> {
        self.process.take()
    }
}

impl fmt::Debug for Waiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let condition = match &self.condition {
            Condition::Predicate(_) => "predicate".to_string(),
            Condition::Deadline(at) => format!("deadline {at:?}"),
            Condition::Settled(c) => format!("settled({})", c.is_settled()),
            Condition::NextTick => "next tick".to_string(),
        };
        f.debug_struct("Waiter")
            .field("condition", &condition)
            .field("has_process", &self.process.is_some())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
