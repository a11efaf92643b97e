use super::{CancelToken, Scheduler, TaskCtx, Waiter};

/// What a task wants after one step.
#[derive(Debug)]
pub enum Step {
    /// Suspend until the waiter fires. Its own continuation, if any, runs
    /// first; then the task resumes in the same poll.
    Wait(Waiter),
    /// Resume on the next poll.
    Yield,
    /// Finished; never resumed again.
    Done,
}

/// A multi-step task driven by the scheduler.
///
/// Any `FnMut(&mut TaskCtx) -> anyhow::Result<Step>` closure is a task;
/// keep the step counter or state machine in captured variables.
pub trait Task: 'static {
    fn resume(&mut self, ctx: &mut TaskCtx<'_>) -> anyhow::Result<Step>;
}

impl<F> Task for F
where
    F: FnMut(&mut TaskCtx<'_>) -> anyhow::Result<Step> + 'static,
{
    fn resume(&mut self, ctx: &mut TaskCtx<'_>) -> anyhow::Result<Step> {
        self(ctx)
    }
}

/// Handle to a running routine.
#[derive(Debug, Clone)]
pub struct RoutineHandle {
    token: CancelToken,
}

impl RoutineHandle {
    /// Stops the routine: its pending waiter is dropped and it is never
    /// resumed again.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Starts tasks on a [`Scheduler`].
pub struct Routine;

impl Routine {
    /// Schedules the first step of `task` for the next poll.
    ///
    /// Every suspension (the start, each `Wait`, each `Yield`) is one
    /// scheduler registration.
    pub fn start(scheduler: &mut Scheduler, task: impl Task) -> RoutineHandle {
        let token = CancelToken::new();
        let task: Box<dyn Task> = Box::new(task);
        scheduler.register(suspend(Waiter::next_tick(), task, token.clone()));
        RoutineHandle { token }
    }
}

/// Parks `task` on `waiter`. When it fires, the waiter's own continuation
/// runs first; if that fails the routine ends there.
fn suspend(mut waiter: Waiter, task: Box<dyn Task>, token: CancelToken) -> Waiter {
    let first = waiter.take_process();
    waiter.with_cancel(token.clone()).then(move |ctx| {
        if let Some(first) = first {
            if let Err(e) = first(ctx) {
                log::warn!("routine ended: its waiter's continuation failed: {e:#}");
                return Ok(());
            }
        }
        resume(task, token, ctx);
        Ok(())
    })
}

fn resume(mut task: Box<dyn Task>, token: CancelToken, ctx: &mut TaskCtx<'_>) {
    if token.is_cancelled() {
        log::debug!("routine cancelled");
        return;
    }
    let next = match task.resume(ctx) {
        Ok(Step::Done) => {
            log::trace!("routine finished");
            return;
        }
        Ok(Step::Yield) => Waiter::next_tick(),
        Ok(Step::Wait(waiter)) => waiter,
        Err(e) => {
            log::warn!("routine ended: step failed: {e:#}");
            return;
        }
    };
    ctx.scheduler.register(suspend(next, task, token));
}
