use std::fmt;
use std::time::Instant;

use crate::input::InputState;
use crate::resource::ResourceManager;
use crate::scene::SceneTree;

use super::Waiter;

/// What a waiter's predicate and continuation can reach.
pub struct TaskCtx<'a> {
    /// Register follow-up waiters here; they are first polled on the next tick.
    pub scheduler: &'a mut Scheduler,
    pub tree: &'a mut SceneTree,
    /// Input as published for the current tick.
    pub input: &'a InputState,
    pub resources: &'a mut ResourceManager,
    /// The instant the current poll runs at.
    pub now: Instant,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WaiterId(u64);

impl fmt::Display for WaiterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "waiter#{}", self.0)
    }
}

/// Frame-polled queue of [`Waiter`]s.
///
/// Each [`poll`](Self::poll) evaluates every pending waiter once. A waiter
/// whose condition holds fires its continuation and is discarded; the rest
/// stay queued. Waiters that hold on the same poll fire in registration
/// order, but callers should only rely on "all of them fire on that poll".
#[derive(Default)]
pub struct Scheduler {
    waiters: Vec<(WaiterId, Waiter)>,
    next_id: u64,
    registrations: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a waiter. It is first evaluated by the next poll.
    pub fn register(&mut self, waiter: Waiter) -> WaiterId {
        let id = WaiterId(self.next_id);
        self.next_id += 1;
        self.registrations += 1;
        log::trace!("registered {id}");
        self.waiters.push((id, waiter));
        id
    }

    /// Waiters still queued.
    #[inline]
    pub fn pending(&self) -> usize {
        self.waiters.len()
    }

    /// Total waiters ever registered.
    #[inline]
    pub fn registrations(&self) -> u64 {
        self.registrations
    }

    /// Drops every queued waiter without firing it.
    pub fn clear(&mut self) {
        self.waiters.clear();
    }

    /// Evaluates each queued waiter once at `now`. Returns how many fired.
    ///
    /// A cancelled waiter is dropped. A predicate error drops its waiter; a
    /// continuation error is logged. Neither affects the other waiters.
    pub fn poll(
        &mut self,
        now: Instant,
        tree: &mut SceneTree,
        input: &InputState,
        resources: &mut ResourceManager,
    ) -> usize {
        let queue = std::mem::take(&mut self.waiters);
        let mut survivors = Vec::with_capacity(queue.len());
        let mut fired = 0;

        let mut ctx = TaskCtx { scheduler: self, tree, input, resources, now };
        for (id, mut waiter) in queue {
            if waiter.is_cancelled() {
                log::debug!("{id} cancelled");
                continue;
            }
            match waiter.check(&ctx) {
                Ok(true) => {
                    fired += 1;
                    if let Some(process) = waiter.take_process() {
                        if let Err(e) = process(&mut ctx) {
                            log::warn!("{id} continuation failed: {e:#}");
                        }
                    }
                }
                Ok(false) => survivors.push((id, waiter)),
                Err(e) => log::warn!("{id} predicate failed, dropping it: {e:#}"),
            }
        }

        let added = std::mem::replace(&mut self.waiters, survivors);
        self.waiters.extend(added);
        fired
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.waiters.len())
            .field("registrations", &self.registrations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use anyhow::bail;

    use super::*;
    use crate::scene::{GameObject, Scene};
    use crate::input::{InputEvent, Key, KeyState};
    use crate::paint::ImageData;
    use crate::resource::ImageResource;
    use crate::schedule::{CancelToken, Completion, Outcome};

    fn flag() -> (Rc<Cell<bool>>, Rc<Cell<bool>>) {
        let f = Rc::new(Cell::new(false));
        (f.clone(), f)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// What a frame driver hands the scheduler.
    #[derive(Default)]
    struct World {
        tree: SceneTree,
        input: InputState,
        resources: ResourceManager,
    }

    impl World {
        fn poll(&mut self, s: &mut Scheduler, now: Instant) -> usize {
            s.poll(now, &mut self.tree, &self.input, &mut self.resources)
        }
    }

    // ── deadlines ─────────────────────────────────────────────────────────

    #[test]
    fn millis_fires_on_first_poll_at_or_after_deadline() {
        let t0 = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        let (set, seen) = flag();
        s.register(Waiter::millis_from(t0, 100).then(move |_| {
            set.set(true);
            Ok(())
        }));

        for elapsed in [0, 16, 50, 99] {
            assert_eq!(w.poll(&mut s, t0 + ms(elapsed)), 0);
            assert!(!seen.get(), "fired early at {elapsed}ms");
        }
        assert_eq!(w.poll(&mut s, t0 + ms(100)), 1);
        assert!(seen.get());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn seconds_deadline_and_negative_is_immediate() {
        let t0 = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        s.register(Waiter::seconds_from(t0, 0.5));
        s.register(Waiter::seconds_from(t0, -3.0));
        assert_eq!(w.poll(&mut s, t0), 1);
        assert_eq!(w.poll(&mut s, t0 + ms(499)), 0);
        assert_eq!(w.poll(&mut s, t0 + ms(500)), 1);
    }

    // ── completions ───────────────────────────────────────────────────────

    #[test]
    fn settled_fires_for_success_and_failure() {
        let now = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        let (ok_completer, ok) = Completion::pair();
        let (bad_completer, bad) = Completion::pair();
        let outcomes = Rc::new(RefCell::new(Vec::new()));

        for completion in [ok, bad] {
            let out = outcomes.clone();
            let watched = completion.clone();
            s.register(Waiter::settled(completion).then(move |_| {
                out.borrow_mut().extend(watched.outcome());
                Ok(())
            }));
        }

        assert_eq!(w.poll(&mut s, now), 0);
        ok_completer.succeed();
        bad_completer.fail("decode");
        assert_eq!(w.poll(&mut s, now), 2);

        let mut got = outcomes.borrow().clone();
        got.sort_by_key(|o| o.is_success());
        assert_eq!(got, vec![Outcome::Failed("decode".into()), Outcome::Succeeded]);
    }

    // ── predicates ────────────────────────────────────────────────────────

    #[test]
    fn predicate_sees_the_tree() {
        let now = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        s.register(Waiter::until(|ctx| ctx.tree.scene_by_name("late").is_some()));

        assert_eq!(w.poll(&mut s, now), 0);
        w.tree.add_scene(Scene::new("late"));
        assert_eq!(w.poll(&mut s, now), 1);
    }

    #[test]
    fn predicate_sees_input_edges() {
        let now = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        s.register(Waiter::until(|ctx| ctx.input.key_press() == Some(Key::Character('k'))));

        assert_eq!(w.poll(&mut s, now), 0);
        w.input.apply_event(&InputEvent::Key {
            key: Key::Character('k'),
            state: KeyState::Pressed,
            repeat: false,
        });
        assert_eq!(w.poll(&mut s, now), 0, "edge is not published before step");
        w.input.step();
        assert_eq!(w.poll(&mut s, now), 1);
    }

    #[test]
    fn continuation_can_use_resources() {
        let now = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        s.register(Waiter::next_tick().then(|ctx| {
            ctx.resources.save("px", ImageResource::from_data(ImageData::filled(2, 1, [0; 4])));
            Ok(())
        }));

        w.poll(&mut s, now);
        let saved = w.resources.get_as::<ImageResource>("px").and_then(|r| r.image());
        assert_eq!(saved.map(|i| i.width()), Some(2));
    }

    #[test]
    fn failing_predicate_is_dropped_alone() {
        let now = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        let (set, seen) = flag();
        s.register(Waiter::try_until(|_| bail!("broken predicate")));
        s.register(Waiter::next_tick().then(move |_| {
            set.set(true);
            Ok(())
        }));

        assert_eq!(w.poll(&mut s, now), 1);
        assert!(seen.get());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn failing_continuation_does_not_affect_others() {
        let now = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        let (set, seen) = flag();
        s.register(Waiter::next_tick().then(|_| bail!("boom")));
        s.register(Waiter::next_tick().then(move |_| {
            set.set(true);
            Ok(())
        }));

        assert_eq!(w.poll(&mut s, now), 2);
        assert!(seen.get());
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn same_tick_waiters_all_fire() {
        let t0 = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        for n in 0..4u32 {
            let fired = fired.clone();
            s.register(Waiter::millis_from(t0, 10).then(move |_| {
                fired.borrow_mut().push(n);
                Ok(())
            }));
        }

        w.poll(&mut s, t0 + ms(10));

        let mut got = fired.borrow().clone();
        got.sort_unstable();
        assert_eq!(got, vec![0, 1, 2, 3]);
    }

    #[test]
    fn waiters_registered_during_poll_wait_for_the_next_one() {
        let now = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        let (set, seen) = flag();
        s.register(Waiter::next_tick().then(move |ctx| {
            ctx.scheduler.register(Waiter::next_tick().then(move |_| {
                set.set(true);
                Ok(())
            }));
            Ok(())
        }));

        assert_eq!(w.poll(&mut s, now), 1);
        assert!(!seen.get());
        assert_eq!(s.pending(), 1);
        assert_eq!(w.poll(&mut s, now), 1);
        assert!(seen.get());
        assert_eq!(s.registrations(), 2);
    }

    #[test]
    fn continuation_can_edit_the_tree() {
        let now = Instant::now();
        let mut w = World::default();
        let scene = w.tree.add_scene(Scene::new("s"));
        let mut s = Scheduler::new();
        s.register(Waiter::next_tick().then(move |ctx| {
            ctx.tree.spawn_child(scene, GameObject::new("late"))?;
            Ok(())
        }));
        w.poll(&mut s, now);
        assert_eq!(w.tree.children_by_name(scene, "late").len(), 1);
    }

    // ── cancellation ──────────────────────────────────────────────────────

    #[test]
    fn cancelled_waiter_never_fires() {
        let now = Instant::now();
        let mut w = World::default();
        let mut s = Scheduler::new();
        let token = CancelToken::new();
        let (set, seen) = flag();
        s.register(Waiter::next_tick().with_cancel(token.clone()).then(move |_| {
            set.set(true);
            Ok(())
        }));

        token.cancel();

        assert_eq!(w.poll(&mut s, now), 0);
        assert!(!seen.get());
        assert_eq!(s.pending(), 0);
    }
}
