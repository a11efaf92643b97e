use std::time::Instant;

use anyhow::Context;

use crate::draw::{Painter, PaintSurface};
use crate::input::{InputEvent, InputState};
use crate::resource::ResourceManager;
use crate::scene::{traverse, SceneTree};
use crate::schedule::Scheduler;
use crate::time::FrameClock;

use super::{App, AppControl, Cursor, DriverConfig, FrameCtx};

/// Single authority over "one frame has elapsed".
///
/// Owns the scene tree, input state, scheduler, resources and clock. One
/// tick runs, in order: clear the surface (if configured), publish input
/// edges, settle finished resource loads, the app's `on_frame`, the tree
/// traversal, the scheduler poll, and finally records the frame end for the
/// next delta.
pub struct FrameDriver {
    config: DriverConfig,
    tree: SceneTree,
    input: InputState,
    scheduler: Scheduler,
    resources: ResourceManager,
    clock: FrameClock,
    cursor: Cursor,
    setup_done: bool,
}

impl FrameDriver {
    pub fn new(config: DriverConfig) -> Self {
        let clock = FrameClock::new(config.target_framerate);
        Self {
            config,
            tree: SceneTree::new(),
            input: InputState::new(),
            scheduler: Scheduler::new(),
            resources: ResourceManager::new(),
            clock,
            cursor: Cursor::Default,
            setup_done: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    #[inline]
    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut SceneTree {
        &mut self.tree
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    #[inline]
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    #[inline]
    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Cursor requested by the last tick.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Feeds one platform input event. Edges become visible on the next tick.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input.apply_event(event);
    }

    /// Runs one frame on the wall clock. The frame end is taken after all
    /// work finished.
    pub fn tick<A: App + ?Sized>(
        &mut self,
        surface: &mut dyn PaintSurface,
        app: &mut A,
    ) -> anyhow::Result<AppControl> {
        let control = self.run_frame(Instant::now(), surface, app)?;
        self.clock.finish(Instant::now());
        Ok(control)
    }

    /// Runs one frame as if it started and ended at `now`.
    pub fn tick_at<A: App + ?Sized>(
        &mut self,
        now: Instant,
        surface: &mut dyn PaintSurface,
        app: &mut A,
    ) -> anyhow::Result<AppControl> {
        let control = self.run_frame(now, surface, app)?;
        self.clock.finish(now);
        Ok(control)
    }

    fn run_frame<A: App + ?Sized>(
        &mut self,
        now: Instant,
        surface: &mut dyn PaintSurface,
        app: &mut A,
    ) -> anyhow::Result<AppControl> {
        let time = self.clock.begin(now);

        if self.config.clear {
            let size = surface.size();
            surface.clear_rect(0.0, 0.0, size.width, size.height);
        }
        self.input.step();
        self.resources.poll();

        let mut ctx = FrameCtx::new(
            &mut self.tree,
            &self.input,
            time,
            Painter::new(surface, self.config.camera),
            &mut self.scheduler,
            &mut self.resources,
        );

        if !self.setup_done {
            self.setup_done = true;
            log::debug!("running application setup");
            app.setup(&mut ctx).context("application setup failed")?;
        }

        let control = app.on_frame(&mut ctx);
        traverse(&mut ctx);
        let cursor = ctx.cursor.or(ctx.scene_cursor).unwrap_or_default();

        self.cursor = cursor;
        self.scheduler
            .poll(now, &mut self.tree, &self.input, &mut self.resources);
        Ok(control)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use anyhow::bail;

    use super::*;
    use crate::coords::Vector2;
    use crate::draw::{Camera, DrawOptions, PaintOp, RecordingSurface};
    use crate::input::{Key, KeyState, MouseButton, MouseButtonState};
    use crate::resource::ImageResource;
    use crate::scene::{Behavior, GameObject, ObjectId, Scene};
    use crate::schedule::Waiter;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe(Log);

    impl Behavior for Probe {
        fn update(&mut self, _this: ObjectId, ctx: &mut FrameCtx<'_>) -> anyhow::Result<()> {
            self.0.borrow_mut().push(format!("tree {}", ctx.time.frame_index));
            Ok(())
        }
    }

    /// Builds one scene in setup and logs what each frame sees.
    #[derive(Default)]
    struct TestApp {
        log: Log,
        setups: u32,
        deltas: Vec<f32>,
        clicks: Vec<bool>,
        cursor: Option<Cursor>,
        fail_setup: bool,
    }

    impl App for TestApp {
        fn setup(&mut self, ctx: &mut FrameCtx<'_>) -> anyhow::Result<()> {
            self.setups += 1;
            if self.fail_setup {
                bail!("no assets");
            }
            let scene = ctx.tree.add_scene(Scene::new("main").with_cursor(Cursor::Crosshair));
            ctx.tree.spawn_child(scene, GameObject::new("probe").with_behavior(Probe(self.log.clone())))?;
            Ok(())
        }

        fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
            self.log.borrow_mut().push(format!("app {}", ctx.time.frame_index));
            self.deltas.push(ctx.delta_time());
            self.clicks.push(ctx.input.mouse_click());
            if let Some(cursor) = self.cursor {
                ctx.set_cursor(cursor);
            }
            let log = self.log.clone();
            let frame = ctx.time.frame_index;
            ctx.scheduler.register(Waiter::next_tick().then(move |_| {
                log.borrow_mut().push(format!("waiter {frame}"));
                Ok(())
            }));
            AppControl::Continue
        }
    }

    fn surface() -> RecordingSurface {
        RecordingSurface::new(320.0, 240.0)
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn app_then_tree_then_scheduler() {
        let t0 = Instant::now();
        let mut driver = FrameDriver::new(DriverConfig::default());
        let mut app = TestApp::default();
        let mut s = surface();

        driver.tick_at(t0, &mut s, &mut app).unwrap();
        driver.tick_at(t0 + Duration::from_millis(16), &mut s, &mut app).unwrap();

        assert_eq!(
            *app.log.borrow(),
            vec!["app 0", "tree 0", "waiter 0", "app 1", "tree 1", "waiter 1"]
        );
        assert_eq!(app.setups, 1);
    }

    #[test]
    fn clears_before_drawing_when_configured() {
        let t0 = Instant::now();
        let mut app = TestApp::default();

        let mut s = surface();
        FrameDriver::new(DriverConfig::default()).tick_at(t0, &mut s, &mut app).unwrap();
        assert_eq!(
            s.ops().first(),
            Some(&PaintOp::ClearRect { x: 0.0, y: 0.0, width: 320.0, height: 240.0 })
        );

        let mut s = surface();
        let mut app = TestApp::default();
        FrameDriver::new(DriverConfig::default().with_clear(false))
            .tick_at(t0, &mut s, &mut app)
            .unwrap();
        assert!(!s.ops().iter().any(|op| matches!(op, PaintOp::ClearRect { .. })));
    }

    // ── timing ────────────────────────────────────────────────────────────

    #[test]
    fn delta_time_is_framerate_normalized() {
        let t0 = Instant::now();
        let mut driver = FrameDriver::new(DriverConfig::default().with_target_framerate(50.0));
        let mut app = TestApp::default();
        let mut s = surface();

        driver.tick_at(t0, &mut s, &mut app).unwrap();
        driver.tick_at(t0 + Duration::from_millis(20), &mut s, &mut app).unwrap();
        driver.tick_at(t0 + Duration::from_millis(60), &mut s, &mut app).unwrap();

        assert_eq!(app.deltas[0], 0.0);
        assert!((app.deltas[1] - 1.0).abs() < 1e-4);
        assert!((app.deltas[2] - 2.0).abs() < 1e-4);
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn click_edge_lasts_one_tick() {
        let t0 = Instant::now();
        let mut driver = FrameDriver::new(DriverConfig::default());
        let mut app = TestApp::default();
        let mut s = surface();

        driver.handle_event(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
        });
        driver.tick_at(t0, &mut s, &mut app).unwrap();
        driver.tick_at(t0, &mut s, &mut app).unwrap();

        assert_eq!(app.clicks, vec![true, false]);
        assert!(driver.input().mouse_down());
    }

    #[test]
    fn key_press_waiter_fires_on_the_tick_the_key_goes_down() {
        let t0 = Instant::now();
        let mut driver = FrameDriver::new(DriverConfig::default());
        let mut app = TestApp::default();
        let mut s = surface();

        let fired_on = Rc::new(RefCell::new(None));
        let seen = fired_on.clone();
        driver.scheduler_mut().register(
            Waiter::until(|t| t.input.key_press() == Some(Key::Character('k'))).then(move |t| {
                *seen.borrow_mut() = Some(t.now);
                Ok(())
            }),
        );

        driver.tick_at(t0, &mut s, &mut app).unwrap();
        assert_eq!(*fired_on.borrow(), None);

        let down = t0 + Duration::from_millis(16);
        driver.handle_event(&InputEvent::Key {
            key: Key::Character('k'),
            state: KeyState::Pressed,
            repeat: false,
        });
        driver.tick_at(down, &mut s, &mut app).unwrap();
        assert_eq!(*fired_on.borrow(), Some(down));
    }

    // ── resources ─────────────────────────────────────────────────────────

    #[test]
    fn finished_loads_settle_during_a_tick() {
        let t0 = Instant::now();
        let mut driver = FrameDriver::new(DriverConfig::default());
        let mut app = TestApp::default();
        let mut s = surface();

        let mut bytes = std::io::Cursor::new(Vec::new());
        image::RgbaImage::new(4, 4)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        assert!(driver.resources_mut().save("tile", ImageResource::from_encoded("tile", bytes.into_inner())));

        let completion = driver.resources().completion("tile").unwrap();
        let fired = Rc::new(RefCell::new(false));
        let flag = fired.clone();
        driver.scheduler_mut().register(Waiter::settled(completion.clone()).then(move |t| {
            *flag.borrow_mut() = t.resources.get_as::<ImageResource>("tile").is_some();
            Ok(())
        }));
        assert!(!completion.is_settled());

        let deadline = t0 + Duration::from_secs(5);
        let mut now = t0;
        while !*fired.borrow() && Instant::now() < deadline {
            driver.tick_at(now, &mut s, &mut app).unwrap();
            now += Duration::from_millis(16);
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(completion.succeeded());
        assert!(*fired.borrow());
    }

    // ── cursor ────────────────────────────────────────────────────────────

    #[test]
    fn explicit_cursor_beats_scene_hint_for_one_frame() {
        let t0 = Instant::now();
        let mut driver = FrameDriver::new(DriverConfig::default());
        let mut app = TestApp { cursor: Some(Cursor::Wait), ..TestApp::default() };
        let mut s = surface();

        driver.tick_at(t0, &mut s, &mut app).unwrap();
        assert_eq!(driver.cursor(), Cursor::Wait);

        app.cursor = None;
        driver.tick_at(t0, &mut s, &mut app).unwrap();
        assert_eq!(driver.cursor(), Cursor::Crosshair);

        driver.tree_mut().set_scene_enabled("main", false).unwrap();
        driver.tick_at(t0, &mut s, &mut app).unwrap();
        assert_eq!(driver.cursor(), Cursor::Default);
    }

    // ── setup ─────────────────────────────────────────────────────────────

    #[test]
    fn setup_failure_aborts_the_tick() {
        let mut driver = FrameDriver::new(DriverConfig::default());
        let mut app = TestApp { fail_setup: true, ..TestApp::default() };
        let err = driver.tick_at(Instant::now(), &mut surface(), &mut app).unwrap_err();
        assert!(format!("{err:#}").contains("no assets"));
        assert!(app.log.borrow().is_empty());
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn configured_camera_projects_origins() {
        struct Dot;
        impl App for Dot {
            fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
                ctx.draw(DrawOptions::empty().origin(Vector2::new(10.0, 0.0)));
                AppControl::Exit
            }
        }

        let camera = Camera { offset: Vector2::new(5.0, 5.0), zoom: 2.0 };
        let mut driver = FrameDriver::new(DriverConfig::default().with_camera(camera));
        let mut s = surface();
        let control = driver.tick_at(Instant::now(), &mut s, &mut Dot).unwrap();

        assert_eq!(control, AppControl::Exit);
        assert!(s.ops().contains(&PaintOp::Translate(30.0, 10.0)));
    }
}
