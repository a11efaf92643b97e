//! Interactive sample: a square that chases the pointer, a circle orbiting
//! it, a static polygon, a row of squares spawned on a timer, and an optional
//! image given as the first command-line argument.
//!
//! Keys: `Space` toggles the overlay scene, `r` resets the logo, `Escape`
//! quits. Holding `s` pauses the sparks.

use anyhow::Result;

use easel_engine::coords::{angle, Vector2};
use easel_engine::core::{App, AppControl, Cursor, DriverConfig, FrameCtx, FrameDriver};
use easel_engine::draw::DrawOptions;
use easel_engine::input::Key;
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::paint::Color;
use easel_engine::random;
use easel_engine::render::GpuInit;
use easel_engine::resource::ImageResource;
use easel_engine::scene::{Behavior, GameObject, ObjectId, Scene, SceneTree};
use easel_engine::schedule::{Routine, Step, TaskCtx, Waiter};
use easel_engine::shapes::{Alignment, Shape, ShapeRenderer};
use easel_engine::window::{Runtime, RuntimeConfig};

const LOGO: &str = "logo";

/// Steers toward the pointer and spins.
struct Chaser;

impl Behavior for Chaser {
    fn update(&mut self, this: ObjectId, ctx: &mut FrameCtx<'_>) -> Result<()> {
        let here = ctx.tree.render_position(this)?;
        let mut pull = ctx.input.mouse_position().to_force(here);
        pull.magnitude *= 0.1 * ctx.delta_time();

        let dt = ctx.delta_time();
        if let Some(object) = ctx.tree.get_mut(this) {
            object.transform.velocity = pull;
            object.transform.angular_velocity = angle::to_radians(5.0) * dt;
        }
        Ok(())
    }
}

/// Circles its parent at a fixed radius.
struct Orbit {
    radius: f32,
    phase: f32,
}

impl Behavior for Orbit {
    fn update(&mut self, this: ObjectId, ctx: &mut FrameCtx<'_>) -> Result<()> {
        self.phase += 0.05 * ctx.delta_time();
        if let Some(object) = ctx.tree.get_mut(this) {
            object.transform.position = Vector2::new(self.radius, 0.0).rotated(self.phase);
        }
        Ok(())
    }
}

/// Draws the loaded logo, if any, at the object's position.
struct Logo;

impl Behavior for Logo {
    fn render(&mut self, this: ObjectId, ctx: &mut FrameCtx<'_>) -> Result<()> {
        let origin = ctx.tree.render_position(this)?;
        let Some(image) = ctx.resources.get_as::<ImageResource>(LOGO).and_then(|r| r.image()) else {
            return Ok(());
        };
        let (w, h) = (image.width() as f32, image.height() as f32);
        ctx.painter
            .draw(DrawOptions::new(move |s| s.draw_image(image, 0.0, 0.0, w, h)).origin(origin));
        Ok(())
    }

    fn on_message(&mut self, this: ObjectId, tree: &mut SceneTree, message: &str) -> Result<()> {
        if message == "reset" {
            if let Some(object) = tree.get_mut(this) {
                object.transform.rotation = 0.0;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct Demo {
    logo_path: Option<String>,
    overlay_visible: bool,
}

impl Demo {
    fn spawn_world(&self, ctx: &mut FrameCtx<'_>) -> Result<ObjectId> {
        let center = ctx.center();
        let scene = ctx.tree.add_scene(Scene::new("world"));

        let chaser = ctx
            .tree
            .spawn_child(scene, GameObject::new("chaser").with_position(center.x, center.y).with_behavior(Chaser))?;
        ctx.tree.add_component(
            chaser,
            ShapeRenderer::new(Shape::square(60.0))
                .with_alignment(Alignment::Center)
                .with_fill(Color::from_rgb_u8(0x3b, 0x82, 0xf6))
                .with_stroke(Color::BLACK)
                .with_line_width(2.0),
        )?;

        let moon = ctx.tree.spawn_child(
            chaser,
            GameObject::new("moon").with_behavior(Orbit { radius: 90.0, phase: 0.0 }),
        )?;
        ctx.tree.add_component(
            moon,
            ShapeRenderer::new(Shape::circle(14.0)).with_fill(Color::from_rgb_u8(0xf5, 0x9e, 0x0b)),
        )?;

        let star = ctx.tree.spawn_child(scene, GameObject::new("star").with_position(40.0, center.y))?;
        ctx.tree.add_component(
            star,
            ShapeRenderer::new(Shape::polygon(star_points(5, 40.0, 18.0)))
                .with_fill(Color::from_rgb_u8(0x10, 0xb9, 0x81))
                .with_alpha(0.8),
        )?;

        ctx.tree.spawn_child(scene, GameObject::new("logo").with_position(16.0, 16.0).with_behavior(Logo))?;
        Ok(scene)
    }

    fn spawn_overlay(&self, ctx: &mut FrameCtx<'_>) -> Result<()> {
        let size = ctx.size();
        let overlay = ctx.tree.add_scene(Scene::new("overlay").with_cursor(Cursor::Crosshair).disabled());
        let frame = ctx.tree.spawn_child(overlay, GameObject::new("frame"))?;
        ctx.tree.add_component(
            frame,
            ShapeRenderer::new(Shape::rect(size.width - 8.0, size.height - 8.0))
                .with_stroke(Color::from_rgb_u8(0xef, 0x44, 0x44))
                .with_line_width(4.0),
        )?;
        if let Some(object) = ctx.tree.get_mut(frame) {
            object.transform.position = Vector2::new(4.0, 4.0);
        }
        Ok(())
    }
}

impl App for Demo {
    fn setup(&mut self, ctx: &mut FrameCtx<'_>) -> Result<()> {
        if let Some(path) = self.logo_path.clone() {
            ctx.resources.save(LOGO, ImageResource::from_path(&path));
            if let Some(done) = ctx.resources.completion(LOGO) {
                ctx.scheduler.register(Waiter::settled(done).then(move |task| {
                    match task.resources.get_as::<ImageResource>(LOGO).and_then(|r| r.image()) {
                        Some(image) => log::info!("logo ready ({}x{})", image.width(), image.height()),
                        None => log::warn!("could not load {path}; continuing without a logo"),
                    }
                    Ok(())
                }));
            }
        }

        let scene = self.spawn_world(ctx)?;
        self.spawn_overlay(ctx)?;
        start_sparks(ctx, scene);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        match ctx.input.key_press() {
            Some(Key::Escape) => return AppControl::Exit,
            Some(Key::Space) => {
                self.overlay_visible = !self.overlay_visible;
                if let Err(e) = ctx.tree.set_scene_enabled("overlay", self.overlay_visible) {
                    log::warn!("{e}");
                }
            }
            Some(Key::Character('r')) => ctx.tree.broadcast("reset"),
            _ => {}
        }

        if ctx.input.mouse_down() {
            ctx.set_cursor(Cursor::Grabbing);
        }
        AppControl::Continue
    }
}

/// Spawns a row of squares one at a time, recolours them, then clears the
/// row and starts over.
fn start_sparks(ctx: &mut FrameCtx<'_>, scene: ObjectId) {
    let mut sparks: Vec<ObjectId> = Vec::new();
    let mut recoloured = false;

    Routine::start(ctx.scheduler, move |task: &mut TaskCtx<'_>| -> Result<Step> {
        if task.input.key_down(Key::Character('s')) {
            return Ok(Step::Yield);
        }

        if sparks.len() < 6 {
            let x = 80.0 + sparks.len() as f32 * 36.0;
            let y = 40.0 + random::random(-8, 8) as f32;
            let id = task.tree.spawn_child(scene, GameObject::new("spark").with_position(x, y))?;
            task.tree.add_component(id, ShapeRenderer::new(Shape::square(24.0)).with_fill(Color::BLACK))?;
            sparks.push(id);
            return Ok(Step::Wait(Waiter::millis(300)));
        }

        if !recoloured {
            recoloured = true;
            let palette = [
                (Color::from_rgb_u8(0xec, 0x48, 0x99), 0.6),
                (Color::from_rgb_u8(0x8b, 0x5c, 0xf6), 0.3),
                (Color::from_rgb_u8(0xf9, 0x73, 0x16), 0.1),
            ];
            for id in &sparks {
                let fill = random::weighted_random(&palette).copied();
                if let Some(r) = task.tree.component_mut::<ShapeRenderer>(*id) {
                    r.fill = fill;
                }
            }
            return Ok(Step::Wait(Waiter::seconds(1.0)));
        }

        for id in sparks.drain(..) {
            task.tree.despawn(id)?;
        }
        recoloured = false;
        Ok(Step::Wait(Waiter::millis(500)))
    });
}

fn star_points(tips: usize, outer: f32, inner: f32) -> Vec<Vector2> {
    (0..tips * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = std::f32::consts::PI * i as f32 / tips as f32 - std::f32::consts::FRAC_PI_2;
            Vector2::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let demo = Demo {
        logo_path: std::env::args().nth(1),
        ..Demo::default()
    };

    let driver = FrameDriver::new(DriverConfig::default().with_target_framerate(60.0));
    Runtime::run(
        RuntimeConfig {
            title: "easel demo".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        driver,
        demo,
    )
}
