use core::f32::consts::TAU;

use crate::coords::Vector2;

use super::affine::Affine;

/// One polyline of a path, already in device space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPath {
    pub points: Vec<Vector2>,
    pub closed: bool,
}

/// Canvas-style path builder.
///
/// Points are transformed by the matrix live at the time they are added, so a
/// transform change in the middle of a path only affects later segments.
/// Curves are flattened on insertion.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    subpaths: Vec<SubPath>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.points.len() < 2)
    }

    fn current(&mut self) -> Option<&mut SubPath> {
        self.subpaths.last_mut().filter(|s| !s.closed)
    }

    fn start_at(&mut self, p: Vector2) {
        self.subpaths.push(SubPath { points: vec![p], closed: false });
    }

    pub fn move_to(&mut self, m: Affine, x: f32, y: f32) {
        self.start_at(m.apply(Vector2::new(x, y)));
    }

    /// Without a current point this behaves like `move_to`.
    pub fn line_to(&mut self, m: Affine, x: f32, y: f32) {
        let p = m.apply(Vector2::new(x, y));
        match self.current() {
            Some(sub) => sub.points.push(p),
            None => self.start_at(p),
        }
    }

    /// Closes the current subpath; the next one starts at its first point.
    pub fn close(&mut self) {
        let Some(sub) = self.current() else { return };
        sub.closed = true;
        let first = sub.points[0];
        self.start_at(first);
    }

    pub fn rect(&mut self, m: Affine, x: f32, y: f32, w: f32, h: f32) {
        self.move_to(m, x, y);
        self.line_to(m, x + w, y);
        self.line_to(m, x + w, y + h);
        self.line_to(m, x, y + h);
        self.close();
    }

    pub fn arc(&mut self, m: Affine, center: Vector2, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        self.ellipse(m, center, radius, radius, 0.0, start, end, anticlockwise);
    }

    /// Connects the current point to the curve start with a line, like a
    /// canvas `ellipse`.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        m: Affine,
        center: Vector2,
        rx: f32,
        ry: f32,
        rotation: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    ) {
        if rx < 0.0 || ry < 0.0 {
            return;
        }
        let sweep = sweep_angle(start, end, anticlockwise);
        let device_radius = rx.max(ry) * m.mean_scale();
        let steps = segment_count(sweep, device_radius);

        let local = Affine::translation(center.x, center.y) * Affine::rotation(rotation);
        let to_device = m * local;
        for i in 0..=steps {
            let t = start + sweep * (i as f32 / steps as f32);
            let (s, c) = t.sin_cos();
            let p = to_device.apply(Vector2::new(rx * c, ry * s));
            match self.current() {
                Some(sub) => sub.points.push(p),
                None => self.start_at(p),
            }
        }
    }
}

/// Signed sweep following canvas rules: clockwise sweeps are positive and at
/// most one full turn.
pub(crate) fn sweep_angle(start: f32, end: f32, anticlockwise: bool) -> f32 {
    let raw = end - start;
    if !anticlockwise {
        if raw >= TAU { TAU } else { raw.rem_euclid(TAU) }
    } else if -raw >= TAU {
        -TAU
    } else {
        -(start - end).rem_euclid(TAU)
    }
}

fn segment_count(sweep: f32, device_radius: f32) -> usize {
    let n = (sweep.abs() * device_radius.max(1.0).sqrt() * 2.0).ceil();
    (n as usize).clamp(4, 256)
}
