use crate::draw::Camera;

/// Frame driver settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Frames per second that `delta_time == 1.0` corresponds to.
    pub target_framerate: f32,
    /// Clear the whole surface at the start of every tick.
    pub clear: bool,
    /// Projection applied to draw origins.
    pub camera: Option<Camera>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            target_framerate: 60.0,
            clear: true,
            camera: None,
        }
    }
}

impl DriverConfig {
    pub fn with_target_framerate(mut self, fps: f32) -> Self {
        self.target_framerate = fps;
        self
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }
}
