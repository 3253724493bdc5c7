use glam::Mat4;

/// Projection attributes of a camera node.
///
/// The camera's placement is its node's world transform; the view matrix is
/// the inverse of that transform.
#[derive(Debug, Clone)]
pub struct Camera {
    projection: Mat4,
    perspective: bool,
    enabled: bool,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub ortho_size: f32,
}

impl Camera {
    /// `fov` is the vertical field of view in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            projection: Mat4::IDENTITY,
            perspective: true,
            enabled: true,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            ortho_size: 10.0,
        };
        cam.update_projection_matrix();
        cam
    }

    #[must_use]
    pub fn new_orthographic(ortho_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            projection: Mat4::IDENTITY,
            perspective: false,
            enabled: true,
            fov: 60f32.to_radians(),
            aspect,
            near,
            far,
            ortho_size,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = if self.perspective {
            Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
        } else {
            let w = self.ortho_size * self.aspect;
            let h = self.ortho_size;
            Mat4::orthographic_rh(-w, w, -h, h, self.near, self.far)
        };
    }

    /// Recomputes the projection for a new viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Overrides the projection with an arbitrary matrix.
    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    #[inline]
    #[must_use]
    pub fn is_perspective(&self) -> bool {
        self.perspective
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(60.0, 16.0 / 9.0, 0.1, 100.0)
    }
}

/// Per-frame camera data handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDescriptor {
    pub view: Mat4,
    pub projection: Mat4,
}
