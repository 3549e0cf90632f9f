use glam::{Mat4, Vec3};

/// Anything that can hand the particle shader its view and projection matrices.
pub trait ViewProjection {
    fn view(&self) -> Mat4;
    fn projection(&self) -> Mat4;
}

/// A perspective camera looking along `forward()`, derived from yaw and pitch.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    fov_y: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(position: Vec3, aspect_ratio: f32) -> Self {
        Self {
            position,
            // Looking down -Z
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

impl ViewProjection for Camera {
    fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), 16.0 / 9.0);
        let forward = camera.forward();
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-6));

        // A point in front of the camera ends up with a negative view-space z.
        let in_view = camera.view().transform_point3(Vec3::ZERO);
        assert!((in_view.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn aspect_ratio_ignores_degenerate_sizes() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        camera.update_aspect_ratio(0.0, 720.0);
        assert_eq!(camera.aspect_ratio(), 1.0);
        camera.update_aspect_ratio(1280.0, 720.0);
        assert!((camera.aspect_ratio() - 1280.0 / 720.0).abs() < 1e-6);
    }
}
