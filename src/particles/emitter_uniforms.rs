use glam::{Mat4, Vec3, Vec4};

/// Per-draw shader parameters. Matches `EmitterUniforms` in `emitter.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EmitterUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub start_color: [f32; 4],
    pub end_color: [f32; 4],
    // vec3 + f32 share one 16 byte slot
    pub direction: [f32; 3],
    pub current_time: f32,
    pub particle_lifetime: f32,
    pub start_size: f32,
    pub end_size: f32,
    pub _padding: f32,
}

impl EmitterUniforms {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        view: Mat4,
        projection: Mat4,
        current_time: f32,
        direction: Vec3,
        particle_lifetime: f32,
        start_size: f32,
        end_size: f32,
        start_color: Vec4,
        end_color: Vec4,
    ) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            start_color: start_color.to_array(),
            end_color: end_color.to_array(),
            direction: direction.to_array(),
            current_time,
            particle_lifetime,
            start_size,
            end_size,
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_the_shader() {
        assert_eq!(std::mem::size_of::<EmitterUniforms>(), 192);
        assert_eq!(std::mem::offset_of!(EmitterUniforms, direction), 160);
        assert_eq!(std::mem::offset_of!(EmitterUniforms, current_time), 172);
        assert_eq!(std::mem::offset_of!(EmitterUniforms, particle_lifetime), 176);
    }
}
