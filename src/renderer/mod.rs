pub mod camera;
pub mod render_timer;
pub mod renderer;
pub mod surface_manager;
pub mod transform;
pub mod wgpu_context;
