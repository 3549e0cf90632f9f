use std::sync::Arc;
use glam::{Vec3, Vec4};
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;
use crate::input_manager::InputManager;
use crate::particles::emitter::Emitter;
use crate::particles::emitter_config::EmitterConfig;
use crate::renderer::render_timer::RenderTimer;
use crate::renderer::renderer::Renderer;
use crate::renderer::wgpu_context::WgpuContext;

/// The emitters the demo starts with.
fn emitter_presets() -> Vec<EmitterConfig> {
    vec![
        // Slow rising embers
        EmitterConfig {
            start_position: Vec3::new(-4.0, -2.0, 0.0),
            direction: Vec3::new(0.0, 1.5, 0.0),
            start_size: 0.3,
            end_size: 0.05,
            start_color: Vec4::new(1.0, 0.6, 0.1, 1.0),
            end_color: Vec4::new(0.6, 0.05, 0.0, 0.0),
            ..EmitterConfig::new(300, 60, 4.0)
        },
        // Dense sideways stream
        EmitterConfig {
            start_position: Vec3::new(0.0, 0.0, 0.0),
            direction: Vec3::new(2.0, 0.2, 0.0),
            start_size: 0.1,
            end_size: 0.6,
            start_color: Vec4::new(0.2, 0.6, 1.0, 1.0),
            end_color: Vec4::new(0.9, 0.9, 1.0, 0.0),
            ..EmitterConfig::new(1000, 200, 3.0)
        },
        // Small, saturated puff
        EmitterConfig {
            start_position: Vec3::new(4.0, 2.0, -2.0),
            direction: Vec3::new(-0.3, -0.5, 0.2),
            start_size: 0.5,
            end_size: 0.5,
            start_color: Vec4::new(0.3, 1.0, 0.4, 1.0),
            end_color: Vec4::new(0.3, 1.0, 0.4, 0.0),
            ..EmitterConfig::new(20, 30, 2.0)
        },
    ]
}

// This will store the state of the demo
pub struct State {
    wgpu_context: WgpuContext,
    render_timer: RenderTimer,
    input_manager: InputManager,
    renderer: Renderer,
}

impl State {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let wgpu_context = WgpuContext::new(window).await?;
        let mut renderer = Renderer::new(&wgpu_context);

        for config in emitter_presets() {
            let emitter = Emitter::new(&wgpu_context, renderer.material().clone(), config)?;
            renderer.add_emitter(emitter);
        }

        Ok(Self {
            wgpu_context,
            render_timer: RenderTimer::new(),
            input_manager: InputManager::new(),
            renderer,
        })
    }

    pub fn render_loop(&mut self, event: &WindowEvent, event_loop: &ActiveEventLoop){
        match event {
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let current_time = self.update();
                match self.renderer.render(&self.wgpu_context, current_time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = self.wgpu_context.window_size();
                        self.resize(size.x as u32, size.y as u32);
                    }
                    Err(e) => {
                        log::error!("Unable to render: {:?}", e);
                    }
                }
            }
            _ => self.input_manager.manage_input(event, event_loop, &mut self.renderer),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.wgpu_context.resize(width, height);
        self.renderer.resize(&self.wgpu_context, width, height);
    }

    pub fn wgpu_context(&self) -> &WgpuContext {
        &self.wgpu_context
    }

    // Returns the total time the frame was simulated at
    fn update(&mut self) -> f32 {
        let delta_time = self.render_timer.get_delta().as_secs_f32();
        let current_time = self.render_timer.total_time().as_secs_f32();
        self.renderer.update(delta_time, current_time);
        current_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in emitter_presets() {
            assert!(config.validate().is_ok(), "{config:?}");
        }
    }
}
