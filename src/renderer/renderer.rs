use std::rc::Rc;
use glam::Vec3;
use crate::particles::emitter::Emitter;
use crate::particles::particle_material::ParticleMaterial;
use crate::renderer::camera::Camera;
use crate::renderer::wgpu_context::WgpuContext;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// Clears the frame and draws every emitter on top of it
pub struct Renderer {
    background_color: wgpu::Color,
    camera: Camera,
    depth_view: wgpu::TextureView,
    material: Rc<ParticleMaterial>,
    emitters: Vec<Emitter>,
}

impl Renderer {
    pub fn new(wgpu_context: &WgpuContext) -> Self {
        let window_size = wgpu_context.window_size();
        let camera = Camera::new(Vec3::new(0.0, 0.0, 15.0), window_size.x.max(1.0) / window_size.y.max(1.0));
        let depth_view = Self::create_depth_view(wgpu_context, window_size.x as u32, window_size.y as u32);
        let material = Rc::new(ParticleMaterial::new(wgpu_context, wgpu_context.color_format(), Some(DEPTH_FORMAT)));

        Self {
            background_color: wgpu::Color { r: 0.02, g: 0.02, b: 0.05, a: 1.0 },
            camera,
            depth_view,
            material,
            emitters: Vec::new(),
        }
    }

    fn create_depth_view(wgpu_context: &WgpuContext, width: u32, height: u32) -> wgpu::TextureView {
        let texture = wgpu_context.get_device().create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn add_emitter(&mut self, emitter: Emitter) {
        self.emitters.push(emitter);
    }

    pub fn resize(&mut self, wgpu_context: &WgpuContext, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.depth_view = Self::create_depth_view(wgpu_context, width, height);
            self.camera.update_aspect_ratio(width as f32, height as f32);
        }
    }

    pub fn update(&mut self, delta_time: f32, current_time: f32) {
        for emitter in self.emitters.iter_mut() {
            emitter.update(delta_time, current_time);
        }
    }

    pub fn render(&self, wgpu_context: &WgpuContext, current_time: f32) -> Result<(), wgpu::SurfaceError>{
        if let Some(window) = wgpu_context.get_window() {
            window.request_redraw();
        }

        // We can't render unless the window is configured
        let Some(surface) = wgpu_context.get_surface().filter(|_| wgpu_context.is_surface_configured()) else {
            return Ok(());
        };

        let output = surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = wgpu_context.get_device().create_command_encoder(&wgpu::CommandEncoderDescriptor{
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor{
                label: Some("Particle Pass"),
                color_attachments: &[
                    Some(wgpu::RenderPassColorAttachment{
                        view: &view,
                        depth_slice: None,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.background_color),
                            store: wgpu::StoreOp::Store,
                        }
                    })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for emitter in self.emitters.iter() {
                emitter.draw(wgpu_context, &mut render_pass, &self.camera, current_time);
            }
        }

        wgpu_context.get_queue().submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn emitters_mut(&mut self) -> &mut [Emitter] {
        &mut self.emitters
    }

    pub fn material(&self) -> &Rc<ParticleMaterial> {
        &self.material
    }
}
