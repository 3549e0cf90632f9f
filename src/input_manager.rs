use glam::Vec3;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use crate::renderer::renderer::Renderer;

const ANCHOR_STEP: f32 = 0.5;

pub struct InputManager {}

impl InputManager {
    pub fn new() -> InputManager {
        InputManager {}
    }

    pub fn manage_input(&self, event: &WindowEvent, event_loop: &ActiveEventLoop, renderer: &mut Renderer) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: key_state,
                    ..
                },
                ..
            } => {
                self.handle_key(event_loop, renderer, code, key_state.is_pressed());
            },
            _ => {}
        }
    }

    fn handle_key(&self, event_loop: &ActiveEventLoop, renderer: &mut Renderer, code: &KeyCode, is_pressed: bool) {
        if !is_pressed {
            return;
        }
        if *code == KeyCode::Escape {
            event_loop.exit();
            return;
        }

        if let (Some(offset), Some(emitter)) = (anchor_offset(code), renderer.emitters_mut().first_mut()) {
            emitter.transform_mut().move_absolute(offset);
        }
    }
}

/// How far a key press moves the first emitter's anchor.
fn anchor_offset(code: &KeyCode) -> Option<Vec3> {
    match code {
        KeyCode::ArrowUp => Some(Vec3::Y * ANCHOR_STEP),
        KeyCode::ArrowDown => Some(Vec3::NEG_Y * ANCHOR_STEP),
        KeyCode::ArrowLeft => Some(Vec3::NEG_X * ANCHOR_STEP),
        KeyCode::ArrowRight => Some(Vec3::X * ANCHOR_STEP),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_move_the_anchor_and_other_keys_do_not() {
        assert_eq!(anchor_offset(&KeyCode::ArrowUp), Some(Vec3::new(0.0, 0.5, 0.0)));
        assert_eq!(anchor_offset(&KeyCode::ArrowLeft), Some(Vec3::new(-0.5, 0.0, 0.0)));
        assert_eq!(anchor_offset(&KeyCode::KeyP), None);
    }
}
