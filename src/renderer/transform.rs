use glam::Vec3;

/// Where something sits in the world. Emitters own one as their spawn anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec3,
}

impl Transform {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    pub fn get_position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn move_absolute(&mut self, offset: Vec3) {
        self.position += offset;
    }
}
