use crate::entity::Entity;

/// Movement speed in pixels per millisecond. `amount` at the call sites is
/// signed elapsed time, so displacement stays frame-rate independent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub speed: f32,
}

impl Movement {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    pub fn move_horizontally(&self, entity: &mut Entity, amount: f32) {
        entity.position.x += self.speed * amount;
    }

    pub fn move_vertically(&self, entity: &mut Entity, amount: f32) {
        entity.position.y += self.speed * amount;
    }
}

#[cfg(test)]
mod tests {
    use super::Movement;
    use crate::entity::Entity;

    #[test]
    fn displacement_scales_with_speed_and_elapsed_time() {
        let movement = Movement::new(0.5);
        let mut entity = Entity::default();
        movement.move_horizontally(&mut entity, 16.0);
        movement.move_vertically(&mut entity, -16.0);
        assert!((entity.position.x - 8.0).abs() < 1e-6);
        assert!((entity.position.y + 8.0).abs() < 1e-6);
    }
}
