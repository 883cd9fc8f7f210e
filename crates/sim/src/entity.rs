use crate::health::Health;
use crate::math::Vec2;
use crate::movement::Movement;
use crate::weapon::Weapon;

/// Circular collision body, offset from the entity position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    pub radius: f32,
    pub offset: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Health,
    Movement,
    Weapon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Health(Health),
    Movement(Movement),
    Weapon(Weapon),
}

/// Flat actor record. Each capability lives in its own typed slot, so
/// absence is a checkable state and lookups never scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    /// Pixels per millisecond.
    pub velocity: Vec2,
    /// Base sprite size before `scale` is applied.
    pub size: Vec2,
    pub scale: f32,
    pub alpha: f32,
    pub texture: String,
    pub body: Body,
    pub active: bool,
    pub health: Option<Health>,
    pub movement: Option<Movement>,
    pub weapon: Option<Weapon>,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            velocity: Vec2::default(),
            size: Vec2::default(),
            scale: 1.0,
            alpha: 1.0,
            texture: String::new(),
            body: Body::default(),
            active: false,
            health: None,
            movement: None,
            weapon: None,
        }
    }
}

impl Entity {
    /// Fills the slot matching the component, replacing any occupant.
    pub fn attach(&mut self, component: Component) {
        match component {
            Component::Health(health) => self.health = Some(health),
            Component::Movement(movement) => self.movement = Some(movement),
            Component::Weapon(weapon) => self.weapon = Some(weapon),
        }
    }

    /// Empties the slot for `capability`, returning the occupant if any.
    pub fn detach(&mut self, capability: Capability) -> Option<Component> {
        match capability {
            Capability::Health => self.health.take().map(Component::Health),
            Capability::Movement => self.movement.take().map(Component::Movement),
            Capability::Weapon => self.weapon.take().map(Component::Weapon),
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Health => self.health.is_some(),
            Capability::Movement => self.movement.is_some(),
            Capability::Weapon => self.weapon.is_some(),
        }
    }

    pub fn display_width(&self) -> f32 {
        self.size.x * self.scale
    }

    pub fn display_height(&self) -> f32 {
        self.size.y * self.scale
    }

    pub fn body_center(&self) -> Vec2 {
        Vec2 {
            x: self.position.x + self.body.offset.x,
            y: self.position.y + self.body.offset.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Capability, Component, Entity};
    use crate::health::Health;
    use crate::movement::Movement;

    #[test]
    fn attach_fills_the_matching_slot() {
        let mut entity = Entity::default();
        assert!(!entity.has(Capability::Health));

        entity.attach(Component::Health(Health::new(3)));
        entity.attach(Component::Movement(Movement::new(0.9)));
        assert!(entity.has(Capability::Health));
        assert!(entity.has(Capability::Movement));
        assert!(!entity.has(Capability::Weapon));
    }

    #[test]
    fn attach_replaces_an_existing_occupant() {
        let mut entity = Entity::default();
        entity.attach(Component::Health(Health::new(3)));
        entity.attach(Component::Health(Health::new(5)));
        let health = entity.health.as_ref().unwrap();
        assert_eq!(health.max(), 5);
    }

    #[test]
    fn detach_empties_the_slot_and_returns_the_occupant() {
        let mut entity = Entity::default();
        entity.attach(Component::Movement(Movement::new(1.2)));

        let detached = entity.detach(Capability::Movement);
        assert!(matches!(detached, Some(Component::Movement(_))));
        assert!(!entity.has(Capability::Movement));
        assert!(entity.detach(Capability::Movement).is_none());
    }

    #[test]
    fn display_extent_applies_scale() {
        let mut entity = Entity::default();
        entity.size.x = 16.0;
        entity.size.y = 16.0;
        entity.scale = 4.0;
        assert!((entity.display_width() - 64.0).abs() < 1e-6);
        assert!((entity.display_height() - 64.0).abs() < 1e-6);
    }
}
