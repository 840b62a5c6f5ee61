use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use crate::puzzle::{BoxId, TableId};

/// Something the player can aim at and click
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Lever(usize),
    Box(BoxId),
    Table(TableId),
    KeypadKey(u8),
    Door,
}

/// Clickable volume, relative to the entity's translation
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox {
    pub offset: Vec3,
    pub half_size: Vec3,
}

impl Hitbox {
    pub fn centered(half_size: Vec3) -> Self {
        Hitbox {
            offset: Vec3::ZERO,
            half_size,
        }
    }

    /// World-space box for an entity at `translation`
    pub fn bounds(&self, translation: Vec3) -> Aabb3d {
        Aabb3d::new(translation + self.offset, self.half_size)
    }
}

/// Solid geometry the player cannot walk through (world space)
#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle(pub Aabb3d);

/// Pivot of a lever stick; rotates about X
#[derive(Component, Debug)]
pub struct LeverHandle {
    pub index: usize,
    /// Current tilt in radians (eases towards the session's position)
    pub angle: f32,
}

#[derive(Component, Debug)]
pub struct BoxProp {
    pub id: BoxId,
    /// Starting spot on the floor, restored on a drop or a rejected placement
    pub origin: Vec3,
}

#[derive(Component, Debug)]
pub struct DoorProp;

/// Backing plate of the keypad; its colour gives code feedback
#[derive(Component, Debug)]
pub struct KeypadPanel;

/// One of the four lamps above the keypad, lit per buffered digit
#[derive(Component, Debug)]
pub struct KeypadLamp {
    pub index: usize,
}
