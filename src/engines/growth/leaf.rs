use super::random::RandomSource;
use crate::types::Colour;
use serde::{Deserialize, Serialize};

const GROW_UNTIL: u32 = 15;
const PLATEAU_UNTIL: u32 = 25;
const WITHER_UNTIL: u32 = 55;
const SPRING_GREEN: Colour = Colour::rgb(0, 220, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafPhase {
    Growing,
    Plateau,
    Withering,
    Falling,
}

/// Cosmetic leaf at the tip of a branch. Has no say in how the tree grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    age: u32,
    size: f64,
    growth_rate: f64,
    colour: Colour,
    /// Distance fallen so far, 0 while attached
    fallen: f64,
    fall_speed: f64,
    max_age: u32,
}

impl Leaf {
    /// Draws fall speed, then lifespan
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let fall_speed = 5.0 + rng.draw() * 20.0;
        let max_age = 65 + (rng.draw() * 20.0).round() as u32;
        Self {
            age: 0,
            size: 0.0,
            growth_rate: 1.0,
            colour: SPRING_GREEN,
            fallen: 0.0,
            fall_speed,
            max_age,
        }
    }

    pub fn grow(&mut self) {
        if self.fallen > 0.0 {
            self.fallen += self.fall_speed;
            // gravity
            self.fall_speed += 0.1;
        }

        self.age += 1;
        if self.age < GROW_UNTIL {
            self.size += self.growth_rate;
        } else if self.age < PLATEAU_UNTIL {
            // full size, hold
        } else if self.age < WITHER_UNTIL {
            self.colour = Colour::rgb(
                (self.colour.r + 10).min(200),
                self.colour.g.saturating_sub(5),
                0,
            );
            self.size -= self.growth_rate / 4.0;
        } else if self.age == self.max_age {
            self.fallen = 1.0;
        }

        self.size = self.size.max(0.0);
    }

    pub fn phase(&self) -> LeafPhase {
        if self.fallen > 0.0 {
            LeafPhase::Falling
        } else if self.age < GROW_UNTIL {
            LeafPhase::Growing
        } else if self.age < PLATEAU_UNTIL {
            LeafPhase::Plateau
        } else {
            LeafPhase::Withering
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn fallen(&self) -> f64 {
        self.fallen
    }

    pub fn fall_speed(&self) -> f64 {
        self.fall_speed
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    pub fn is_falling(&self) -> bool {
        self.fallen > 0.0
    }
}
