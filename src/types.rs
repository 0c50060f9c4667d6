use serde::{Deserialize, Serialize};

/// A point in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point reached by travelling `length` from here at `angle_degrees`
    pub fn project(&self, length: f64, angle_degrees: f64) -> Self {
        let radians = angle_degrees.to_radians();
        Self {
            x: self.x + length * radians.cos(),
            y: self.y + length * radians.sin(),
        }
    }
}

/// RGB colour, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
