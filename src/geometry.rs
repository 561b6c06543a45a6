use serde::{Deserialize, Serialize};

/// A point in normalized pad coordinates, both axes in `[0, 1]`.
/// `y` grows upwards: `y == 0` is the bottom edge of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from(value: (f32, f32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        is_inside(point, self)
    }
}

/// Inclusive containment test.
pub fn is_inside(point: Point, rect: &Rect) -> bool {
    is_inside_tol(point, rect, 0.0, 0.0)
}

/// Inclusive containment test with an independent tolerance per axis.
/// Negative tolerances shrink the rectangle.
pub fn is_inside_tol(point: Point, rect: &Rect, xtol: f32, ytol: f32) -> bool {
    point.x >= rect.x - xtol
        && point.x <= rect.x + rect.width + xtol
        && point.y >= rect.y - ytol
        && point.y <= rect.y + rect.height + ytol
}

pub fn is_close(point: Point, x: f32, y: f32, xtol: f32, ytol: f32) -> bool {
    point.x >= x - xtol && point.x <= x + xtol && point.y >= y - ytol && point.y <= y + ytol
}

/// Physical proportions of a pad.
///
/// Touch coordinates are normalized on both axes regardless of the real size
/// of the surface, so every distance or angle must be corrected with `ratio`
/// (height / width). Without it a horizontal and a vertical move of the same
/// physical length would not compare equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadGeometry {
    width: f32,
    height: f32,
    ratio: f32,
    ratio2: f32,
}

impl PadGeometry {
    pub fn new(width: f32, height: f32) -> anyhow::Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            anyhow::bail!("invalid pad size {width}x{height}");
        }
        let ratio = height / width;
        Ok(Self {
            width,
            height,
            ratio,
            ratio2: ratio * ratio,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn squared_distance(&self, p1: Point, p2: Point) -> f32 {
        let dx = p1.x - p2.x;
        let dy = p1.y - p2.y;
        dx * dx + dy * dy * self.ratio2
    }

    /// Direction from `p1` to `p2` in degrees, in `[0, 360)`.
    pub fn angle(&self, p1: Point, p2: Point) -> f32 {
        let dx = p2.x - p1.x;
        let dy = (p2.y - p1.y) * self.ratio;
        let deg = dy.atan2(dx).to_degrees();
        if deg < 0.0 {
            deg + 360.0
        } else {
            deg
        }
    }
}

impl Default for PadGeometry {
    /// A square pad, where corrected metrics are plain Euclidean ones.
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            ratio: 1.0,
            ratio2: 1.0,
        }
    }
}

/// Part of a shortcut box hit by a pointer, as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoxPart(u16);

impl BoxPart {
    pub const OUTSIDE: Self = Self(0);
    pub const INSIDE: Self = Self(1 << 0);
    pub const TITLE: Self = Self(1 << 1);
    pub const MENU_BTN: Self = Self(1 << 2);
    pub const TOP: Self = Self(1 << 3);
    pub const BOTTOM: Self = Self(1 << 4);
    pub const LEFT: Self = Self(1 << 5);
    pub const RIGHT: Self = Self(1 << 6);
    pub const HCENTER: Self = Self(1 << 7);
    pub const VCENTER: Self = Self(1 << 8);
    pub const TOP_LEFT: Self = Self(Self::TOP.0 | Self::LEFT.0);
    pub const TOP_RIGHT: Self = Self(Self::TOP.0 | Self::RIGHT.0);
    pub const BOTTOM_LEFT: Self = Self(Self::BOTTOM.0 | Self::LEFT.0);
    pub const BOTTOM_RIGHT: Self = Self(Self::BOTTOM.0 | Self::RIGHT.0);
    pub const ON_BORDERS: Self = Self(Self::TOP.0 | Self::LEFT.0 | Self::BOTTOM.0 | Self::RIGHT.0);

    pub fn is_outside(self) -> bool {
        self == Self::OUTSIDE
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}
