use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Maximum number of simultaneous touches handled per frame.
pub const MAX_TOUCH_COUNT: usize = 10;

/// Tracking state of a contact, ordered by distance to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    NotTracking = 0,
    Start = 1,
    Hover = 2,
    BeginTouch = 3,
    Touch = 4,
    EndTouch = 5,
    Linger = 6,
    OutOfRange = 7,
}

impl TouchPhase {
    /// True for contacts touching the surface or about to touch it.
    /// Keeping the hovering phases avoids missing quick interactions.
    pub fn is_present(self) -> bool {
        (TouchPhase::Start..=TouchPhase::Touch).contains(&self)
    }
}

/// One contact of one frame, as reported by the touch source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub frame: i32,
    /// Timestamp in seconds.
    pub time: f64,
    /// Identity of the physical contact, stable across frames.
    pub ident: i32,
    pub phase: TouchPhase,
    pub pos: Point,
    pub velocity: Point,
    pub size: f32,
    pub angle: f32,
    pub major_axis: f32,
    pub minor_axis: f32,
}

impl Touch {
    /// A touching contact with a typical finger ellipse.
    pub fn new(ident: i32, pos: Point, time: f64) -> Self {
        Self {
            frame: 0,
            time,
            ident,
            phase: TouchPhase::Touch,
            pos,
            velocity: Point::default(),
            size: 0.5,
            angle: 0.0,
            major_axis: 8.0,
            minor_axis: 8.0,
        }
    }

    pub fn with_phase(mut self, phase: TouchPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_axes(mut self, major_axis: f32, minor_axis: f32) -> Self {
        self.major_axis = major_axis;
        self.minor_axis = minor_axis;
        self
    }
}

/// Accepted contact-ellipse sizes, both bounds exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchBounds {
    pub min_size: f32,
    pub max_size: f32,
}

impl TouchBounds {
    pub fn accepts(&self, touch: &Touch) -> bool {
        touch.phase.is_present()
            && touch.major_axis > self.min_size
            && touch.minor_axis > self.min_size
            && touch.major_axis < self.max_size
            && touch.minor_axis < self.max_size
    }
}

/// Working set of one frame after filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredTouches {
    touches: Vec<Touch>,
    tracked: Option<usize>,
}

impl FilteredTouches {
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }

    pub fn first(&self) -> Option<&Touch> {
        self.touches.first()
    }

    /// The retained touch carrying the tracked identity, if still present.
    pub fn tracked(&self) -> Option<&Touch> {
        self.tracked.and_then(|i| self.touches.get(i))
    }

    pub fn into_vec(self) -> Vec<Touch> {
        self.touches
    }
}

/// Keeps the touches that are present and finger-sized.
///
/// The raw report is truncated to [`MAX_TOUCH_COUNT`] first. When
/// `tracked_ident` is given, the touch sharing that identity is located again
/// since array order changes from one frame to the next.
pub fn filter_touches(
    raw: &[Touch],
    bounds: &TouchBounds,
    tracked_ident: Option<i32>,
) -> FilteredTouches {
    let mut touches = Vec::with_capacity(MAX_TOUCH_COUNT);
    let mut tracked = None;
    for touch in raw.iter().take(MAX_TOUCH_COUNT) {
        if !bounds.accepts(touch) {
            continue;
        }
        if tracked_ident == Some(touch.ident) {
            tracked = Some(touches.len());
        }
        touches.push(*touch);
    }
    FilteredTouches { touches, tracked }
}
