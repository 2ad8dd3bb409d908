//! Plain value types for points, sizes and resize handles, in pixels.

use std::{fmt::Display, str::FromStr};

/// A point in viewport coordinates, e.g. the top-left corner of a panel or
/// the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    /// Pixels from the left edge of the viewport.
    pub x: f64,
    /// Pixels from the top edge of the viewport.
    pub y: f64,
}

impl Position {
    /// Create a position at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The vector from `other` to `self`.
    pub fn offset_from(self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

/// The width and height of a panel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a size of `width` by `height`.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The visible area that panels must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport of `width` by `height`.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The edge or corner handle a resize was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    /// The top edge.
    Top,
    /// The bottom edge.
    Bottom,
    /// The left edge.
    Left,
    /// The right edge.
    Right,
    /// The top-left corner.
    TopLeft,
    /// The top-right corner.
    TopRight,
    /// The bottom-left corner.
    BottomLeft,
    /// The bottom-right corner.
    BottomRight,
}

/// How a resize handle moves one axis of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    /// The axis is not affected.
    Fixed,
    /// The far edge moves, the origin stays put.
    Far,
    /// The near edge moves, shifting the origin with it.
    Near,
}

impl ResizeDirection {
    /// All the handles, in the order they are laid out around a panel.
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::Top,
        ResizeDirection::Bottom,
        ResizeDirection::Left,
        ResizeDirection::Right,
        ResizeDirection::TopLeft,
        ResizeDirection::TopRight,
        ResizeDirection::BottomLeft,
        ResizeDirection::BottomRight,
    ];

    /// The name of the handle, e.g. "top-left".
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeDirection::Top => "top",
            ResizeDirection::Bottom => "bottom",
            ResizeDirection::Left => "left",
            ResizeDirection::Right => "right",
            ResizeDirection::TopLeft => "top-left",
            ResizeDirection::TopRight => "top-right",
            ResizeDirection::BottomLeft => "bottom-left",
            ResizeDirection::BottomRight => "bottom-right",
        }
    }

    pub(crate) fn horizontal(&self) -> Edge {
        match self {
            ResizeDirection::Left | ResizeDirection::TopLeft | ResizeDirection::BottomLeft => {
                Edge::Near
            }
            ResizeDirection::Right | ResizeDirection::TopRight | ResizeDirection::BottomRight => {
                Edge::Far
            }
            ResizeDirection::Top | ResizeDirection::Bottom => Edge::Fixed,
        }
    }

    pub(crate) fn vertical(&self) -> Edge {
        match self {
            ResizeDirection::Top | ResizeDirection::TopLeft | ResizeDirection::TopRight => {
                Edge::Near
            }
            ResizeDirection::Bottom | ResizeDirection::BottomLeft | ResizeDirection::BottomRight => {
                Edge::Far
            }
            ResizeDirection::Left | ResizeDirection::Right => Edge::Fixed,
        }
    }
}

impl Display for ResizeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a string does not name a resize handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a resize handle")]
pub struct ParseResizeDirectionError(pub String);

impl FromStr for ResizeDirection {
    type Err = ParseResizeDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeDirection::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s)
            .ok_or_else(|| ParseResizeDirectionError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Edge, ResizeDirection};

    #[test]
    fn handle_names_round_trip() {
        for direction in ResizeDirection::ALL {
            assert_eq!(ResizeDirection::from_str(direction.as_str()), Ok(direction));
        }

        assert!(ResizeDirection::from_str("middle").is_err());
    }

    #[test]
    fn corners_move_both_axes() {
        assert_eq!(ResizeDirection::TopLeft.horizontal(), Edge::Near);
        assert_eq!(ResizeDirection::TopLeft.vertical(), Edge::Near);
        assert_eq!(ResizeDirection::BottomRight.horizontal(), Edge::Far);
        assert_eq!(ResizeDirection::BottomRight.vertical(), Edge::Far);
        assert_eq!(ResizeDirection::Top.horizontal(), Edge::Fixed);
        assert_eq!(ResizeDirection::Right.vertical(), Edge::Fixed);
    }
}
