//! The geometry of the floating widget panels.
//!
//! A [Panel] owns its position and size and only changes them through drag
//! and resize interactions, which keep it inside the viewport and no smaller
//! than its configured minimum size.

mod geometry;
mod panel;

pub use geometry::{ParseResizeDirectionError, Position, ResizeDirection, Size, Viewport};
pub use panel::{HEADER_HEIGHT, Interaction, Panel, PanelConfig};
