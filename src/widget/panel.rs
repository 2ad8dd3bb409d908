//! A draggable, resizable panel and the pointer interactions that move it.

use crate::widget::geometry::{Edge, Position, ResizeDirection, Size, Viewport};

/// The height in pixels of a panel's header, the strip that starts a drag.
pub const HEADER_HEIGHT: f64 = 36.0;

/// The defaults a panel is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// The text shown in the panel header.
    pub title: String,
    /// The size of the panel when it is first shown.
    pub initial_size: Size,
    /// Where the top-left corner of the panel is first shown.
    pub initial_position: Position,
    /// The panel can never be resized smaller than this.
    pub min_size: Size,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Transacciones".to_owned(),
            initial_size: Size::new(200.0, 200.0),
            initial_position: Position::new(100.0, 100.0),
            min_size: Size::new(200.0, 200.0),
        }
    }
}

/// What the pointer is currently doing to a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// Nothing, the panel stays where it is.
    Idle,
    /// The panel follows the pointer.
    Dragging {
        /// The pointer position relative to the panel origin when the drag started.
        offset: Position,
    },
    /// The panel edges follow the pointer.
    Resizing {
        /// The handle the resize started from.
        direction: ResizeDirection,
        /// The pointer position when the resize started.
        start_pointer: Position,
        /// The panel size when the resize started.
        start_size: Size,
        /// The panel origin when the resize started.
        start_position: Position,
    },
}

/// A floating panel with its own position and size.
///
/// The geometry is only changed through [Panel::start_drag],
/// [Panel::start_resize], [Panel::pointer_move] and [Panel::pointer_up].
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    title: String,
    position: Position,
    size: Size,
    min_size: Size,
    interaction: Interaction,
}

impl Panel {
    /// Create an idle panel from `config`.
    ///
    /// The initial size is raised to the minimum size if it is smaller.
    pub fn new(config: PanelConfig) -> Self {
        let size = Size::new(
            config.initial_size.width.max(config.min_size.width),
            config.initial_size.height.max(config.min_size.height),
        );

        Self {
            title: config.title,
            position: config.initial_position,
            size,
            min_size: config.min_size,
            interaction: Interaction::Idle,
        }
    }

    /// The text shown in the header.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The top-left corner of the panel.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The outer size of the panel, header included.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The smallest size the panel can be resized to.
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// The current pointer interaction.
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// The height available to the content below the header.
    pub fn body_height(&self) -> f64 {
        self.size.height - HEADER_HEIGHT
    }

    /// Start dragging if the pointer went down on the header.
    ///
    /// Ignored while a resize is in progress. Returns whether a drag started.
    pub fn start_drag(&mut self, pointer: Position, on_header: bool) -> bool {
        if !on_header || matches!(self.interaction, Interaction::Resizing { .. }) {
            return false;
        }

        self.interaction = Interaction::Dragging {
            offset: pointer.offset_from(self.position),
        };
        true
    }

    /// Start resizing from the handle `direction`.
    ///
    /// Ignored while a drag is in progress. Returns whether a resize started.
    pub fn start_resize(&mut self, direction: ResizeDirection, pointer: Position) -> bool {
        if matches!(self.interaction, Interaction::Dragging { .. }) {
            return false;
        }

        self.interaction = Interaction::Resizing {
            direction,
            start_pointer: pointer,
            start_size: self.size,
            start_position: self.position,
        };
        true
    }

    /// Move or resize the panel to follow the pointer, keeping it inside `viewport`.
    ///
    /// Does nothing while idle.
    pub fn pointer_move(&mut self, pointer: Position, viewport: Viewport) {
        match self.interaction {
            Interaction::Idle => {}
            Interaction::Dragging { offset } => {
                self.position = Position::new(
                    clamp_origin(pointer.x - offset.x, self.size.width, viewport.width),
                    clamp_origin(pointer.y - offset.y, self.size.height, viewport.height),
                );
            }
            Interaction::Resizing {
                direction,
                start_pointer,
                start_size,
                start_position,
            } => {
                let delta = pointer.offset_from(start_pointer);

                let (x, width) = resize_axis(
                    direction.horizontal(),
                    start_position.x,
                    start_size.width,
                    self.min_size.width,
                    delta.x,
                    viewport.width,
                );
                let (y, height) = resize_axis(
                    direction.vertical(),
                    start_position.y,
                    start_size.height,
                    self.min_size.height,
                    delta.y,
                    viewport.height,
                );

                self.position = Position::new(x, y);
                self.size = Size::new(width, height);
            }
        }
    }

    /// End any drag or resize.
    pub fn pointer_up(&mut self) {
        self.interaction = Interaction::Idle;
    }
}

/// Clamp an origin into `[0, viewport - size]`, or 0 if the panel is larger
/// than the viewport.
fn clamp_origin(origin: f64, size: f64, viewport: f64) -> f64 {
    origin.min(viewport - size).max(0.0)
}

/// Apply a resize along one axis, returning the new origin and size.
///
/// The viewport clamp applies even when the handle does not move this axis.
fn resize_axis(
    edge: Edge,
    start_origin: f64,
    start_size: f64,
    min_size: f64,
    delta: f64,
    viewport: f64,
) -> (f64, f64) {
    let (mut origin, mut size) = match edge {
        Edge::Fixed => (start_origin, start_size),
        Edge::Far => (start_origin, (start_size + delta).max(min_size)),
        Edge::Near => {
            let delta = delta.min(start_size - min_size);
            (start_origin + delta, start_size - delta)
        }
    };

    size = size.min(viewport - origin);

    if origin < 0.0 {
        size += origin;
        origin = 0.0;
    }

    (origin, size.max(min_size))
}
