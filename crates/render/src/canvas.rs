use mapwalk_common::{Color, Segment};

/// The drawing surface a frame is rendered onto.
///
/// Coordinates are screen-space pixels with the origin at the top-left and
/// y growing downward. Calls take effect in issue order.
pub trait Canvas {
    /// Fill the whole surface with `color`, discarding prior content.
    fn clear(&mut self, color: Color);

    /// Stroke a line segment with the given width in pixels.
    fn stroke_line(&mut self, segment: Segment, width: f32, color: Color);

    /// Fill an axis-aligned rectangle given its top-left corner and size.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Stroke the outline of an axis-aligned rectangle.
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color);
}

/// One recorded canvas call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    Clear {
        color: Color,
    },
    StrokeLine {
        segment: Segment,
        width: f32,
        color: Color,
    },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        width: f32,
        color: Color,
    },
}

/// A [`Canvas`] that records every call instead of rasterizing.
///
/// Used by tests and the command-line tools to inspect exactly what a frame
/// would draw.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCmd>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Drain the recorded commands, leaving the canvas empty.
    pub fn take(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCmd::Clear { color });
    }

    fn stroke_line(&mut self, segment: Segment, width: f32, color: Color) {
        self.commands.push(DrawCmd::StrokeLine {
            segment,
            width,
            color,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCmd::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
        self.commands.push(DrawCmd::StrokeRect {
            x,
            y,
            w,
            h,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn records_calls_in_issue_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.clear(Color::BACKGROUND);
        canvas.fill_rect(1.0, 2.0, 3.0, 4.0, Color::MARKER_FILL);
        canvas.stroke_line(
            Segment::new(Vec2::ZERO, Vec2::ONE),
            4.0,
            Color::WALL_GRAY,
        );
        let cmds = canvas.commands();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(cmds[0], DrawCmd::Clear { .. }));
        assert!(matches!(cmds[1], DrawCmd::FillRect { .. }));
        assert!(matches!(cmds[2], DrawCmd::StrokeLine { .. }));
    }

    #[test]
    fn take_drains_the_buffer() {
        let mut canvas = RecordingCanvas::new();
        canvas.clear(Color::BACKGROUND);
        let drained = canvas.take();
        assert_eq!(drained.len(), 1);
        assert!(canvas.commands().is_empty());
    }
}
