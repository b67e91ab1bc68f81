// glowup-pdf: draw/field emission

use tracing::debug;

use crate::error::AppError;
use crate::geometry::{DrawOp, FieldDescriptor, FieldKind, Rect, ShapeStyle};
use crate::layout::DocumentLayout;
use crate::metrics::Font;
use crate::theme::Rgb;

/// The drawing and form primitives a PDF backend has to provide.
pub trait Surface {
    fn fill_rect(&mut self, rect: &Rect, style: &ShapeStyle) -> Result<(), AppError>;

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, thickness: f32) -> Result<(), AppError>;

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, font: Font, color: Rgb) -> Result<(), AppError>;

    fn text_field(&mut self, field: &FieldDescriptor) -> Result<(), AppError>;

    fn checkbox(&mut self, field: &FieldDescriptor) -> Result<(), AppError>;
}

/// Replay a layout onto a surface: every draw command in section order, then
/// every field, so widgets always sit above the boxes that frame them.
pub fn emit<S: Surface>(layout: DocumentLayout, surface: &mut S) -> Result<(), AppError> {
    let (commands, fields) = layout.into_parts();
    debug!(commands = commands.len(), fields = fields.len(), "emitting layout");

    for command in &commands {
        match &command.op {
            DrawOp::Rect { rect, style } => surface.fill_rect(rect, style)?,
            DrawOp::Line { from, to, color, thickness } => surface.line(*from, *to, *color, *thickness)?,
            DrawOp::Text { text, x, y, size, font, color } => surface.text(text, *x, *y, *size, *font, *color)?,
        }
    }

    for field in &fields {
        match field.kind {
            FieldKind::Text => surface.text_field(field)?,
            FieldKind::CheckBox => surface.checkbox(field)?,
        }
    }

    Ok(())
}
