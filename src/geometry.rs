// glowup-pdf: geometry primitives produced by the layout engine

use serde::Serialize;

use crate::metrics::Font;
use crate::theme::Rgb;

/// Axis-aligned rectangle in PDF points, origin at the bottom left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width - 2.0 * dx, self.height - 2.0 * dy)
    }

    /// True when the vertical spans share more than a touching edge.
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        self.y < other.top() - EPS && other.y < self.top() - EPS
    }

    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeStyle {
    pub fill: Option<Rgb>,
    pub stroke: Option<Stroke>,
    /// 1.0 is opaque.
    pub opacity: f32,
    /// Counter-clockwise rotation in degrees about the rectangle origin.
    pub rotation: f32,
}

impl ShapeStyle {
    pub fn filled(color: Rgb) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            opacity: 1.0,
            rotation: 0.0,
        }
    }

    pub fn bordered(fill: Rgb, border: Rgb, width: f32) -> Self {
        Self {
            stroke: Some(Stroke { color: border, width }),
            ..Self::filled(fill)
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Rect {
        rect: Rect,
        style: ShapeStyle,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
        thickness: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Rgb,
    },
}

/// Layout blocks in page order, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Background,
    Card,
    Header,
    Meta,
    Chips,
    Grid,
    Habits,
    Notes,
    Footer,
}

impl Section {
    pub const FLOW: [Section; 9] = [
        Section::Background,
        Section::Card,
        Section::Header,
        Section::Meta,
        Section::Chips,
        Section::Grid,
        Section::Habits,
        Section::Notes,
        Section::Footer,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub section: Section,
    #[serde(flatten)]
    pub op: DrawOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    CheckBox,
}

/// A fillable widget and where it sits on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub rect: Rect,
    pub kind: FieldKind,
    pub multiline: bool,
    /// `None` lets the viewer auto-size the text.
    pub font_size: Option<f32>,
}

/// Structural blocks recorded alongside the draw list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Card,
    Badge,
    MetaBox,
    Chip,
    GridHeader,
    GridRow,
    HabitRow,
    NotesBox,
    Tip,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub kind: RegionKind,
    pub rect: Rect,
}
