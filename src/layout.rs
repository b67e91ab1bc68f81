// glowup-pdf: layout engine
//
// Blocks are placed top to bottom. Every step receives the lower edge of the
// block above it and returns its own lower edge, so no block is positioned
// from an absolute page coordinate except the header top.

use serde::Serialize;
use tracing::debug;

use crate::fields::{Day, FieldName, GridColumn};
use crate::geometry::{
    DrawCommand, DrawOp, FieldDescriptor, FieldKind, Rect, Region, RegionKind, Section, ShapeStyle,
};
use crate::metrics::Font;
use crate::page::PageSpec;
use crate::theme::{Palette, Rgb};

// ============================================================================
// Constants
// ============================================================================

/// Card frame sits this far outside the margin
const CARD_OUTSET: f32 = 8.0;
const CARD_BORDER: Rgb = Rgb::new(0.92, 0.93, 0.96);

/// Header
const BADGE_WIDTH: f32 = 100.0;
const BADGE_HEIGHT: f32 = 22.0;
const BADGE_TEXT: &str = "GlowPlanner";
const TITLE_FONT_SIZE: f32 = 32.0;
const SUBTITLE_FONT_SIZE: f32 = 12.0;
/// Badge bottom to title baseline
const TITLE_DROP: f32 = 34.0;
/// Title baseline to subtitle baseline
const SUBTITLE_DROP: f32 = 18.0;
/// Subtitle baseline to header bottom edge (descenders)
const HEADER_DESCENT: f32 = 4.0;
const SUBTITLE_COLOR: Rgb = Rgb::new(0.38, 0.39, 0.44);

/// Font sizes in points
const LABEL_FONT_SIZE: f32 = 10.0;
const SECTION_FONT_SIZE: f32 = 12.0;
const LABEL_COLOR: Rgb = Rgb::new(0.45, 0.46, 0.50);
const SECTION_COLOR: Rgb = Rgb::new(0.22, 0.24, 0.29);
const MUTED_COLOR: Rgb = Rgb::new(0.40, 0.41, 0.46);

/// Meta row ("Week of" / "Focus")
const META_GAP_ABOVE: f32 = 4.0;
const META_LABEL_ROOM: f32 = 14.0;
const META_BOX_HEIGHT: f32 = 38.0;
const META_COLUMN_GAP: f32 = 12.0;
const META_FIELD_INSET_X: f32 = 8.0;
const META_FIELD_INSET_Y: f32 = 7.0;

/// Chips and tips share the pill shape
const PILL_HEIGHT: f32 = 18.0;
const PILL_PAD: f32 = 8.0;
const PILL_TEXT_RISE: f32 = 4.0;
const CHIP_GAP: f32 = 6.0;
const CHIP_GAP_ABOVE: f32 = 8.0;
const CHIP_FILL: Rgb = Rgb::new(0.985, 0.98, 1.0);
const CHIP_BORDER: Rgb = Rgb::new(0.94, 0.92, 1.0);
const CHIP_TEXT: Rgb = Rgb::new(0.40, 0.36, 0.52);
pub const CHIPS: [&str; 5] = ["Hydration", "Protein", "Steps", "Skin", "Budget"];

/// Weekly grid
pub const DAY_COLUMN_WIDTH: f32 = 76.0;
const GRID_GAP_ABOVE: f32 = 8.0;
const GRID_HEADER_HEIGHT: f32 = 26.0;
pub const ROW_HEIGHT: f32 = 74.0;
const CELL_INSET_X: f32 = 6.0;
const CELL_INSET_Y: f32 = 8.0;
const CELL_FONT_SIZE: f32 = 10.0;
const DAY_FONT_SIZE: f32 = 12.0;
const GRID_LINE: Rgb = Rgb::new(0.92, 0.93, 0.96);
const GRID_HEADING_COLOR: Rgb = Rgb::new(0.35, 0.36, 0.40);
const CELL_BORDER: Rgb = Rgb::new(0.94, 0.94, 0.98);
const ROW_TINT_ODD: Rgb = Rgb::new(1.0, 0.995, 0.995);

/// Habit tracker
const HABIT_GAP_ABOVE: f32 = 10.0;
const HABIT_LABEL_ROOM: f32 = 18.0;
const HABIT_ROW_HEIGHT: f32 = 34.0;
const HABIT_ROW_GAP: f32 = 8.0;
const HABIT_LABEL_INSET: f32 = 10.0;
const HABIT_BOXES_OFFSET: f32 = 150.0;
const CHECKBOX_SIZE: f32 = 14.0;
const CHECKBOX_GAP: f32 = 8.0;
const ROW_BORDER: Rgb = Rgb::new(0.93, 0.94, 0.97);

/// Notes block
const NOTES_GAP_ABOVE: f32 = 8.0;
const NOTES_LABEL_ROOM: f32 = 18.0;
const NOTES_BOX_HEIGHT: f32 = 120.0;
const NOTES_FIELD_INSET: f32 = 8.0;
const NOTES_FONT_SIZE: f32 = 11.0;

/// Footer tips
const TIP_GAP_ABOVE: f32 = 6.0;
const TIP_GAP: f32 = 8.0;
pub const TIPS: [&str; 3] = [
    "Tip: Fill dinners first, then lunches with leftovers.",
    "Tip: Pair a 10-min tidy with your evening routine.",
    "Tip: Celebrate the smallest win each day.",
];

/// Where the tint of a habit row comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tint {
    Wash1,
    Wash2,
    Wash3,
    Fixed(Rgb),
}

impl Tint {
    fn resolve(self, palette: &Palette) -> Rgb {
        match self {
            Tint::Wash1 => palette.wash1,
            Tint::Wash2 => palette.wash2,
            Tint::Wash3 => palette.wash3,
            Tint::Fixed(c) => c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitDef {
    pub label: &'static str,
    pub count: usize,
    pub tint: Tint,
}

pub const HABITS: [HabitDef; 4] = [
    HabitDef { label: "Water (8)", count: 8, tint: Tint::Wash1 },
    HabitDef { label: "Sleep (7)", count: 7, tint: Tint::Wash3 },
    HabitDef { label: "Steps / Move (7)", count: 7, tint: Tint::Wash2 },
    HabitDef { label: "Screen-off (7)", count: 7, tint: Tint::Fixed(Rgb::new(1.0, 0.98, 0.99)) },
];

/// A habit row with its tint resolved against the document palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitRow {
    pub label: String,
    pub count: usize,
    pub tint: Rgb,
}

// ============================================================================
// Data Structures
// ============================================================================

/// Column and row geometry of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpec {
    pub left: f32,
    /// Top edge of the header row
    pub top: f32,
    pub header_height: f32,
    pub row_height: f32,
    /// Day column followed by the four fillable columns
    pub columns: [f32; 5],
}

impl GridSpec {
    fn new(page: &PageSpec, top: f32) -> Self {
        let width = page.content_width();
        let other = (width - DAY_COLUMN_WIDTH) / 4.0;
        GridSpec {
            left: page.margin,
            top,
            header_height: GRID_HEADER_HEIGHT,
            row_height: ROW_HEIGHT,
            columns: [DAY_COLUMN_WIDTH, other, other, other, other],
        }
    }

    pub fn width(&self) -> f32 {
        self.columns.iter().sum()
    }

    /// Left edge of column `i` (0 is the day column).
    pub fn column_x(&self, i: usize) -> f32 {
        self.left + self.columns[..i].iter().sum::<f32>()
    }

    /// Bounds of body row `r` (0 is Monday).
    pub fn row_rect(&self, r: usize) -> Rect {
        let body_top = self.top - self.header_height;
        Rect::new(
            self.left,
            body_top - self.row_height * (r as f32 + 1.0),
            self.width(),
            self.row_height,
        )
    }

    pub fn bottom(&self) -> f32 {
        self.top - self.header_height - self.row_height * Day::ALL.len() as f32
    }
}

/// Everything needed to draw one planner page. Built by [`compute_layout`]
/// and consumed by [`crate::render::emit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    page: PageSpec,
    palette: Palette,
    title: String,
    grid: GridSpec,
    habits: Vec<HabitRow>,
    regions: Vec<Region>,
    commands: Vec<DrawCommand>,
    fields: Vec<FieldDescriptor>,
}

impl DocumentLayout {
    pub fn page(&self) -> &PageSpec {
        &self.page
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn habits(&self) -> &[HabitRow] {
        &self.habits
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn regions_of(&self, kind: RegionKind) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.kind == kind)
    }

    pub fn into_parts(self) -> (Vec<DrawCommand>, Vec<FieldDescriptor>) {
        (self.commands, self.fields)
    }
}

// ============================================================================
// Layout Engine
// ============================================================================

/// Compute the full page layout. Pure: the same inputs give the same output.
///
/// Every block has a fixed size. On a page too short for the stack the lower
/// blocks run past the bottom margin; nothing is shrunk or moved to a second
/// page.
pub fn compute_layout(page: PageSpec, palette: Palette, title: &str, subtitle: &str) -> DocumentLayout {
    let mut builder = LayoutBuilder {
        page,
        palette,
        title,
        subtitle,
        section: Section::Background,
        grid: GridSpec::new(&page, page.height - page.margin),
        regions: Vec::new(),
        commands: Vec::new(),
        fields: Vec::new(),
    };

    let mut cursor = page.height - page.margin - CARD_OUTSET;
    for section in Section::FLOW {
        builder.section = section;
        cursor = builder.place(cursor);
        debug!(?section, cursor, "placed layout section");
    }

    if cursor < page.margin {
        debug!(cursor, margin = page.margin, "layout extends past the bottom margin");
    }

    DocumentLayout {
        page,
        palette,
        title: title.to_string(),
        grid: builder.grid,
        habits: HABITS
            .iter()
            .map(|h| HabitRow {
                label: h.label.to_string(),
                count: h.count,
                tint: h.tint.resolve(&palette),
            })
            .collect(),
        regions: builder.regions,
        commands: builder.commands,
        fields: builder.fields,
    }
}

/// Visual settings shared by a run of pills.
#[derive(Debug, Clone, Copy)]
struct PillStyle {
    font: Font,
    shape: ShapeStyle,
    text: Rgb,
    gap: f32,
}

struct LayoutBuilder<'a> {
    page: PageSpec,
    palette: Palette,
    title: &'a str,
    subtitle: &'a str,
    /// Section the next draw command is tagged with
    section: Section,
    /// Repositioned once the grid section is placed
    grid: GridSpec,
    regions: Vec<Region>,
    commands: Vec<DrawCommand>,
    fields: Vec<FieldDescriptor>,
}

impl LayoutBuilder<'_> {
    /// Place the current section below `top` and return its lower edge.
    fn place(&mut self, top: f32) -> f32 {
        match self.section {
            Section::Background => {
                self.place_background();
                top
            }
            Section::Card => {
                self.place_card();
                top
            }
            Section::Header => self.place_header(top),
            Section::Meta => self.place_meta(top),
            Section::Chips => self.place_chips(top),
            Section::Grid => self.place_grid(top),
            Section::Habits => self.place_habits(top),
            Section::Notes => self.place_notes(top),
            Section::Footer => self.place_footer(top),
        }
    }

    // ------------------------------------------------------------------------
    // Drawing helpers
    // ------------------------------------------------------------------------

    fn push(&mut self, op: DrawOp) {
        self.commands.push(DrawCommand {
            section: self.section,
            op,
        });
    }

    fn rect(&mut self, rect: Rect, style: ShapeStyle) {
        self.push(DrawOp::Rect { rect, style });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(DrawOp::Line {
            from: (x1, y1),
            to: (x2, y2),
            color: GRID_LINE,
            thickness: 1.0,
        });
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, font: Font, color: Rgb) {
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            font,
            color,
        });
    }

    fn region(&mut self, kind: RegionKind, rect: Rect) {
        self.regions.push(Region { kind, rect });
    }

    fn text_field(&mut self, name: FieldName, rect: Rect, multiline: bool, font_size: Option<f32>) {
        self.fields.push(FieldDescriptor {
            name: name.to_string(),
            rect,
            kind: FieldKind::Text,
            multiline,
            font_size,
        });
    }

    fn checkbox(&mut self, name: FieldName, rect: Rect) {
        self.fields.push(FieldDescriptor {
            name: name.to_string(),
            rect,
            kind: FieldKind::CheckBox,
            multiline: false,
            font_size: None,
        });
    }

    /// Lay out a left-to-right run of pills starting at the margin. The run
    /// is not clamped to the content width.
    fn pill_run(&mut self, kind: RegionKind, labels: &[&str], y: f32, style: PillStyle) {
        let mut x = self.page.margin;
        for label in labels {
            let width = style.font.width_of_text_at_size(label, LABEL_FONT_SIZE) + PILL_PAD * 2.0;
            let rect = Rect::new(x, y, width, PILL_HEIGHT);
            self.rect(rect, style.shape);
            self.text(label, x + PILL_PAD, y + PILL_TEXT_RISE, LABEL_FONT_SIZE, style.font, style.text);
            self.region(kind, rect);
            x += width + style.gap;
        }
    }

    // ------------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------------

    fn place_background(&mut self) {
        let (w, h) = (self.page.width, self.page.height);
        let p = self.palette;
        self.rect(Rect::new(-30.0, h - 240.0, 260.0, 220.0), ShapeStyle::filled(p.wash1).with_opacity(0.6));
        self.rect(Rect::new(w - 260.0, h - 250.0, 300.0, 230.0), ShapeStyle::filled(p.wash2).with_opacity(0.45));
        self.rect(
            Rect::new(110.0, -8.0, 420.0, 160.0),
            ShapeStyle::filled(p.wash3).with_opacity(0.40).rotated(-2.0),
        );
    }

    fn place_card(&mut self) {
        let inset = self.page.margin - CARD_OUTSET;
        let card = Rect::new(
            inset,
            inset,
            self.page.width - inset * 2.0,
            self.page.height - inset * 2.0,
        );
        self.rect(card, ShapeStyle::bordered(Rgb::WHITE, CARD_BORDER, 1.0));
        self.region(RegionKind::Card, card);
    }

    fn place_header(&mut self, top: f32) -> f32 {
        let center = self.page.width / 2.0;

        let badge = Rect::new(center - BADGE_WIDTH / 2.0, top - BADGE_HEIGHT, BADGE_WIDTH, BADGE_HEIGHT);
        self.rect(badge, ShapeStyle::filled(self.palette.accent));
        self.region(RegionKind::Badge, badge);
        self.text(BADGE_TEXT, badge.x + 10.0, badge.y + 5.0, LABEL_FONT_SIZE, Font::HelveticaBold, Rgb::WHITE);

        let title_y = badge.y - TITLE_DROP;
        let title_w = Font::HelveticaBold.width_of_text_at_size(self.title, TITLE_FONT_SIZE);
        let ink = self.palette.ink;
        let title = self.title;
        self.text(title, center - title_w / 2.0, title_y, TITLE_FONT_SIZE, Font::HelveticaBold, ink);

        let subtitle_y = title_y - SUBTITLE_DROP;
        let subtitle_w = Font::Helvetica.width_of_text_at_size(self.subtitle, SUBTITLE_FONT_SIZE);
        let subtitle = self.subtitle;
        self.text(
            subtitle,
            center - subtitle_w / 2.0,
            subtitle_y,
            SUBTITLE_FONT_SIZE,
            Font::Helvetica,
            SUBTITLE_COLOR,
        );

        subtitle_y - HEADER_DESCENT
    }

    fn place_meta(&mut self, top: f32) -> f32 {
        let m = self.page.margin;
        let col_w = (self.page.content_width() - META_COLUMN_GAP) / 2.0;
        let label_y = top - META_GAP_ABOVE - LABEL_FONT_SIZE;
        let box_y = top - META_GAP_ABOVE - META_LABEL_ROOM - META_BOX_HEIGHT;

        let boxes = [
            ("Week of", m, self.palette.wash1, FieldName::WeekOf),
            ("Focus", m + col_w + META_COLUMN_GAP, self.palette.wash2, FieldName::Focus),
        ];
        for (label, x, border, name) in boxes {
            self.text(label, x, label_y, LABEL_FONT_SIZE, Font::HelveticaBold, LABEL_COLOR);
            let frame = Rect::new(x, box_y, col_w, META_BOX_HEIGHT);
            self.rect(frame, ShapeStyle::bordered(Rgb::WHITE, border, 2.0));
            self.region(RegionKind::MetaBox, frame);
            self.text_field(name, frame.inset(META_FIELD_INSET_X, META_FIELD_INSET_Y), false, None);
        }

        box_y
    }

    fn place_chips(&mut self, top: f32) -> f32 {
        let y = top - CHIP_GAP_ABOVE - PILL_HEIGHT;
        let style = PillStyle {
            font: Font::HelveticaBold,
            shape: ShapeStyle::bordered(CHIP_FILL, CHIP_BORDER, 1.0),
            text: CHIP_TEXT,
            gap: CHIP_GAP,
        };
        self.pill_run(RegionKind::Chip, &CHIPS, y, style);
        y
    }

    fn place_grid(&mut self, top: f32) -> f32 {
        let grid_top = top - GRID_GAP_ABOVE;
        let body_top = grid_top - GRID_HEADER_HEIGHT;
        let grid = GridSpec::new(&self.page, grid_top);
        let row_h = grid.row_height;
        let m = grid.left;
        let width = grid.width();

        // Header row
        let header = Rect::new(m, body_top, width, GRID_HEADER_HEIGHT);
        self.rect(header, ShapeStyle::filled(Rgb::WHITE));
        self.region(RegionKind::GridHeader, header);
        let headings = std::iter::once("Day").chain(GridColumn::ALL.iter().map(|c| c.heading()));
        for (i, label) in headings.enumerate() {
            let x = grid.column_x(i);
            self.text(label, x + 8.0, body_top + 7.0, LABEL_FONT_SIZE, Font::HelveticaBold, GRID_HEADING_COLOR);
            if i < grid.columns.len() - 1 {
                let sep = x + grid.columns[i];
                self.line(sep, body_top, sep, grid_top);
            }
        }
        self.line(m, body_top, m, grid.bottom());
        self.line(m + width, body_top, m + width, grid.bottom());

        // Body rows
        for (r, day) in Day::ALL.into_iter().enumerate() {
            let row = grid.row_rect(r);
            let tint = if r % 2 == 0 { Rgb::WHITE } else { ROW_TINT_ODD };
            self.rect(row, ShapeStyle::filled(tint));
            self.region(RegionKind::GridRow, row);
            self.line(m, row.y, m + width, row.y);

            self.text(
                day.label(),
                m + 10.0,
                row.y + row_h / 2.0 - 6.0,
                DAY_FONT_SIZE,
                Font::HelveticaBold,
                SECTION_COLOR,
            );

            for (c, column) in GridColumn::ALL.into_iter().enumerate() {
                let x = grid.column_x(c + 1);
                let cell = Rect::new(x, row.y, grid.columns[c + 1], row_h).inset(CELL_INSET_X, CELL_INSET_Y);
                self.rect(cell, ShapeStyle::bordered(Rgb::WHITE, CELL_BORDER, 1.0));
                self.text_field(FieldName::Cell { column, day }, cell, true, Some(CELL_FONT_SIZE));
                self.line(x, row.y, x, row.top());
            }
        }

        self.grid = grid;
        grid.bottom()
    }

    fn place_habits(&mut self, top: f32) -> f32 {
        let m = self.page.margin;
        let block_top = top - HABIT_GAP_ABOVE;
        self.text(
            "Habit Tracker",
            m,
            block_top - SECTION_FONT_SIZE,
            SECTION_FONT_SIZE,
            Font::HelveticaBold,
            SECTION_COLOR,
        );

        let mut row_top = block_top - HABIT_LABEL_ROOM;
        for (i, habit) in HABITS.iter().enumerate() {
            let row = Rect::new(m, row_top - HABIT_ROW_HEIGHT, self.page.content_width(), HABIT_ROW_HEIGHT);
            self.rect(row, ShapeStyle::bordered(Rgb::WHITE, ROW_BORDER, 1.0));
            self.region(RegionKind::HabitRow, row);
            self.text(
                habit.label,
                m + HABIT_LABEL_INSET,
                row.y + HABIT_ROW_HEIGHT / 2.0 - 5.0,
                LABEL_FONT_SIZE,
                Font::Helvetica,
                MUTED_COLOR,
            );

            let tint = habit.tint.resolve(&self.palette);
            let box_y = row.y + (HABIT_ROW_HEIGHT - CHECKBOX_SIZE) / 2.0;
            let mut x = m + HABIT_BOXES_OFFSET;
            for slot in 1..=habit.count {
                let cell = Rect::new(x, box_y, CHECKBOX_SIZE, CHECKBOX_SIZE);
                self.rect(cell, ShapeStyle::bordered(tint, Rgb::WHITE, 1.0));
                self.checkbox(FieldName::Habit { row: i + 1, slot }, cell);
                x += CHECKBOX_SIZE + CHECKBOX_GAP;
            }

            row_top = row.y - HABIT_ROW_GAP;
        }

        row_top + HABIT_ROW_GAP
    }

    fn place_notes(&mut self, top: f32) -> f32 {
        let m = self.page.margin;
        let block_top = top - NOTES_GAP_ABOVE;
        self.text(
            "Notes & Reflections",
            m,
            block_top - SECTION_FONT_SIZE,
            SECTION_FONT_SIZE,
            Font::HelveticaBold,
            SECTION_COLOR,
        );

        let frame = Rect::new(
            m,
            block_top - NOTES_LABEL_ROOM - NOTES_BOX_HEIGHT,
            self.page.content_width(),
            NOTES_BOX_HEIGHT,
        );
        self.rect(frame, ShapeStyle::bordered(Rgb::WHITE, ROW_BORDER, 1.0));
        self.region(RegionKind::NotesBox, frame);
        self.text_field(
            FieldName::Notes,
            frame.inset(NOTES_FIELD_INSET, NOTES_FIELD_INSET),
            true,
            Some(NOTES_FONT_SIZE),
        );

        frame.y
    }

    fn place_footer(&mut self, top: f32) -> f32 {
        let y = top - TIP_GAP_ABOVE - PILL_HEIGHT;
        let style = PillStyle {
            font: Font::Helvetica,
            shape: ShapeStyle::bordered(Rgb::WHITE, self.palette.wash1, 1.0),
            text: MUTED_COLOR,
            gap: TIP_GAP,
        };
        self.pill_run(RegionKind::Tip, &TIPS, y, style);
        y
    }
}
