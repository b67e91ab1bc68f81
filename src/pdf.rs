// glowup-pdf: PDF backend
//
// printpdf draws the page; the AcroForm is added afterwards with lopdf because
// printpdf has no form widgets.

use std::io::{BufWriter, Cursor, Write};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Pt,
};
use tracing::debug;

use crate::error::AppError;
use crate::geometry::{FieldDescriptor, FieldKind, Rect, ShapeStyle};
use crate::metrics::Font;
use crate::page::PageSpec;
use crate::render::Surface;
use crate::theme::Rgb;

/// Field flag bit for multiline text fields
const FF_MULTILINE: i64 = 1 << 12;

/// Annotation flag bit: print the widget
const ANNOT_PRINT: i64 = 1 << 2;

/// ZapfDingbats check mark
const CHECK_GLYPH: &str = "4";
const CHECK_COLOR: &str = "0.22 0.24 0.29 rg";

// ============================================================================
// Drawing Surface
// ============================================================================

/// A one-page printpdf document that collects form widgets until
/// [`PdfSurface::finish`].
pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font_regular: IndirectFontRef,
    font_bold: IndirectFontRef,
    widgets: Vec<FieldDescriptor>,
}

impl PdfSurface {
    pub fn new(page: &PageSpec, title: &str) -> Result<Self, AppError> {
        let (doc, page1, layer1) = PdfDocument::new(title, mm(page.width), mm(page.height), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);

        let font_regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::PdfError(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        Ok(Self {
            doc,
            layer,
            font_regular,
            font_bold,
            widgets: Vec::new(),
        })
    }

    /// Serialize the page and attach the collected form fields.
    pub fn finish(self) -> Result<Vec<u8>, AppError> {
        let PdfSurface { doc, widgets, .. } = self;

        let mut buf = Vec::new();
        {
            let mut writer = BufWriter::new(Cursor::new(&mut buf));
            doc.save(&mut writer)
                .map_err(|e| AppError::PdfError(e.to_string()))?;
            writer.flush()?;
        }
        debug!(bytes = buf.len(), widgets = widgets.len(), "serialized page");

        attach_form(&buf, &widgets)
    }

    fn font(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Helvetica => &self.font_regular,
            Font::HelveticaBold => &self.font_bold,
        }
    }
}

impl Surface for PdfSurface {
    fn fill_rect(&mut self, rect: &Rect, style: &ShapeStyle) -> Result<(), AppError> {
        let mode = match (style.fill, style.stroke) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, Some(_)) => PaintMode::Stroke,
            (None, None) => return Ok(()),
        };

        // Shapes sit on a white page, so compositing against white matches
        // real transparency without an extended graphics state.
        if let Some(fill) = style.fill {
            self.layer.set_fill_color(pdf_color(fill.over_white(style.opacity)));
        }
        if let Some(stroke) = style.stroke {
            self.layer.set_outline_color(pdf_color(stroke.color.over_white(style.opacity)));
            self.layer.set_outline_thickness(stroke.width);
        }

        let points = rect_corners(rect, style.rotation)
            .into_iter()
            .map(|(x, y)| (Point::new(mm(x), mm(y)), false))
            .collect();
        self.layer.add_polygon(Polygon {
            rings: vec![points],
            mode,
            winding_order: WindingOrder::NonZero,
        });
        Ok(())
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, thickness: f32) -> Result<(), AppError> {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(thickness);
        let points = vec![
            (Point::new(mm(from.0), mm(from.1)), false),
            (Point::new(mm(to.0), mm(to.1)), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: false,
        });
        Ok(())
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, font: Font, color: Rgb) -> Result<(), AppError> {
        self.layer.set_fill_color(pdf_color(color));
        self.layer.use_text(text, size, mm(x), mm(y), self.font(font));
        Ok(())
    }

    fn text_field(&mut self, field: &FieldDescriptor) -> Result<(), AppError> {
        self.widgets.push(field.clone());
        Ok(())
    }

    fn checkbox(&mut self, field: &FieldDescriptor) -> Result<(), AppError> {
        self.widgets.push(field.clone());
        Ok(())
    }
}

// ============================================================================
// Form Fields
// ============================================================================

/// Reopen a serialized PDF, add one widget per field to its first page and
/// register them in a catalog AcroForm.
pub fn attach_form(pdf: &[u8], fields: &[FieldDescriptor]) -> Result<Vec<u8>, AppError> {
    let mut doc = Document::load_mem(pdf)?;
    let page_id = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| AppError::FormError("document has no pages".to_string()))?;

    let helv = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let zadb = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "ZapfDingbats",
    });

    let mut refs: Vec<Object> = Vec::with_capacity(fields.len());
    for field in fields {
        let widget = match field.kind {
            FieldKind::Text => text_widget(field, page_id),
            FieldKind::CheckBox => {
                let (on, off) = checkbox_appearances(&mut doc, &field.rect, zadb);
                checkbox_widget(field, page_id, on, off)
            }
        };
        refs.push(Object::Reference(doc.add_object(widget)));
    }

    let mut annots = match doc.get_object(page_id)?.as_dict()?.get(b"Annots") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => doc.get_object(*id)?.as_array()?.clone(),
        _ => Vec::new(),
    };
    annots.extend(refs.iter().cloned());
    doc.get_object_mut(page_id)?.as_dict_mut()?.set("Annots", annots);

    let acro_form = doc.add_object(dictionary! {
        "Fields" => refs,
        "NeedAppearances" => true,
        "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
        "DR" => dictionary! {
            "Font" => dictionary! {
                "Helv" => helv,
                "ZaDb" => zadb,
            },
        },
    });
    let root = doc.trailer.get(b"Root")?.as_reference()?;
    doc.get_object_mut(root)?.as_dict_mut()?.set("AcroForm", acro_form);
    debug!(fields = fields.len(), "attached AcroForm");

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn text_widget(field: &FieldDescriptor, page_id: ObjectId) -> Dictionary {
    // Size 0 asks the viewer to auto-fit.
    let size = field.font_size.unwrap_or(0.0);
    let mut dict = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal(field.name.as_str()),
        "Rect" => rect_array(&field.rect),
        "F" => ANNOT_PRINT,
        "P" => page_id,
        "DA" => Object::string_literal(format!("/Helv {} Tf 0 g", size)),
        "MK" => dictionary! {},
    };
    if field.multiline {
        dict.set("Ff", FF_MULTILINE);
    }
    dict
}

fn checkbox_widget(field: &FieldDescriptor, page_id: ObjectId, on: ObjectId, off: ObjectId) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Btn",
        "T" => Object::string_literal(field.name.as_str()),
        "Rect" => rect_array(&field.rect),
        "F" => ANNOT_PRINT,
        "P" => page_id,
        "V" => "Off",
        "AS" => "Off",
        "DA" => Object::string_literal("/ZaDb 0 Tf 0 g"),
        "MK" => dictionary! {
            "CA" => Object::string_literal(CHECK_GLYPH),
        },
        "AP" => dictionary! {
            "N" => dictionary! {
                "On" => on,
                "Off" => off,
            },
        },
    }
}

/// Normal appearances for the checked and unchecked states.
fn checkbox_appearances(doc: &mut Document, rect: &Rect, zadb: ObjectId) -> (ObjectId, ObjectId) {
    let bbox: Vec<Object> = vec![0_i64.into(), 0_i64.into(), rect.width.into(), rect.height.into()];
    let glyph_size = rect.height * 0.8;
    let on_content = format!(
        "q {} BT /ZaDb {:.2} Tf {:.2} {:.2} Td ({}) Tj ET Q",
        CHECK_COLOR,
        glyph_size,
        rect.width * 0.15,
        rect.height * 0.22,
        CHECK_GLYPH,
    );

    let on = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => bbox.clone(),
            "Resources" => dictionary! {
                "Font" => dictionary! { "ZaDb" => zadb },
            },
        },
        on_content.into_bytes(),
    ));
    let off = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => bbox,
        },
        Vec::new(),
    ));
    (on, off)
}

// ============================================================================
// Conversion Utilities
// ============================================================================

fn mm(pt: f32) -> Mm {
    Mm::from(Pt(pt))
}

fn pdf_color(c: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(c.r, c.g, c.b, None))
}

fn rect_array(rect: &Rect) -> Vec<Object> {
    vec![rect.x.into(), rect.y.into(), rect.right().into(), rect.top().into()]
}

/// Corners counter-clockwise from the origin, rotated by `degrees` about it.
fn rect_corners(rect: &Rect, degrees: f32) -> [(f32, f32); 4] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let rotate = |dx: f32, dy: f32| (rect.x + dx * cos - dy * sin, rect.y + dx * sin + dy * cos);
    [
        rotate(0.0, 0.0),
        rotate(rect.width, 0.0),
        rotate(rect.width, rect.height),
        rotate(0.0, rect.height),
    ]
}
