// glowup-pdf: page size presets

use serde::Serialize;

/// Page dimensions and margin in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageSpec {
    /// Width available between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    pub const ALL: [PageSize; 2] = [PageSize::Letter, PageSize::A4];

    /// Case-insensitive lookup. Anything but "a4" is letter.
    pub fn resolve(name: &str) -> PageSize {
        match name.to_ascii_lowercase().as_str() {
            "a4" => PageSize::A4,
            _ => PageSize::Letter,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::Letter => "letter",
            PageSize::A4 => "a4",
        }
    }

    pub fn spec(self) -> PageSpec {
        match self {
            PageSize::Letter => PageSpec {
                width: 612.0,
                height: 792.0,
                margin: 44.0,
            },
            PageSize::A4 => PageSpec {
                width: 595.0,
                height: 842.0,
                margin: 42.0,
            },
        }
    }
}

/// Resolve a size name straight to its page geometry.
pub fn resolve_page(name: &str) -> PageSpec {
    PageSize::resolve(name).spec()
}
