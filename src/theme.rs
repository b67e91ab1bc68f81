// glowup-pdf: theme palettes

use serde::Serialize;

/// RGB color with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    /// Composite this color at `alpha` over a white background.
    pub fn over_white(self, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let bg = 1.0;
        Rgb {
            r: self.r * alpha + bg * (1.0 - alpha),
            g: self.g * alpha + bg * (1.0 - alpha),
            b: self.b * alpha + bg * (1.0 - alpha),
        }
    }
}

/// The five colors a theme applies across the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub accent: Rgb,
    pub wash1: Rgb,
    pub wash2: Rgb,
    pub wash3: Rgb,
    pub ink: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Blush,
    Neutral,
    Sage,
    Sky,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Blush, Theme::Neutral, Theme::Sage, Theme::Sky];

    /// Case-insensitive lookup. Unknown or empty names fall back to blush.
    /// Surrounding whitespace is not stripped.
    pub fn resolve(name: &str) -> Theme {
        match name.to_ascii_lowercase().as_str() {
            "neutral" => Theme::Neutral,
            "sage" => Theme::Sage,
            "sky" => Theme::Sky,
            _ => Theme::Blush,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Blush => "blush",
            Theme::Neutral => "neutral",
            Theme::Sage => "sage",
            Theme::Sky => "sky",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Blush => Palette {
                accent: Rgb::new(1.00, 0.48, 0.72),
                wash1: Rgb::new(1.00, 0.90, 0.95),
                wash2: Rgb::new(0.90, 0.94, 1.00),
                wash3: Rgb::new(0.94, 0.90, 1.00),
                ink: Rgb::new(0.13, 0.14, 0.16),
            },
            Theme::Neutral => Palette {
                accent: Rgb::new(0.31, 0.50, 0.76),
                wash1: Rgb::new(0.97, 0.97, 0.98),
                wash2: Rgb::new(0.95, 0.96, 0.99),
                wash3: Rgb::new(0.96, 0.96, 0.98),
                ink: Rgb::new(0.13, 0.14, 0.16),
            },
            Theme::Sage => Palette {
                accent: Rgb::new(0.40, 0.64, 0.53),
                wash1: Rgb::new(0.92, 0.98, 0.95),
                wash2: Rgb::new(0.88, 0.95, 0.92),
                wash3: Rgb::new(0.94, 0.98, 0.96),
                ink: Rgb::new(0.12, 0.16, 0.14),
            },
            Theme::Sky => Palette {
                accent: Rgb::new(0.39, 0.70, 0.98),
                wash1: Rgb::new(0.89, 0.95, 1.00),
                wash2: Rgb::new(0.92, 0.97, 1.00),
                wash3: Rgb::new(0.95, 0.98, 1.00),
                ink: Rgb::new(0.12, 0.13, 0.18),
            },
        }
    }
}

/// Resolve a theme name straight to its palette.
pub fn resolve_palette(name: &str) -> Palette {
    Theme::resolve(name).palette()
}
