// glowup-pdf: request/response glue for hosting the generator behind HTTP

use serde_json::{json, Value};
use tracing::{error, info};

use crate::page::PageSize;
use crate::theme::Theme;

pub const DEFAULT_TITLE: &str = "7-Day Glow-Up";
pub const DEFAULT_SUBTITLE: &str = "Meals \u{2022} Movement \u{2022} Self-Care \u{2022} Daily Win";
pub const DOWNLOAD_FILENAME: &str = "7-day-glow-up.pdf";
const GENERIC_FAILURE: &str = "Failed to generate PDF";

// ============================================================================
// Request
// ============================================================================

/// The four knobs a caller can turn. Everything has a default.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerRequest {
    pub theme: Theme,
    pub size: PageSize,
    pub title: String,
    pub subtitle: String,
}

impl Default for PlannerRequest {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            size: PageSize::default(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
        }
    }
}

impl PlannerRequest {
    /// Build a request from optional raw values. Missing or empty values use
    /// the defaults; unknown theme and size names fall back silently.
    pub fn from_params(
        theme: Option<&str>,
        size: Option<&str>,
        title: Option<&str>,
        subtitle: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            theme: given(theme).map(Theme::resolve).unwrap_or(defaults.theme),
            size: given(size).map(PageSize::resolve).unwrap_or(defaults.size),
            title: given(title).map(str::to_string).unwrap_or(defaults.title),
            subtitle: given(subtitle).map(str::to_string).unwrap_or(defaults.subtitle),
        }
    }

    /// Parse a URL query string such as `theme=sage&size=a4&title=My%20Week`.
    /// A leading `?` is ignored. The first occurrence of a key wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let (mut theme, mut size, mut title, mut subtitle) = (None, None, None, None);
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "theme" => &mut theme,
                "size" => &mut size,
                "title" => &mut title,
                "subtitle" => &mut subtitle,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        Self::from_params(theme.as_deref(), size.as_deref(), title.as_deref(), subtitle.as_deref())
    }
}

/// A parameter that is present and non-empty.
fn given(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    fn new(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body,
        }
    }

    fn json(status: u16, value: &Value) -> Self {
        Self::new(status, "application/json", value.to_string().into_bytes())
    }

    fn with_header(mut self, name: &str, value: String) -> Self {
        self.headers.push((name.to_string(), value));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve the planner PDF for a query string. Failures are logged and turned
/// into a generic 500 so no internal detail reaches the caller.
pub fn handle_planner(query: &str) -> HttpResponse {
    let request = PlannerRequest::from_query(query);
    match crate::generate_planner(&request) {
        Ok(pdf) => {
            info!(
                theme = request.theme.name(),
                size = request.size.name(),
                bytes = pdf.len(),
                "served planner"
            );
            HttpResponse::new(200, "application/pdf", pdf).with_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            )
        }
        Err(e) => {
            error!(error = %e, "planner generation failed");
            HttpResponse::json(500, &json!({ "error": GENERIC_FAILURE }))
        }
    }
}

/// Browser-side configuration snippet. Only publishable values belong here.
pub fn env_script(supabase_url: Option<&str>, supabase_anon_key: Option<&str>) -> String {
    let quote = |v: Option<&str>| Value::String(v.unwrap_or_default().to_string()).to_string();
    format!(
        "window.ENV = {{\n  SUPABASE_URL: {},\n  SUPABASE_ANON_KEY: {}\n}};",
        quote(supabase_url),
        quote(supabase_anon_key)
    )
}

pub fn handle_env(supabase_url: Option<&str>, supabase_anon_key: Option<&str>) -> HttpResponse {
    HttpResponse::new(
        200,
        "application/javascript; charset=utf-8",
        env_script(supabase_url, supabase_anon_key).into_bytes(),
    )
}
