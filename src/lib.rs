// glowup-pdf: Generate a themeable, fillable weekly planner PDF

pub mod error;
pub mod fields;
pub mod geometry;
pub mod handler;
pub mod layout;
pub mod metrics;
pub mod page;
pub mod pdf;
pub mod render;
pub mod theme;

pub use error::AppError;
pub use handler::PlannerRequest;
pub use layout::{compute_layout, DocumentLayout};

use tracing::debug;

/// Compute the layout a request describes without drawing anything.
pub fn plan(request: &PlannerRequest) -> DocumentLayout {
    compute_layout(
        request.size.spec(),
        request.theme.palette(),
        &request.title,
        &request.subtitle,
    )
}

/// Build the planner PDF for a request and return its bytes.
pub fn generate_planner(request: &PlannerRequest) -> Result<Vec<u8>, AppError> {
    debug!(
        theme = request.theme.name(),
        size = request.size.name(),
        title = %request.title,
        "generating planner"
    );
    let layout = plan(request);
    let mut surface = pdf::PdfSurface::new(layout.page(), layout.title())?;
    render::emit(layout, &mut surface)?;
    surface.finish()
}
