use crate::{
    foundation::core::Viewport,
    foundation::error::{ChoreoError, ChoreoResult},
};

/// Per-cell geometry derived from the viewport; fixed for the lifetime of one timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewportMetrics {
    /// Viewport the metrics were computed from.
    pub viewport: Viewport,
    /// Panels per track.
    pub panel_count: u32,
    /// `viewport.width / panel_count`.
    pub cell_width: f64,
    /// `viewport.height / panel_count`.
    pub cell_height: f64,
}

impl ViewportMetrics {
    /// Divide the viewport into `panel_count` cells along each axis.
    pub fn compute(viewport: Viewport, panel_count: u32) -> ChoreoResult<Self> {
        if panel_count == 0 {
            return Err(ChoreoError::validation("panel_count must be > 0"));
        }
        let n = f64::from(panel_count);
        Ok(Self {
            viewport,
            panel_count,
            cell_width: viewport.width / n,
            cell_height: viewport.height / n,
        })
    }

    /// Viewport width.
    pub fn width(&self) -> f64 {
        self.viewport.width
    }

    /// Viewport height.
    pub fn height(&self) -> f64 {
        self.viewport.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/metrics.rs"]
mod tests;
