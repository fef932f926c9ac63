/// Steps shorter than this are unreadable and get replaced by [`FALLBACK_STEP`].
pub const MIN_LEGIBLE_STEP: f64 = 0.3;

/// Step used when the window is too tight for a legible stagger.
pub const FALLBACK_STEP: f64 = 0.5;

/// Gap between successive list-item reveals inside `[window_start, window_end]`.
///
/// The last item lands `min_read` seconds before `window_end` when the window allows it; the gap
/// never exceeds `max_step`. A gap below [`MIN_LEGIBLE_STEP`] becomes [`FALLBACK_STEP`] even if
/// that overruns the window.
pub fn pace(window_start: f64, window_end: f64, min_read: f64, max_step: f64, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let available = window_end - window_start - min_read;
    let step = max_step.min(available / (count - 1) as f64);
    if step < MIN_LEGIBLE_STEP || step.is_nan() {
        FALLBACK_STEP
    } else {
        step
    }
}

/// Return `true` if `count` items spaced by `step` from `window_start` leave less than
/// `min_read` seconds before `window_end`.
pub fn overruns(
    window_start: f64,
    window_end: f64,
    min_read: f64,
    step: f64,
    count: usize,
) -> bool {
    if count == 0 {
        return false;
    }
    let last = window_start + step * (count - 1) as f64;
    last + min_read > window_end + 1e-9
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/pacing.rs"]
mod tests;
