pub(crate) mod ease;
pub(crate) mod property;
pub(crate) mod tween;
