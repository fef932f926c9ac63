pub(crate) mod config;
pub(crate) mod metrics;
pub(crate) mod pacing;
pub(crate) mod panels;
pub(crate) mod show;
pub(crate) mod text;
