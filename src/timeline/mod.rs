pub(crate) mod anchor;
pub(crate) mod schedule;
#[allow(clippy::module_inception)]
pub(crate) mod timeline;
