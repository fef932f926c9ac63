pub(crate) mod entity;
pub(crate) mod stage;
pub(crate) mod state;
