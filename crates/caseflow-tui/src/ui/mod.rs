pub(crate) mod modal;
pub(crate) mod picker;
pub(crate) mod progress;
pub(crate) mod text;
