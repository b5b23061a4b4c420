//! Read-only views that remap or aggregate other virtual images.

pub(crate) mod canvas;
pub(crate) mod mosaic;
pub(crate) mod rotate;
pub(crate) mod screen;
