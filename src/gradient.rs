//! Gradient color fields: spatial position to color via a stop table.

pub(crate) mod field;
pub(crate) mod stops;
