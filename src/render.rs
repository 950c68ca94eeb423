pub(crate) mod draw;
pub(crate) mod pipeline;
pub(crate) mod surface;
