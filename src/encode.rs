pub(crate) mod animated;
pub(crate) mod still;
