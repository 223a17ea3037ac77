pub(crate) mod builder;
pub(crate) mod figure;
pub(crate) mod finder;
pub(crate) mod mask;
pub(crate) mod module;
