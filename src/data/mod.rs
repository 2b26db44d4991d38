pub mod carousel;
pub mod project;
