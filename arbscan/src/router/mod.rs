pub mod compare;
pub mod fetch;
pub mod stitch;
