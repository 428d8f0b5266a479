pub mod animated;
pub mod sprite;
