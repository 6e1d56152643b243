pub mod album;
pub mod frequency;
