//! 엔티티 공통 타입

pub mod base;

pub use base::{Entity, EntityMeta};
