//! circledb-rs
//!
//! Umbrella crate re-exporting [`circledb_core`], so the runnable demos under
//! `demos/` can `use circledb_rs::prelude::*`.

pub use circledb_core::*;
