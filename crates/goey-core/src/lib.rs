#![forbid(unsafe_code)]

//! Core: animation primitives, sub-pixel geometry, frame timing and motion
//! preferences shared by every goey crate.

pub mod animation;
pub mod clock;
pub mod geometry;
pub mod logging;
pub mod motion;
