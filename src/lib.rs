//! svg2clip - Library for sampling traced SVG frame sequences into animation clips
//!
//! This library provides functionality to:
//! - Extract and parse SVG path data (`M`, `m`, `l`, `c`)
//! - Sample paths into a keyframe sequence with edge clipping, spacing and
//!   curve breaks
//! - Write the sequence as a Unity `.anim` clip or a MelonLoader `.cs` mod

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod input;
pub mod models;
pub mod path;
pub mod progress;
pub mod sampler;
pub mod svg;
