//! Sprite-sheet splitter orchestrating mask extraction, per-axis
//! segmentation, selection and grid assembly.
//!
//! Overview
//! - Extracts a foreground mask (alpha, or edge-connected background removal
//!   for opaque sheets) and drops components too small to be part of a frame.
//! - Crops the mask to its bounding box and projects it onto both axes.
//! - Runs every segmentation strategy on each axis and lets the selector
//!   score the multi-segment proposals.
//! - Cuts the row × column grid out of the sheet, trims every cell and keeps
//!   the ones with enough visible pixels. An empty grid falls back to the
//!   whole sheet as one frame.
//!
//! Modules
//! - [`params`] – tuned constants and the serde-friendly parameter groups.
//! - `pipeline` – the [`SpriteSplitter`] implementation.

pub mod params;
mod pipeline;

pub use params::SplitParams;
pub use pipeline::{split_frames, SpriteSplitter};
