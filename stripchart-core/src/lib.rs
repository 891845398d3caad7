//! Board-agnostic scrolling graph and text log engines
//!
//! This crate contains the rendering state machines for small
//! fixed-resolution displays:
//!
//! - `ScrollingGraph`: bounded sample history plotted as a line graph
//!   with optional title/axis labels and a pane border
//! - `ScrollingText`: bounded FIFO line log with hard character wrap
//! - `Label`: text, alignment and optional font/color for graph chrome
//!
//! Both engines own their `Surface` handle for their lifetime and redraw
//! a full frame per call, ending with `show`. Nothing here touches
//! hardware.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod graph;
pub mod label;
pub mod text;

#[cfg(test)]
mod testutil;

// Re-export key types
pub use graph::{GraphStyle, Pane, ScrollingGraph, DEFAULT_MAX_SAMPLES};
pub use label::{Align, Label, MAX_LABEL_LEN};
pub use text::ScrollingText;
