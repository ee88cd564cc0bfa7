//! Schema Module
//!
//! HTML/SVG attribute tables consulted when building data bags.

pub mod html_attributes;

pub use html_attributes::*;
