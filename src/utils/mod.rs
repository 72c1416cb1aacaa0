//! Utility functions for the classification pipeline.
//!
//! This module provides image decoding and loading helpers used by the
//! pipeline and the demo binary.

pub mod image;

pub use image::{decode_image, is_supported_image, load_image, sniff_format};
