//! Audio Module
//!
//! Decoding uploaded clips into a mono sample buffer:
//! - Mono audio buffer
//! - WAV / MP3 loading with channel downmix

pub mod buffer;
pub mod loader;

pub use buffer::{generate_test_tone, AudioBuffer};
pub use loader::{load, load_bytes};
