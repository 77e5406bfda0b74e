pub mod config;
pub mod error;
pub mod ffmpeg_decoder;
pub mod locate;
pub mod output;
pub mod pipeline;
pub mod transcribe;

pub use error::{Error, Result};
