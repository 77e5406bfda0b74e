pub mod whisper_cpp;

use std::path::Path;

use crate::error::Result;

/// A span of recognized speech. Times are seconds from the start of the audio.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Speech-to-text over a 16 kHz mono WAV file.
///
/// Implementations return every segment in chronological order or fail as a whole.
pub trait Transcriber {
    fn transcribe(&mut self, audio: &Path) -> Result<Vec<Segment>>;
}
