use crate::error::{Error, Result};
use crate::transcribe::Segment;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One numbered SRT cue.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start: String,
    pub end: String,
    pub text: String,
}

impl SubtitleEntry {
    pub fn from_segment(index: usize, segment: &Segment) -> Result<Self> {
        Ok(Self {
            index,
            start: format_timestamp(segment.start)?,
            end: format_timestamp(segment.end)?,
            text: segment.text.trim().to_string(),
        })
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n",
            self.index, self.start, self.end, self.text
        )
    }
}

/// Numbers segments 1..N in the order given.
pub fn to_entries(segments: &[Segment]) -> Result<Vec<SubtitleEntry>> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| SubtitleEntry::from_segment(i + 1, segment))
        .collect()
}

pub fn write_srt<W: Write>(w: &mut W, entries: &[SubtitleEntry]) -> std::io::Result<()> {
    for entry in entries {
        writeln!(w, "{entry}")?;
    }
    Ok(())
}

/// Writes segments to `path` as UTF-8 SRT, replacing any existing file.
pub fn save_srt(path: &Path, segments: &[Segment]) -> Result<()> {
    // Format every timestamp before opening the file so a bad one never truncates it.
    let entries = to_entries(segments)?;

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut file = BufWriter::new(file);
    write_srt(&mut file, &entries)
        .and_then(|()| file.flush())
        .map_err(|e| Error::io(path, e))
}

/// Formats seconds as `HH:MM:SS,mmm`, rounding to the nearest millisecond.
///
/// Hours keep growing past 99 instead of wrapping.
pub fn format_timestamp(seconds: f64) -> Result<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "timestamp must be a non-negative number of seconds, got {seconds}"
        )));
    }

    let ms = (seconds * 1000.0).round() as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1000;
    let millis = ms % 1000;

    Ok(format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis))
}
