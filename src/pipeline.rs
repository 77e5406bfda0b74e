use std::path::{Path, PathBuf};

use crate::config::{Language, ModelSize, SUPPORTED_EXTENSIONS};
use crate::error::{Error, Result};
use crate::ffmpeg_decoder::AudioExtractor;
use crate::locate::PathResolver;
use crate::output;
use crate::transcribe::Transcriber;

/// Everything one run needs, fixed before any external tool is started.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    pub video_path: PathBuf,
    pub audio_path: PathBuf,
    pub srt_path: PathBuf,
    pub language: Language,
    pub model_size: ModelSize,
}

impl RunConfiguration {
    pub fn new(video_path: PathBuf, language: Language, model_size: ModelSize) -> Self {
        Self {
            audio_path: video_path.with_extension("wav"),
            srt_path: video_path.with_extension("srt"),
            video_path,
            language,
            model_size,
        }
    }
}

/// Resolves the input, then checks its extension and the language code.
pub fn validate(
    input: &Path,
    language: &str,
    model_size: ModelSize,
    resolver: &PathResolver,
) -> Result<RunConfiguration> {
    let video_path = resolver.resolve(input)?;
    log::debug!("resolved {:?} to {:?}", input, video_path);

    check_format(&video_path)?;
    let language: Language = language.parse()?;

    Ok(RunConfiguration::new(video_path, language, model_size))
}

pub fn check_format(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else if ext.is_empty() {
        Err(Error::UnsupportedFormat(String::new()))
    } else {
        Err(Error::UnsupportedFormat(format!(".{ext}")))
    }
}

/// Removes the extracted WAV when dropped unless told to keep it.
struct TransientFile<'a> {
    path: &'a Path,
    keep: bool,
}

impl Drop for TransientFile<'_> {
    fn drop(&mut self) {
        if self.keep || !self.path.exists() {
            return;
        }
        match std::fs::remove_file(self.path) {
            Ok(()) => log::debug!("removed {:?}", self.path),
            Err(e) => log::warn!("could not remove {:?}: {}", self.path, e),
        }
    }
}

/// Extract, transcribe, write. Returns the number of subtitle entries written.
///
/// `load` is only called after extraction succeeded. Once extraction has run, the
/// WAV is removed on every exit path unless `keep_audio` is set. A WAV that was
/// already there is left alone if extraction fails.
pub fn run<E, T, L>(config: &RunConfiguration, extractor: &E, load: L, keep_audio: bool) -> Result<usize>
where
    E: AudioExtractor + ?Sized,
    T: Transcriber,
    L: FnOnce(&RunConfiguration) -> Result<T>,
{
    let video_name = display_name(&config.video_path);
    let srt_name = display_name(&config.srt_path);

    println!("[1/4] Extracting audio from {}...", video_name);
    let mut audio = TransientFile {
        path: &config.audio_path,
        keep: keep_audio || config.audio_path.exists(),
    };
    extractor.extract(&config.video_path, &config.audio_path)?;
    audio.keep = keep_audio;

    println!("[2/4] Loading Whisper model...");
    let mut transcriber = load(config)?;
    println!(
        "Transcribing audio in {} (this may take a while)...",
        config.language.description()
    );
    let segments = transcriber.transcribe(&config.audio_path)?;
    drop(transcriber);

    println!("[3/4] Writing subtitles to {}...", srt_name);
    output::save_srt(&config.srt_path, &segments)?;

    println!("[4/4] Done! Subtitles saved to {}", config.srt_path.display());
    Ok(segments.len())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
