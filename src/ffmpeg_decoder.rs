use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const SAMPLE_RATE: u32 = 16000;

/// Produces the transient WAV the transcriber reads.
pub trait AudioExtractor {
    fn extract(&self, video: &Path, audio: &Path) -> Result<()>;
}

pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    /// Uses the sidecar-managed ffmpeg if one was downloaded, `ffmpeg` on PATH otherwise.
    pub fn new() -> Self {
        Self {
            program: ffmpeg_sidecar::paths::ffmpeg_path(),
        }
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ffmpeg".to_string())
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new()
    }
}

// ffmpeg -i input.mp4 -vn -acodec pcm_s16le -ar 16000 -ac 1 output.wav
impl AudioExtractor for Ffmpeg {
    fn extract(&self, video: &Path, audio: &Path) -> Result<()> {
        let sample_rate = SAMPLE_RATE.to_string();
        let mut cmd = Command::new(&self.program);
        cmd.arg("-i")
            .arg(video)
            .args([
                "-vn",
                "-acodec",
                "pcm_s16le",
                "-ar",
                sample_rate.as_str(),
                "-ac",
                "1",
                "-hide_banner",
                "-loglevel",
                "error",
                "-y",
            ])
            .arg(audio)
            .stdin(Stdio::null());

        log::debug!("running {:?}", cmd);

        let output = cmd.output().map_err(|e| Error::ExternalTool {
            tool: self.tool_name(),
            status: None,
            stderr: e.to_string(),
        })?;

        if output.status.success() {
            log::debug!("audio written to {:?}", audio);
            Ok(())
        } else {
            Err(Error::ExternalTool {
                tool: self.tool_name(),
                status: Some(output.status),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

/// Reads a mono 16 kHz 16-bit WAV into the float samples whisper expects.
pub fn read_samples<P: AsRef<Path>>(audio_file_path: P) -> Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(audio_file_path.as_ref())?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.sample_rate != SAMPLE_RATE || spec.bits_per_sample != 16 {
        return Err(Error::Transcription(format!(
            "expected mono {} Hz 16-bit audio, got {} channel(s) at {} Hz, {}-bit",
            SAMPLE_RATE, spec.channels, spec.sample_rate, spec.bits_per_sample
        )));
    }

    let audio_buf: Vec<i16> = reader.samples::<i16>().collect::<std::result::Result<_, _>>()?;
    let mut output = vec![0.0f32; audio_buf.len()];

    whisper_rs::convert_integer_to_float_audio(&audio_buf, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, channels: u16, sample_rate: u32, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for s in samples {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn reads_mono_16k_as_floats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_wav(&path, 1, SAMPLE_RATE, &[0, 16384, -32768]);

        let samples = read_samples(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 0.5).abs() < 1e-4);
        assert!((samples[2] + 1.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_stereo_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 2, SAMPLE_RATE, &[0, 0, 1, 1]);

        assert!(matches!(read_samples(&path), Err(Error::Transcription(_))));
    }

    #[test]
    fn missing_wav_is_a_transcription_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_samples(dir.path().join("nope.wav")),
            Err(Error::Transcription(_))
        ));
    }

    #[test]
    fn missing_binary_is_reported_as_not_started() {
        let dir = tempfile::tempdir().unwrap();
        let ffmpeg = Ffmpeg::with_program(dir.path().join("no-such-ffmpeg"));

        let err = ffmpeg
            .extract(&dir.path().join("in.mp4"), &dir.path().join("out.wav"))
            .unwrap_err();
        assert!(matches!(err, Error::ExternalTool { status: None, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let ffmpeg = Ffmpeg::with_program("false");

        let err = ffmpeg
            .extract(&dir.path().join("in.mp4"), &dir.path().join("out.wav"))
            .unwrap_err();
        match err {
            Error::ExternalTool { tool, status, .. } => {
                assert_eq!(tool, "false");
                assert!(!status.unwrap().success());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
