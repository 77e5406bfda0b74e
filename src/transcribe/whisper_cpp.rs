use std::{
    ffi::c_int,
    path::Path,
    sync::Once,
};

use whisper_rs::{FullParams, WhisperContext, WhisperContextParameters};

use crate::{
    config::{Language, WhisperConfig},
    error::{Error, Result},
    ffmpeg_decoder,
    transcribe::{Segment, Transcriber},
};

pub struct Whisper {
    ctx: WhisperContext,
    lang: Language,
    conf: WhisperConfig,
    progress: Option<indicatif::ProgressBar>,
}

const DEFAULT_BEAM_SIZE: u32 = 5;
const DEFAULT_PATIENCE: f32 = 1.0;

// whisper.cpp reports segment bounds in 10 ms units.
const TICKS_PER_SECOND: f64 = 100.0;

fn install_log_hooks() {
    static INIT: Once = Once::new();
    INIT.call_once(whisper_rs::install_logging_hooks);
}

impl Whisper {
    /// Loads the ggml model at `model_path` on the CPU.
    pub fn new(model_path: &Path, lang: Language, conf: WhisperConfig) -> Result<Self> {
        install_log_hooks();

        if !model_path.exists() {
            return Err(Error::Transcription(format!(
                "model not found at {} (download a ggml model or pass --model)",
                model_path.display()
            )));
        }
        let model_str = model_path
            .to_str()
            .ok_or_else(|| Error::Transcription(format!("invalid model path {model_path:?}")))?;

        // CPU only; accelerator backends are not used.
        let mut param = WhisperContextParameters::default();
        param.use_gpu(false);

        log::info!("loading whisper model from {}", model_path.display());
        let ctx = WhisperContext::new_with_params(model_str, param).map_err(|e| {
            Error::Transcription(format!("failed to load model {}: {e}", model_path.display()))
        })?;

        Ok(Self {
            ctx,
            lang,
            conf,
            progress: None,
        })
    }

    /// Mirrors whisper.cpp's percentage onto `pb` during inference.
    pub fn with_progress(mut self, pb: indicatif::ProgressBar) -> Self {
        self.progress = Some(pb);
        self
    }

    fn params(&self) -> FullParams<'_, '_> {
        let mut params = FullParams::new(whisper_rs::SamplingStrategy::BeamSearch {
            beam_size: self.conf.beam_size.unwrap_or(DEFAULT_BEAM_SIZE) as c_int,
            patience: self.conf.patience.unwrap_or(DEFAULT_PATIENCE),
        });

        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_token_timestamps(false);
        params.set_translate(false);

        params.set_language(Some(self.lang.as_str()));
        if let Some(prompt) = self.conf.initial_prompt.as_deref() {
            params.set_initial_prompt(prompt);
        }

        if let Some(pb) = self.progress.clone() {
            params.set_progress_callback_safe(move |progress: i32| {
                pb.set_position(progress.clamp(0, 100) as u64);
            });
        }

        params
    }
}

impl Transcriber for Whisper {
    fn transcribe(&mut self, audio: &Path) -> Result<Vec<Segment>> {
        let samples = ffmpeg_decoder::read_samples(audio)?;
        log::debug!("decoded {} samples from {:?}", samples.len(), audio);

        let params = self.params();
        let mut state = self.ctx.create_state()?;
        state.full(params, &samples)?;

        let num_segments = state.full_n_segments();
        if num_segments < 1 {
            log::warn!("no speech found in {:?}", audio);
        }

        let mut segments = Vec::with_capacity(num_segments.max(0) as usize);
        for segment in state.as_iter() {
            let text = segment.to_str_lossy()?.to_string();
            let start = ticks_to_seconds(segment.start_timestamp());
            let end = ticks_to_seconds(segment.end_timestamp()).max(start);

            segments.push(Segment { start, end, text });
        }

        Ok(segments)
    }
}

fn ticks_to_seconds(ticks: i64) -> f64 {
    ticks.max(0) as f64 / TICKS_PER_SECOND
}
