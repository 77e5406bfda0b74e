use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;

use vidsub::config::{self, DEFAULT_LANGUAGE, ModelSize};
use vidsub::ffmpeg_decoder::Ffmpeg;
use vidsub::locate::PathResolver;
use vidsub::pipeline;
use vidsub::transcribe::whisper_cpp::Whisper;

#[derive(Parser)]
#[command(name = "vidsub")]
#[command(about = "Generate SRT subtitles for a video file", long_about = None)]
struct Cli {
    /// Input video file (.mp4 or .mkv)
    video: Option<PathBuf>,

    /// Spoken language code
    #[arg(default_value_t = DEFAULT_LANGUAGE.to_string())]
    language: String,

    /// Whisper model size (default: medium, or model_size from the config file)
    #[arg(long, value_enum)]
    model_size: Option<ModelSize>,

    /// Explicit ggml model file, overrides the model directory lookup
    #[arg(long)]
    model: Option<PathBuf>,

    /// Configuration file (default: ~/.vidsub/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the extracted WAV next to the video
    #[arg(long)]
    keep_audio: bool,
}

fn print_usage() {
    println!("Usage: vidsub <video_file> [language]");
    println!("Language codes:");
    println!("{}", config::language_list());
    println!("Example: vidsub video.mp4 es");
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(input) = cli.video else {
        print_usage();
        return Err(vidsub::Error::Usage.into());
    };

    let app_config = match &cli.config {
        Some(path) => config::load_config_file(path),
        None => config::load_app_config(),
    }
    .context("Failed to load config")?;

    let model_size = app_config.resolve_model_size(cli.model_size);

    let resolver = PathResolver::with_dirs(&app_config.search_dirs);
    let run_config = pipeline::validate(&input, &cli.language, model_size, &resolver)?;

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% ({eta})")?
            .progress_chars("#>-"),
    );

    let extractor = Ffmpeg::new();
    let model_override = cli.model;
    let whisper_conf = app_config.whisper.clone();

    let written = pipeline::run(
        &run_config,
        &extractor,
        |rc| {
            let (_, model_path) = app_config.resolve_model(Some(rc.model_size), model_override)?;
            println!("Loading {} model...", rc.model_size);
            Ok(Whisper::new(&model_path, rc.language, whisper_conf)?.with_progress(pb.clone()))
        },
        cli.keep_audio,
    );
    pb.finish_and_clear();

    let written = written?;
    log::info!("wrote {} subtitle entries to {:?}", written, run_config.srt_path);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<vidsub::Error>() {
                // Usage text was already printed.
                Some(vidsub::Error::Usage) => {}
                Some(vidsub::Error::UnsupportedLanguage(_)) => {
                    eprintln!("Error: {err:#}");
                    eprintln!("Supported languages:");
                    eprintln!("{}", config::language_list());
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
