use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mkv"];

pub const DEFAULT_LANGUAGE: Language = Language::English;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Dutch,
    Russian,
    Chinese,
    Japanese,
    Korean,
    Arabic,
    Hindi,
    Turkish,
    Polish,
    Ukrainian,
    Swedish,
    Catalan,
}

/// Every language the tool accepts, in the order shown in help output.
pub const LANGUAGES: &[(Language, &str)] = &[
    (Language::English, "English"),
    (Language::Spanish, "Spanish (Español)"),
    (Language::French, "French (Français)"),
    (Language::German, "German (Deutsch)"),
    (Language::Italian, "Italian (Italiano)"),
    (Language::Portuguese, "Portuguese (Português)"),
    (Language::Dutch, "Dutch (Nederlands)"),
    (Language::Russian, "Russian (Русский)"),
    (Language::Chinese, "Chinese (中文)"),
    (Language::Japanese, "Japanese (日本語)"),
    (Language::Korean, "Korean (한국어)"),
    (Language::Arabic, "Arabic (العربية)"),
    (Language::Hindi, "Hindi (हिन्दी)"),
    (Language::Turkish, "Turkish (Türkçe)"),
    (Language::Polish, "Polish (Polski)"),
    (Language::Ukrainian, "Ukrainian (Українська)"),
    (Language::Swedish, "Swedish (Svenska)"),
    (Language::Catalan, "Catalan (Català)"),
];

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
            Language::Russian => "ru",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Arabic => "ar",
            Language::Hindi => "hi",
            Language::Turkish => "tr",
            Language::Polish => "pl",
            Language::Ukrainian => "uk",
            Language::Swedish => "sv",
            Language::Catalan => "ca",
        }
    }

    pub fn description(&self) -> &'static str {
        LANGUAGES
            .iter()
            .find(|(lang, _)| lang == self)
            .map(|(_, desc)| *desc)
            .unwrap_or_else(|| self.as_str())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LANGUAGES
            .iter()
            .map(|(lang, _)| *lang)
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

impl Serialize for Language {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Renders the supported language table, one `  code: description` per line.
pub fn language_list() -> String {
    LANGUAGES
        .iter()
        .map(|(lang, desc)| format!("  {}: {}", lang.as_str(), desc))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    #[default]
    Medium,
    Large,
}

impl ModelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// ggml weight file looked up in the model directory. `large` means the
    /// v3 weights, the current large release of whisper.cpp.
    pub fn file_name(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::Large => "ggml-large-v3.bin",
        }
    }
}

impl std::fmt::Display for ModelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WhisperConfig {
    pub beam_size: Option<u32>,
    pub patience: Option<f32>,
    pub initial_prompt: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    pub model_dir: Option<String>,
    pub model_size: Option<ModelSize>,
    #[serde(default)]
    pub search_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub whisper: WhisperConfig,
}

impl AppConfig {
    /// Directory holding the ggml weight files, with `~/` expanded.
    pub fn model_dir(&self) -> Result<PathBuf> {
        match &self.model_dir {
            Some(dir) => expand_home(dir),
            None => Ok(app_dir()?.join("models")),
        }
    }

    pub fn model_path(&self, size: ModelSize) -> Result<PathBuf> {
        Ok(self.model_dir()?.join(size.file_name()))
    }

    /// Size precedence: `--model-size`, then `model_size` from the file, then medium.
    pub fn resolve_model_size(&self, cli_size: Option<ModelSize>) -> ModelSize {
        cli_size.or(self.model_size).unwrap_or_default()
    }

    /// Picks the model size and weights file for a run. An explicit `--model`
    /// path wins over the model directory lookup.
    pub fn resolve_model(
        &self,
        cli_size: Option<ModelSize>,
        cli_model: Option<PathBuf>,
    ) -> Result<(ModelSize, PathBuf)> {
        let size = self.resolve_model_size(cli_size);
        let path = match cli_model {
            Some(path) => path,
            None => self.model_path(size)?,
        };
        Ok((size, path))
    }
}

fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("could not find home directory".to_string()))?;
    Ok(home.join(".vidsub"))
}

fn expand_home(path: &str) -> Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir()
                .ok_or_else(|| Error::Config("could not find home directory".to_string()))?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

/// Loads `~/.vidsub/config.yaml`, falling back to defaults when it is absent.
pub fn load_app_config() -> Result<AppConfig> {
    load_app_config_from(dirs::home_dir().as_deref())
}

/// Like [`load_app_config`] with an explicit home directory. No home means no
/// config file.
pub fn load_app_config_from(home: Option<&Path>) -> Result<AppConfig> {
    let Some(home) = home else {
        log::debug!("home directory unknown, using default config");
        return Ok(AppConfig::default());
    };
    let config_path = home.join(".vidsub").join("config.yaml");
    if !config_path.exists() {
        log::debug!("no config at {:?}, using defaults", config_path);
        return Ok(AppConfig::default());
    }
    load_config_file(&config_path)
}

pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
    serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}
