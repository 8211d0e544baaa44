use std::env;
use std::time::Duration;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GOOGLE_MAPS_BASE: &str = "https://maps.googleapis.com";
const DEFAULT_GEOAPIFY_API_BASE: &str = "https://api.geoapify.com";
const DEFAULT_GEOAPIFY_MAPS_BASE: &str = "https://maps.geoapify.com";
const DEFAULT_COOLDOWN_MS: u64 = 2000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the five narrative sections are requested from the generation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// One call returning a JSON object with all five sections.
    Combined,
    /// Five sequential plain-text calls, one per section.
    Sections,
}

impl GenerationMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "combined" | "single" => Some(GenerationMode::Combined),
            "sections" | "per-section" | "five" => Some(GenerationMode::Sections),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Combined => "combined",
            GenerationMode::Sections => "sections",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub mode: GenerationMode,
    pub cooldown: Duration,
}

#[derive(Debug, Clone)]
pub struct MapsConfig {
    pub google_maps_api_key: Option<String>,
    pub geoapify_api_key: Option<String>,
    pub google_maps_base: String,
    pub geoapify_api_base: String,
    pub geoapify_maps_base: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub maps: MapsConfig,
    pub outbound_timeout: Duration,
    pub mock_mode: bool,
    pub ping_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                mode: GenerationMode::Combined,
                cooldown: Duration::from_millis(DEFAULT_COOLDOWN_MS),
            },
            maps: MapsConfig {
                google_maps_api_key: None,
                geoapify_api_key: None,
                google_maps_base: DEFAULT_GOOGLE_MAPS_BASE.to_string(),
                geoapify_api_base: DEFAULT_GEOAPIFY_API_BASE.to_string(),
                geoapify_maps_base: DEFAULT_GEOAPIFY_MAPS_BASE.to_string(),
            },
            outbound_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            mock_mode: false,
            ping_message: "ping".to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mode = match env::var("GENERATION_MODE") {
            Ok(raw) => GenerationMode::parse(&raw).unwrap_or_else(|| {
                log::warn!("Unknown GENERATION_MODE '{}', using combined", raw);
                GenerationMode::Combined
            }),
            Err(_) => defaults.generation.mode,
        };

        Self {
            generation: GenerationConfig {
                api_key: non_empty_var("GEMINI_API_KEY"),
                model: non_empty_var("GEMINI_MODEL").unwrap_or(defaults.generation.model),
                api_base: non_empty_var("GEMINI_API_BASE").unwrap_or(defaults.generation.api_base),
                mode,
                cooldown: env::var("GENERATION_COOLDOWN_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.generation.cooldown),
            },
            maps: MapsConfig {
                google_maps_api_key: non_empty_var("GOOGLE_MAPS_API_KEY"),
                geoapify_api_key: non_empty_var("GEOAPIFY_API_KEY"),
                ..defaults.maps
            },
            outbound_timeout: env::var("OUTBOUND_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.outbound_timeout),
            mock_mode: env::var("USE_MOCK_MODE")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            ping_message: env::var("PING_MESSAGE").unwrap_or(defaults.ping_message),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Mask a credential for display, keeping a few characters at each end
pub fn mask_secret(secret: &str) -> String {
    if secret.len() > 8 && secret.is_ascii() {
        format!("{}***{}", &secret[0..4], &secret[secret.len() - 4..])
    } else {
        "***".to_string()
    }
}
