//! Per-processor environment configuration.
//!
//! The AI processors themselves live outside this core (§1); each
//! HTTP-calling stand-in resolves its upstream URL from its own env var at
//! registry build time so the registry can be constructed once, with
//! `std::sync::LazyLock`, rather than threaded through every call site.

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// URLs for the four pure (non-store) processor stand-ins, plus image gen.
pub struct ServiceUrls {
    pub translate_ko_en: String,
    pub story_generate: String,
    pub scene_parse: String,
    pub prompt_generate: String,
    pub image_generate: String,
    pub translate_en_ko: String,
    pub emotion_classify: String,
}

impl ServiceUrls {
    pub fn from_env() -> Self {
        Self {
            translate_ko_en: env_or(
                "TRANSLATE_SERVICE_URL",
                "http://localhost:9001/translate/ko-en",
            ),
            story_generate: env_or("STORY_SERVICE_URL", "http://localhost:9002/story"),
            scene_parse: env_or("SCENE_PARSE_SERVICE_URL", "http://localhost:9003/scenes"),
            prompt_generate: env_or("PROMPT_SERVICE_URL", "http://localhost:9004/prompt"),
            image_generate: env_or("IMAGE_SERVICE_URL", "http://localhost:9005/image"),
            translate_en_ko: env_or(
                "TRANSLATE_BRANCH_SERVICE_URL",
                "http://localhost:9001/translate/en-ko",
            ),
            emotion_classify: env_or("EMOTION_SERVICE_URL", "http://localhost:9006/emotion"),
        }
    }
}

/// Downstream notification settings, mirroring `storypool_config::Settings`
/// but resolved independently so the registry has no compile-time
/// dependency on the config crate.
pub struct NotifySettings {
    pub base_url: String,
    pub notify_endpoint: String,
    pub service_token: String,
}

impl NotifySettings {
    pub fn from_env() -> Self {
        Self {
            base_url: env_or("BASE_URL", ""),
            notify_endpoint: env_or("NOTIFY_ENDPOINT", ""),
            service_token: env_or("SERVICE_TOKEN", ""),
        }
    }
}
