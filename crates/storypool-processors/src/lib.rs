//! Processor Registry (C4) and HTTP-calling stand-ins for the pipeline's
//! AI processors (translation, story generation, scene parsing, prompt
//! generation, emotion classification, image synthesis) and the Terminal
//! Notifier (C7). The processors themselves — the ML inference — are out
//! of scope; this crate supplies the narrow `Processor` boundary the Step
//! Executor dispatches through and thin HTTP clients behind it.

pub mod config;
pub mod emotion;
pub mod error;
pub mod http;
pub mod image;
pub mod notify;
pub mod prompt;
pub mod registry;
pub mod scene_parse;
pub mod story;
pub mod translate;
pub mod translate_branch;

pub use config::{NotifySettings, ServiceUrls};
pub use emotion::EmotionBranch;
pub use error::{ProcessorError, ProcessorResult};
pub use image::ImageGenerate;
pub use notify::TerminalNotify;
pub use prompt::PromptGenerate;
pub use registry::{ProcessorEntry, registry};
pub use scene_parse::SceneParse;
pub use story::StoryGenerate;
pub use translate::TranslateKoEn;
pub use translate_branch::TranslateBranch;
