//! C4: Processor Registry — a fixed, immutable-after-startup table mapping
//! a step's `order` to the processor that handles it, plus that
//! processor's declared capabilities (§4.4, §9 "Global state").

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use storypool_core::{Order, Processor};

use crate::config::{NotifySettings, ServiceUrls};
use crate::emotion::EmotionBranch;
use crate::image::ImageGenerate;
use crate::notify::TerminalNotify;
use crate::prompt::PromptGenerate;
use crate::scene_parse::SceneParse;
use crate::story::StoryGenerate;
use crate::translate::TranslateKoEn;
use crate::translate_branch::TranslateBranch;

/// One row of the Processor Registry.
pub struct ProcessorEntry {
    pub needs_store: bool,
    pub is_terminal: bool,
    pub processor: Arc<dyn Processor>,
}

impl ProcessorEntry {
    fn new(processor: impl Processor + 'static) -> Self {
        Self {
            needs_store: processor.needs_store(),
            is_terminal: processor.is_terminal(),
            processor: Arc::new(processor),
        }
    }
}

static REGISTRY: LazyLock<HashMap<Order, ProcessorEntry>> = LazyLock::new(|| {
    let client = reqwest::Client::new();
    let urls = ServiceUrls::from_env();
    let notify = NotifySettings::from_env();

    let mut table: HashMap<Order, ProcessorEntry> = HashMap::new();
    table.insert(
        1,
        ProcessorEntry::new(TranslateKoEn::new(client.clone(), urls.translate_ko_en)),
    );
    table.insert(
        2,
        ProcessorEntry::new(StoryGenerate::new(client.clone(), urls.story_generate)),
    );
    table.insert(
        3,
        ProcessorEntry::new(SceneParse::new(client.clone(), urls.scene_parse)),
    );
    table.insert(
        4,
        ProcessorEntry::new(PromptGenerate::new(client.clone(), urls.prompt_generate)),
    );
    table.insert(
        5,
        ProcessorEntry::new(ImageGenerate::new(client.clone(), urls.image_generate)),
    );
    table.insert(
        31,
        ProcessorEntry::new(TranslateBranch::new(client.clone(), urls.translate_en_ko)),
    );
    table.insert(
        32,
        ProcessorEntry::new(EmotionBranch::new(client.clone(), urls.emotion_classify)),
    );
    table.insert(
        6,
        ProcessorEntry::new(TerminalNotify::new(
            notify.base_url,
            notify.notify_endpoint,
            notify.service_token,
        )),
    );
    table
});

/// The Processor Registry. Built once, on first access.
pub fn registry() -> &'static HashMap<Order, ProcessorEntry> {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_canonical_order() {
        let reg = registry();
        for order in [1, 2, 3, 4, 5, 31, 32, 6] {
            assert!(reg.contains_key(&order), "missing processor for order {order}");
        }
    }

    #[test]
    fn only_image_and_branch_and_terminal_orders_need_a_store() {
        let reg = registry();
        for order in [1, 2, 3, 4] {
            let entry = &reg[&order];
            assert!(!entry.needs_store);
            assert!(!entry.is_terminal);
        }
        for order in [5, 31, 32, 6] {
            let entry = &reg[&order];
            assert!(entry.needs_store);
        }
    }

    #[test]
    fn only_the_branch_endpoints_and_notifier_are_terminal() {
        let reg = registry();
        assert!(!reg[&5].is_terminal, "image step must enqueue the notifier as its successor");
        for order in [31, 32, 6] {
            assert!(reg[&order].is_terminal);
        }
    }
}
