//! C6: Fan-out Planner. After the scene-parser step (order 3), splits its
//! structured output into three successor payloads with disjoint
//! projections (§4.6). All three are independent terminals; there is no
//! rendezvous in-core — convergence is implicit in the Scene Store.

use serde::{Deserialize, Serialize};
use storypool_core::Order;

use crate::error::{SchedulerError, SchedulerResult};

#[derive(Debug, Deserialize)]
struct ScenesDocument {
    #[serde(default)]
    scenes: Vec<Scene>,
}

#[derive(Debug, Clone, Deserialize)]
struct Scene {
    scene_number: i32,
    mood: serde_json::Value,
    story: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct StoryProjection {
    scene_number: i32,
    story: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct MoodProjection {
    scene_number: i32,
    mood: serde_json::Value,
}

/// One successor task produced by the plan, not yet enqueued.
pub struct PlannedSuccessor {
    pub order: Order,
    pub payload: String,
}

/// Split a scene-parse result into the image-spine, translation-branch and
/// emotion-branch payloads. `parent_order` is always 3 in production (the
/// scene-parse step), kept generic so the `parent_order + 1` /
/// `parent_order*10 + k` encoding is expressed literally rather than
/// hardcoded to 3/4/31/32.
pub fn plan_fanout(parent_order: Order, scene_parse_result: &str) -> SchedulerResult<Vec<PlannedSuccessor>> {
    let parsed: ScenesDocument = serde_json::from_str(scene_parse_result)
        .map_err(|e| SchedulerError::MalformedFanoutInput(e.to_string()))?;

    let translation_payload: Vec<StoryProjection> = parsed
        .scenes
        .iter()
        .map(|s| StoryProjection {
            scene_number: s.scene_number,
            story: s.story.clone(),
        })
        .collect();

    let emotion_payload: Vec<MoodProjection> = parsed
        .scenes
        .iter()
        .map(|s| MoodProjection {
            scene_number: s.scene_number,
            mood: s.mood.clone(),
        })
        .collect();

    Ok(vec![
        PlannedSuccessor {
            order: parent_order + 1,
            payload: scene_parse_result.to_string(),
        },
        PlannedSuccessor {
            order: parent_order * 10 + 1,
            payload: serde_json::to_string(&translation_payload)
                .map_err(|e| SchedulerError::MalformedFanoutInput(e.to_string()))?,
        },
        PlannedSuccessor {
            order: parent_order * 10 + 2,
            payload: serde_json::to_string(&emotion_payload)
                .map_err(|e| SchedulerError::MalformedFanoutInput(e.to_string()))?,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_fanout_produces_disjoint_projections_with_expected_orders() {
        let input = serde_json::json!({
            "scenes": [
                {"scene_number": 1, "mood": "calm", "story": "Emma woke up"},
                {"scene_number": 2, "mood": "peaceful", "story": "After breakfast"}
            ]
        })
        .to_string();

        let plan = plan_fanout(3, &input).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].order, 4);
        assert_eq!(plan[1].order, 31);
        assert_eq!(plan[2].order, 32);

        assert_eq!(plan[0].payload, input);

        let translation: serde_json::Value = serde_json::from_str(&plan[1].payload).unwrap();
        assert!(translation[0].get("mood").is_none());
        assert_eq!(translation[0]["story"], "Emma woke up");

        let emotion: serde_json::Value = serde_json::from_str(&plan[2].payload).unwrap();
        assert!(emotion[0].get("story").is_none());
        assert_eq!(emotion[0]["mood"], "calm");
    }

    #[test]
    fn plan_fanout_on_zero_scenes_yields_empty_projections() {
        let input = serde_json::json!({ "scenes": [] }).to_string();
        let plan = plan_fanout(3, &input).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[1].payload, "[]");
        assert_eq!(plan[2].payload, "[]");
    }

    #[test]
    fn plan_fanout_rejects_malformed_json() {
        let err = plan_fanout(3, "not json").unwrap_err();
        assert!(matches!(err, SchedulerError::MalformedFanoutInput(_)));
    }
}
