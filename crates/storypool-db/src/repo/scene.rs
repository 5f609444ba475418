//! Scene Store (C2, §4.2): per-(pipeline, scene) upserts over the
//! `pipeline_result` table.

use async_trait::async_trait;
use sqlx::PgPool;

use storypool_core::{PipelineId, SceneResult};

use crate::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct SceneRow {
    scene_number: i32,
    mood: Option<String>,
    scene_story: Option<String>,
    scene_image_url: Option<String>,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<SceneRow> for SceneResult {
    fn from(row: SceneRow) -> Self {
        SceneResult {
            scene_number: row.scene_number,
            mood: row.mood,
            scene_story: row.scene_story,
            scene_image_url: row.scene_image_url,
            created_at: row.created_at,
        }
    }
}

/// Postgres implementation of the Scene Store.
pub struct PgSceneStore {
    pool: PgPool,
}

impl PgSceneStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn put_story_raw(
        &self,
        pipeline_id: &PipelineId,
        scene_number: i32,
        text: &str,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pipeline_result (pipeline_id, scene_number, scene_story, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (pipeline_id, scene_number)
            DO UPDATE SET scene_story = excluded.scene_story
            "#,
        )
        .bind(pipeline_id.as_str())
        .bind(scene_number)
        .bind(text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn put_mood_raw(
        &self,
        pipeline_id: &PipelineId,
        scene_number: i32,
        mood: &str,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pipeline_result (pipeline_id, scene_number, mood, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (pipeline_id, scene_number)
            DO UPDATE SET mood = excluded.mood
            "#,
        )
        .bind(pipeline_id.as_str())
        .bind(scene_number)
        .bind(mood)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn put_image_url_raw(
        &self,
        pipeline_id: &PipelineId,
        scene_number: i32,
        url: &str,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pipeline_result (pipeline_id, scene_number, scene_image_url, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (pipeline_id, scene_number)
            DO UPDATE SET scene_image_url = excluded.scene_image_url
            "#,
        )
        .bind(pipeline_id.as_str())
        .bind(scene_number)
        .bind(url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_scenes_raw(&self, pipeline_id: &PipelineId) -> DbResult<Vec<SceneResult>> {
        let rows = sqlx::query_as::<_, SceneRow>(
            r#"
            SELECT scene_number, mood, scene_story, scene_image_url, created_at
            FROM pipeline_result
            WHERE pipeline_id = $1
            ORDER BY scene_number ASC
            "#,
        )
        .bind(pipeline_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SceneResult::from).collect())
    }
}

#[async_trait]
impl storypool_core::SceneStore for PgSceneStore {
    async fn put_story(
        &self,
        pipeline_id: &PipelineId,
        scene_number: i32,
        text: &str,
    ) -> storypool_core::Result<()> {
        self.put_story_raw(pipeline_id, scene_number, text)
            .await
            .map_err(Into::into)
    }

    async fn put_mood(
        &self,
        pipeline_id: &PipelineId,
        scene_number: i32,
        mood: &str,
    ) -> storypool_core::Result<()> {
        self.put_mood_raw(pipeline_id, scene_number, mood)
            .await
            .map_err(Into::into)
    }

    async fn put_image_url(
        &self,
        pipeline_id: &PipelineId,
        scene_number: i32,
        url: &str,
    ) -> storypool_core::Result<()> {
        self.put_image_url_raw(pipeline_id, scene_number, url)
            .await
            .map_err(Into::into)
    }

    async fn list_scenes(
        &self,
        pipeline_id: &PipelineId,
    ) -> storypool_core::Result<Vec<SceneResult>> {
        self.list_scenes_raw(pipeline_id).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_row_converts_preserving_nulls() {
        let row = SceneRow {
            scene_number: 3,
            mood: None,
            scene_story: Some("once upon a time".to_string()),
            scene_image_url: None,
            created_at: None,
        };
        let result: SceneResult = row.into();
        assert_eq!(result.scene_number, 3);
        assert!(result.mood.is_none());
        assert_eq!(result.scene_story.as_deref(), Some("once upon a time"));
    }
}
