//! C9: Worker Loop binary. Spawns `WORKER_CONCURRENCY` independent worker
//! loops sharing one Task Store connection, one Scene Store pool and one
//! Object Store client (§5 "Scheduling model").

use std::sync::Arc;

use storypool_config::Settings;
use storypool_core::{StoreHandles, TaskStore};
use storypool_db::{PgSceneStore, create_pool, run_migrations};
use storypool_objstore::S3ObjectStore;
use storypool_queue::RedisTaskStore;
use storypool_scheduler::{StepExecutor, WorkerLoop};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;

    info!("connecting to task store...");
    let task_store: Arc<dyn TaskStore> =
        Arc::new(RedisTaskStore::connect(&settings.redis_url).await?);
    info!("task store connected");

    info!("connecting to scene store...");
    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;
    let scene_store = Arc::new(PgSceneStore::new(pool));
    info!("scene store connected");

    let object_store = Arc::new(
        S3ObjectStore::from_static_credentials(
            settings.aws_s3_region.clone(),
            settings.aws_s3_bucket_name.clone(),
            &settings.aws_s3_access_key,
            &settings.aws_s3_secret_key,
        )
        .await,
    );

    let store = StoreHandles {
        scene_store,
        object_store,
    };

    let step_executor = Arc::new(StepExecutor::new(
        task_store.clone(),
        store,
        storypool_processors::registry(),
    ));

    info!(
        concurrency = settings.worker_concurrency,
        "starting worker loops"
    );

    let mut handles = Vec::with_capacity(settings.worker_concurrency);
    for n in 0..settings.worker_concurrency {
        let worker = WorkerLoop::new(format!("worker-{n}"), task_store.clone(), step_executor.clone());
        handles.push(tokio::spawn(async move { worker.run().await }));
    }

    for handle in handles {
        handle.await?;
    }

    Ok(())
}
