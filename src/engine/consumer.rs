// Consumer - パイプラインからの取り出しワーカー

use crate::{
    core::{DelaySchedule, ProgressReporter},
    pipeline::BoundedPipeline,
};
use anyhow::Result;
use std::fmt::Display;
use std::sync::Arc;

/// 単一Consumerワーカー
///
/// パイプラインが枯渇するまで取り出し続け、受け取った要素を順に返す
pub fn spawn_single_consumer<T, R>(
    worker_id: usize,
    pipeline: Arc<BoundedPipeline<T>>,
    delay: DelaySchedule,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<Result<Vec<T>>>
where
    T: Display + Send + 'static,
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let mut consumed = Vec::new();

        while let Some(item) = pipeline.take().await {
            reporter.report_consumed(worker_id, &item.to_string()).await;
            let pause = delay.delay_for(consumed.len());
            consumed.push(item);

            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        tracing::debug!(worker_id, consumed = consumed.len(), "consumer drained pipeline");
        Ok(consumed)
    })
}

/// Consumers: 並列ワーカープール
pub fn spawn_consumers<T, R>(
    pipeline: Arc<BoundedPipeline<T>>,
    worker_count: usize,
    delay: DelaySchedule,
    reporter: Arc<R>,
) -> Vec<tokio::task::JoinHandle<Result<Vec<T>>>>
where
    T: Display + Send + 'static,
    R: ProgressReporter + 'static,
{
    (0..worker_count)
        .map(|worker_id| {
            spawn_single_consumer(
                worker_id,
                Arc::clone(&pipeline),
                delay,
                Arc::clone(&reporter),
            )
        })
        .collect()
}
