// PipelineRunner - Producer/Consumer/キャンセルタイマーのオーケストレーション

use super::{
    consumer::spawn_consumers,
    producer::{spawn_producer, ProducerReport},
};
use crate::{
    core::{PipelineConfig, PipelineError, PipelineResult, ProgressReporter, RunSummary},
    pipeline::{BoundedPipeline, CancellationSource},
};
use chrono::Utc;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// 1回分のパイプライン実行を組み立てて実行する
///
/// 実行ごとに新しい`BoundedPipeline`を作成する（パイプラインは再利用できない）
pub struct PipelineRunner<C, R> {
    config: C,
    reporter: Arc<R>,
    cancellation: Option<CancellationSource>,
    capture_items: bool,
}

impl<C, R> PipelineRunner<C, R>
where
    C: PipelineConfig,
    R: ProgressReporter + 'static,
{
    pub fn new(config: C, reporter: R) -> Self {
        Self {
            config,
            reporter: Arc::new(reporter),
            cancellation: None,
            capture_items: false,
        }
    }

    /// 外部から発火できるキャンセルソースを監視する
    ///
    /// 外部ソースの発火は実行に伝わるが、実行側のタイマーや失敗が外部ソースを発火させることはない
    pub fn with_cancellation(mut self, source: CancellationSource) -> Self {
        self.cancellation = Some(source);
        self
    }

    /// 消費した要素をサマリーに含める
    pub fn with_item_capture(mut self, capture: bool) -> Self {
        self.capture_items = capture;
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 要素リストをパイプラインに流す
    pub async fn run<T>(&self, items: Vec<T>) -> PipelineResult<RunSummary>
    where
        T: Display + Send + 'static,
    {
        let started_at = Utc::now();
        let start = Instant::now();

        let capacity = self.config.capacity();
        let consumer_count = self.config.consumer_count();
        if consumer_count == 0 {
            return Err(PipelineError::validation(
                "consumer_count",
                "1以上である必要があります",
            ));
        }

        let pipeline = Arc::new(BoundedPipeline::new(capacity)?);

        // 実行ごとのソース。外部ソースの発火は伝えるが、こちらからは外部へ伝えない
        let source = CancellationSource::new();
        let mut background = Vec::new();
        if let Some(external) = &self.cancellation {
            background.push(source.cancel_when(&external.signal()));
        }
        if let Some(delay) = self.config.cancel_after() {
            background.push(source.cancel_after(delay));
        }

        let planned = items.len();
        self.reporter.report_started(capacity, planned).await;

        // Producer起動
        let producer_handle = spawn_producer(
            items,
            Arc::clone(&pipeline),
            self.config.insert_timeout(),
            self.config.producer_delay(),
            source.signal(),
            Arc::clone(&self.reporter),
        );

        // Consumer Pool起動
        let consumer_handles = spawn_consumers(
            Arc::clone(&pipeline),
            consumer_count,
            self.config.consumer_delay(),
            Arc::clone(&self.reporter),
        );

        let joined = join_tasks(
            producer_handle,
            consumer_handles,
            &source,
            self.capture_items,
        )
        .await;

        // 成否にかかわらずタイマーと中継タスクを止める
        for task in background {
            task.abort();
        }

        let (report, consumed, consumed_items) = joined?;
        assert!(pipeline.is_exhausted(), "pipeline must be exhausted after run");

        let summary = RunSummary {
            started_at,
            capacity,
            planned,
            produced: report.produced,
            consumed,
            producer_stop: report.stop,
            elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            consumed_items,
        };
        self.reporter.report_completed(&summary).await;

        Ok(summary)
    }
}

/// ProducerとConsumerの終了を待ち、結果を集計する
///
/// 全タスクを必ず待機してから最初のエラーを返す
async fn join_tasks<T>(
    producer_handle: JoinHandle<anyhow::Result<ProducerReport>>,
    consumer_handles: Vec<JoinHandle<anyhow::Result<Vec<T>>>>,
    source: &CancellationSource,
    capture_items: bool,
) -> PipelineResult<(ProducerReport, usize, Vec<String>)>
where
    T: Display,
{
    let mut first_error = None;
    let mut consumed_items = Vec::new();
    let mut consumed = 0;

    // Producerは失敗しても完了をマークするので、Consumerは枯渇で終了する
    for handle in consumer_handles {
        let result = match handle.await {
            Ok(result) => result.map_err(PipelineError::internal),
            Err(err) => Err(PipelineError::from(err)),
        };
        match result {
            Ok(items) => {
                consumed += items.len();
                if capture_items {
                    consumed_items.extend(items.iter().map(ToString::to_string));
                }
            }
            Err(err) => {
                // 取り出し手が減ったので、満杯待ちのProducerを止める
                tracing::error!(error = %err, "consumer task failed");
                source.cancel();
                first_error.get_or_insert(err);
            }
        }
    }

    let producer_result = match producer_handle.await {
        Ok(result) => result.map_err(PipelineError::internal),
        Err(err) => {
            tracing::error!(error = %err, "producer task failed");
            Err(PipelineError::from(err))
        }
    };

    if let Some(err) = first_error {
        return Err(err);
    }
    let report = producer_result?;
    Ok((report, consumed, consumed_items))
}
