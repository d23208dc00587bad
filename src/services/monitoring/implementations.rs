// 進捗監視の具象実装

use crate::core::{ProducerStop, ProgressReporter, RunSummary};
use async_trait::async_trait;

/// tracingイベントによる進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct TracingProgressReporter {
    quiet: bool,
}

impl TracingProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 要素単位のイベントを出さず、開始・停止・完了のみ報告する
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[async_trait]
impl ProgressReporter for TracingProgressReporter {
    async fn report_started(&self, capacity: usize, planned: usize) {
        tracing::info!(capacity, planned, "pipeline run started");
    }

    async fn report_produced(&self, index: usize, item: &str) {
        if !self.quiet {
            tracing::info!(index, item, "produced");
        }
    }

    async fn report_consumed(&self, worker_id: usize, item: &str) {
        if !self.quiet {
            tracing::info!(worker_id, item, "consumed");
        }
    }

    async fn report_producer_stopped(&self, stop: ProducerStop, produced: usize) {
        match stop {
            ProducerStop::Finished => {
                tracing::info!(produced, "producer finished");
            }
            ProducerStop::TimedOut => {
                tracing::warn!(produced, "producer gave up: insert timed out");
            }
            ProducerStop::Canceled => {
                tracing::warn!(produced, "producer stopped: operation canceled");
            }
            ProducerStop::Rejected => {
                tracing::warn!(produced, "producer stopped: pipeline already completed");
            }
        }
    }

    async fn report_completed(&self, summary: &RunSummary) {
        tracing::info!(
            produced = summary.produced,
            consumed = summary.consumed,
            stop = summary.producer_stop.as_str(),
            elapsed_ms = summary.elapsed_ms,
            "pipeline run completed"
        );
    }
}

/// 何もしない進捗報告実装（テスト用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _capacity: usize, _planned: usize) {
        // 何もしない
    }

    async fn report_produced(&self, _index: usize, _item: &str) {
        // 何もしない
    }

    async fn report_consumed(&self, _worker_id: usize, _item: &str) {
        // 何もしない
    }

    async fn report_producer_stopped(&self, _stop: ProducerStop, _produced: usize) {
        // 何もしない
    }

    async fn report_completed(&self, _summary: &RunSummary) {
        // 何もしない
    }
}
