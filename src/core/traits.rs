// パイプライン実行のトレイト定義
// 設定と進捗報告の抽象化インターフェース

use super::types::{DelaySchedule, ProducerStop, RunSummary};
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// パイプライン実行の設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// バッファ容量を取得
    fn capacity(&self) -> usize;

    /// Producerが生成する要素数を取得
    fn item_count(&self) -> usize;

    /// 1回の挿入のタイムアウト（Noneは無制限）
    fn insert_timeout(&self) -> Option<Duration>;

    /// 指定時間後にキャンセルを発火する（Noneはキャンセルしない）
    fn cancel_after(&self) -> Option<Duration>;

    /// Consumerワーカー数を取得
    fn consumer_count(&self) -> usize;

    /// Producerの挿入後の待機スケジュール
    fn producer_delay(&self) -> DelaySchedule;

    /// Consumerの取り出し後の待機スケジュール
    fn consumer_delay(&self) -> DelaySchedule;
}

// PipelineConfig for Box<dyn PipelineConfig>
impl PipelineConfig for Box<dyn PipelineConfig> {
    fn capacity(&self) -> usize {
        self.as_ref().capacity()
    }

    fn item_count(&self) -> usize {
        self.as_ref().item_count()
    }

    fn insert_timeout(&self) -> Option<Duration> {
        self.as_ref().insert_timeout()
    }

    fn cancel_after(&self) -> Option<Duration> {
        self.as_ref().cancel_after()
    }

    fn consumer_count(&self) -> usize {
        self.as_ref().consumer_count()
    }

    fn producer_delay(&self) -> DelaySchedule {
        self.as_ref().producer_delay()
    }

    fn consumer_delay(&self) -> DelaySchedule {
        self.as_ref().consumer_delay()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 実行開始時の報告
    async fn report_started(&self, capacity: usize, planned: usize);

    /// 要素がパイプラインに受け付けられた時の報告
    async fn report_produced(&self, index: usize, item: &str);

    /// 要素がConsumerに取り出された時の報告
    async fn report_consumed(&self, worker_id: usize, item: &str);

    /// Producer停止時の報告
    async fn report_producer_stopped(&self, stop: ProducerStop, produced: usize);

    /// 実行完了時の報告
    async fn report_completed(&self, summary: &RunSummary);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, capacity: usize, planned: usize) {
        self.as_ref().report_started(capacity, planned).await
    }

    async fn report_produced(&self, index: usize, item: &str) {
        self.as_ref().report_produced(index, item).await
    }

    async fn report_consumed(&self, worker_id: usize, item: &str) {
        self.as_ref().report_consumed(worker_id, item).await
    }

    async fn report_producer_stopped(&self, stop: ProducerStop, produced: usize) {
        self.as_ref().report_producer_stopped(stop, produced).await
    }

    async fn report_completed(&self, summary: &RunSummary) {
        self.as_ref().report_completed(summary).await
    }
}
