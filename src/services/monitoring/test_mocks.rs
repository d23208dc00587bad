// テスト用の進捗報告実装
// 指定したイベントでパニックし、タスク失敗時の挙動を確認する

use crate::core::{ProducerStop, ProgressReporter, RunSummary};
use async_trait::async_trait;

/// パニックさせるイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicPoint {
    Produced,
    Consumed,
}

pub struct PanickingProgressReporter {
    panic_on: PanicPoint,
}

impl PanickingProgressReporter {
    pub fn new(panic_on: PanicPoint) -> Self {
        Self { panic_on }
    }
}

#[async_trait]
impl ProgressReporter for PanickingProgressReporter {
    async fn report_started(&self, _capacity: usize, _planned: usize) {}

    async fn report_produced(&self, index: usize, _item: &str) {
        if self.panic_on == PanicPoint::Produced {
            panic!("reporter failed on produced item {index}");
        }
    }

    async fn report_consumed(&self, worker_id: usize, _item: &str) {
        if self.panic_on == PanicPoint::Consumed {
            panic!("reporter failed on worker {worker_id}");
        }
    }

    async fn report_producer_stopped(&self, _stop: ProducerStop, _produced: usize) {}

    async fn report_completed(&self, _summary: &RunSummary) {}
}
