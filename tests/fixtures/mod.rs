// テストユーティリティ
// 呼び出しを記録する進捗報告実装と共通ヘルパー

#![allow(dead_code)]

use async_trait::async_trait;
use bounded_pipeline::core::{ProducerStop, ProgressReporter, RunSummary};
use std::sync::{Arc, Mutex};

/// 全ての報告を記録する進捗報告実装
#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub produced: Arc<Mutex<Vec<String>>>,
    pub consumed: Arc<Mutex<Vec<(usize, String)>>>,
    pub stopped: Arc<Mutex<Option<(ProducerStop, usize)>>>,
    pub completed: Arc<Mutex<Option<RunSummary>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn produced(&self) -> Vec<String> {
        self.produced.lock().unwrap().clone()
    }

    pub fn consumed_items(&self) -> Vec<String> {
        self.consumed
            .lock()
            .unwrap()
            .iter()
            .map(|(_, item)| item.clone())
            .collect()
    }

    pub fn stopped(&self) -> Option<(ProducerStop, usize)> {
        *self.stopped.lock().unwrap()
    }

    pub fn completed(&self) -> Option<RunSummary> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressReporter for RecordingReporter {
    async fn report_started(&self, _capacity: usize, _planned: usize) {}

    async fn report_produced(&self, _index: usize, item: &str) {
        self.produced.lock().unwrap().push(item.to_string());
    }

    async fn report_consumed(&self, worker_id: usize, item: &str) {
        self.consumed
            .lock()
            .unwrap()
            .push((worker_id, item.to_string()));
    }

    async fn report_producer_stopped(&self, stop: ProducerStop, produced: usize) {
        *self.stopped.lock().unwrap() = Some((stop, produced));
    }

    async fn report_completed(&self, summary: &RunSummary) {
        *self.completed.lock().unwrap() = Some(summary.clone());
    }
}

/// "item-000"形式の連番要素
pub fn numbered_items(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item-{i:03}")).collect()
}
