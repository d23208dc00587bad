// 設定管理の具象実装

use crate::core::{DelaySchedule, PipelineConfig, PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 利用可能なプリセット名
pub const PRESET_NAMES: [&str; 3] = ["default", "testing", "stress"];

/// デフォルト設定実装
///
/// JSONファイルから読み込む場合、省略したフィールドはデフォルト値になる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultPipelineConfig {
    capacity: usize,
    item_count: usize,
    insert_timeout_ms: Option<u64>,
    cancel_after_ms: Option<u64>,
    consumer_count: usize,
    producer_delay: DelaySchedule,
    consumer_delay: DelaySchedule,
}

impl DefaultPipelineConfig {
    /// 要素数から容量（要素数の1/10、最低1）を決めた設定を作成
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            capacity: (item_count / 10).max(1),
            ..Self::default()
        }
    }

    /// 名前からプリセットを作成
    pub fn preset(name: &str) -> PipelineResult<Self> {
        match name {
            "default" => Ok(Self::default()),
            "testing" => Ok(Self {
                capacity: 2,
                item_count: 20,
                insert_timeout_ms: Some(500),
                cancel_after_ms: None,
                consumer_count: 1,
                producer_delay: DelaySchedule::none(),
                consumer_delay: DelaySchedule::none(),
            }),
            "stress" => Ok(Self {
                capacity: 1,
                item_count: 10_000,
                insert_timeout_ms: Some(5_000),
                cancel_after_ms: None,
                consumer_count: num_cpus::get().max(1),
                producer_delay: DelaySchedule::none(),
                consumer_delay: DelaySchedule::none(),
            }),
            _ => Err(PipelineError::configuration(format!(
                "未サポートのプリセット: {name}. 利用可能: {}",
                PRESET_NAMES.join(", ")
            ))),
        }
    }

    /// プリセットの説明
    pub fn preset_description(name: &str) -> Option<&'static str> {
        match name {
            "default" => Some("50要素、容量5、挿入タイムアウト2秒、10秒後にキャンセル"),
            "testing" => Some("待機なしの小規模構成（テスト用）"),
            "stress" => Some("容量1に1万要素、ConsumerはCPU数"),
            _ => None,
        }
    }

    /// JSONファイルから設定を読み込む
    pub fn from_json_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::config_file(path, e.into()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PipelineError::config_file(path, e.into()))?;
        config.validate()?;
        Ok(config)
    }

    /// 設定値の妥当性を検証
    pub fn validate(&self) -> PipelineResult<()> {
        if self.capacity == 0 {
            return Err(PipelineError::validation(
                "capacity",
                "1以上である必要があります",
            ));
        }
        if self.consumer_count == 0 {
            return Err(PipelineError::validation(
                "consumer_count",
                "1以上である必要があります",
            ));
        }
        Ok(())
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_insert_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.insert_timeout_ms = timeout.map(duration_to_millis);
        self
    }

    pub fn with_cancel_after(mut self, delay: Option<Duration>) -> Self {
        self.cancel_after_ms = delay.map(duration_to_millis);
        self
    }

    pub fn with_consumer_count(mut self, consumer_count: usize) -> Self {
        self.consumer_count = consumer_count;
        self
    }

    pub fn with_producer_delay(mut self, schedule: DelaySchedule) -> Self {
        self.producer_delay = schedule;
        self
    }

    pub fn with_consumer_delay(mut self, schedule: DelaySchedule) -> Self {
        self.consumer_delay = schedule;
        self
    }
}

/// ミリ秒に変換する。u64に収まらない場合は最大値に丸める
fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            item_count: 50,
            insert_timeout_ms: Some(2_000),
            cancel_after_ms: Some(10_000),
            consumer_count: 1,
            producer_delay: DelaySchedule::new(10, 5),
            consumer_delay: DelaySchedule::new(100, -5),
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn insert_timeout(&self) -> Option<Duration> {
        self.insert_timeout_ms.map(Duration::from_millis)
    }

    fn cancel_after(&self) -> Option<Duration> {
        self.cancel_after_ms.map(Duration::from_millis)
    }

    fn consumer_count(&self) -> usize {
        self.consumer_count
    }

    fn producer_delay(&self) -> DelaySchedule {
        self.producer_delay
    }

    fn consumer_delay(&self) -> DelaySchedule {
        self.consumer_delay
    }
}
