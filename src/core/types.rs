// パイプラインに関連するデータ型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 挿入が拒否された理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// mark_completed後の挿入
    AlreadyCompleted,
}

/// try_insertの結果
///
/// 挿入されなかった場合は要素を呼び出し側に返す
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub enum InsertOutcome<T> {
    Inserted,
    TimedOut(T),
    Canceled(T),
    Rejected { item: T, reason: RejectReason },
}

impl<T> InsertOutcome<T> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }

    /// 挿入されなかった要素を取り出す
    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Inserted => None,
            Self::TimedOut(item) | Self::Canceled(item) => Some(item),
            Self::Rejected { item, .. } => Some(item),
        }
    }
}

/// mark_completedの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CompletionOutcome {
    Completed,
    AlreadyCompleted,
}

/// パイプラインの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    /// 挿入を受け付けている
    Active,
    /// 完了済みでバッファに要素が残っている
    Draining,
    /// 完了済みかつ空（終端状態）
    Exhausted,
}

/// Producerが停止した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerStop {
    Finished,
    TimedOut,
    Canceled,
    Rejected,
}

impl ProducerStop {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::TimedOut => "timed_out",
            Self::Canceled => "canceled",
            Self::Rejected => "rejected",
        }
    }
}

/// 要素ごとの待機時間スケジュール
///
/// `initial_ms`から始まり要素ごとに`step_ms`ずつ増減する。負になった後は待機しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DelaySchedule {
    pub initial_ms: u64,
    pub step_ms: i64,
}

impl DelaySchedule {
    pub const fn new(initial_ms: u64, step_ms: i64) -> Self {
        Self {
            initial_ms,
            step_ms,
        }
    }

    pub const fn none() -> Self {
        Self::new(0, 0)
    }

    /// n番目（0始まり）の要素の後の待機時間
    pub fn delay_for(&self, index: usize) -> Duration {
        let offset = self.step_ms.saturating_mul(index as i64);
        let millis = (self.initial_ms as i64).saturating_add(offset);
        Duration::from_millis(millis.max(0) as u64)
    }
}

/// 1回の実行のサマリー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub capacity: usize,
    pub planned: usize,
    pub produced: usize,
    pub consumed: usize,
    pub producer_stop: ProducerStop,
    pub elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumed_items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_outcome_into_item() {
        assert_eq!(InsertOutcome::<&str>::Inserted.into_item(), None);
        assert_eq!(InsertOutcome::TimedOut("a").into_item(), Some("a"));
        assert_eq!(InsertOutcome::Canceled("b").into_item(), Some("b"));
        assert_eq!(
            InsertOutcome::Rejected {
                item: "c",
                reason: RejectReason::AlreadyCompleted
            }
            .into_item(),
            Some("c")
        );
    }

    #[test]
    fn test_delay_schedule_growing() {
        let schedule = DelaySchedule::new(10, 5);

        assert_eq!(schedule.delay_for(0), Duration::from_millis(10));
        assert_eq!(schedule.delay_for(1), Duration::from_millis(15));
        assert_eq!(schedule.delay_for(10), Duration::from_millis(60));
    }

    #[test]
    fn test_delay_schedule_shrinking_clamps_at_zero() {
        let schedule = DelaySchedule::new(100, -5);

        assert_eq!(schedule.delay_for(0), Duration::from_millis(100));
        assert_eq!(schedule.delay_for(19), Duration::from_millis(5));
        assert_eq!(schedule.delay_for(20), Duration::ZERO);
        assert_eq!(schedule.delay_for(500), Duration::ZERO);
    }

    #[test]
    fn test_run_summary_json_skips_empty_items() {
        let summary = RunSummary {
            started_at: Utc::now(),
            capacity: 5,
            planned: 50,
            produced: 50,
            consumed: 50,
            producer_stop: ProducerStop::Finished,
            elapsed_ms: 1200,
            consumed_items: Vec::new(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["producer_stop"], "finished");
        assert_eq!(json["capacity"], 5);
        assert!(json.get("consumed_items").is_none());
    }
}
