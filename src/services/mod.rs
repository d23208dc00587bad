// サービス層 - 機能別の実装
// 設定と進捗報告をそれぞれ疎結合で提供

pub mod config;
pub mod monitoring;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{DefaultPipelineConfig, PRESET_NAMES};
pub use monitoring::{NoOpProgressReporter, TracingProgressReporter};
