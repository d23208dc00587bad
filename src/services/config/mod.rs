// 設定管理
// ビルダー、プリセット、JSONファイル読み込み

pub mod implementations;

// 公開API
pub use implementations::{DefaultPipelineConfig, PRESET_NAMES};
