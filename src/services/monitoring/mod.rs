// 進捗監視機能
// 生成・消費・停止・完了の報告

pub mod implementations;
#[cfg(test)]
pub mod test_mocks;

// 公開API
pub use implementations::{NoOpProgressReporter, TracingProgressReporter};
