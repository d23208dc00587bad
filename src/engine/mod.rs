// エンジン層 - Producer/Consumerのオーケストレーション
// パイプライン層とサービス層を組み合わせて1回分の実行を提供

pub mod api;
pub mod consumer;
pub mod producer;
mod runner;
pub mod source;

// 公開API - 主要エンジンクラス
pub use api::{create_default_runner, create_quiet_runner, run_sentences_with_runner};
pub use producer::ProducerReport;
pub use runner::PipelineRunner;
pub use source::{SentenceSource, SENTENCES};
