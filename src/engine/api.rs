// 高レベル公開API
// PipelineRunnerを簡単に使用できるようにするための便利な関数

use super::{source::SentenceSource, PipelineRunner};
use crate::{
    core::{PipelineConfig, PipelineResult, ProgressReporter, RunSummary},
    services::{DefaultPipelineConfig, NoOpProgressReporter, TracingProgressReporter},
};

/// 設定済みRunnerで文章を生成して流す
///
/// 生成数は`PipelineConfig::item_count`に従う
pub async fn run_sentences_with_runner<C, R>(
    runner: &PipelineRunner<C, R>,
    source: SentenceSource,
) -> PipelineResult<RunSummary>
where
    C: PipelineConfig,
    R: ProgressReporter + 'static,
{
    let sentences = source.generate(runner.config().item_count());
    runner.run(sentences).await
}

/// デフォルト設定とtracing出力のRunnerを作成
pub fn create_default_runner() -> PipelineRunner<DefaultPipelineConfig, TracingProgressReporter> {
    PipelineRunner::new(DefaultPipelineConfig::default(), TracingProgressReporter::new())
}

/// 報告を出さないRunnerを作成（テスト・バックグラウンド用）
pub fn create_quiet_runner(
    config: DefaultPipelineConfig,
) -> PipelineRunner<DefaultPipelineConfig, NoOpProgressReporter> {
    PipelineRunner::new(config, NoOpProgressReporter::new())
}
