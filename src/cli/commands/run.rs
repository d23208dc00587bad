use crate::cli::RunArgs;
use crate::core::{PipelineConfig, RunSummary};
use crate::engine::{run_sentences_with_runner, PipelineRunner, SentenceSource};
use crate::pipeline::CancellationSource;
use crate::services::{DefaultPipelineConfig, TracingProgressReporter};
use anyhow::{Context, Result};
use std::time::Duration;

/// 引数から設定を組み立てる
///
/// 優先順位: コマンドライン引数 > 設定ファイル > プリセット
pub fn build_config(args: &RunArgs) -> Result<DefaultPipelineConfig> {
    let mut config = match (&args.config, &args.preset) {
        (Some(path), _) => DefaultPipelineConfig::from_json_file(path)?,
        (None, Some(preset)) => DefaultPipelineConfig::preset(preset)?,
        // 要素数だけ指定された場合は容量を要素数から決める
        (None, None) => match args.items {
            Some(items) => DefaultPipelineConfig::new(items),
            None => DefaultPipelineConfig::default(),
        },
    };

    if let Some(capacity) = args.capacity {
        config = config.with_capacity(capacity);
    }
    if let Some(items) = args.items {
        config = config.with_item_count(items);
    }
    if args.no_timeout {
        config = config.with_insert_timeout(None);
    } else if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_insert_timeout(Some(Duration::from_millis(timeout_ms)));
    }
    if args.no_cancel {
        config = config.with_cancel_after(None);
    } else if let Some(cancel_after_ms) = args.cancel_after_ms {
        config = config.with_cancel_after(Some(Duration::from_millis(cancel_after_ms)));
    }
    if let Some(consumers) = args.consumers {
        config = config.with_consumer_count(consumers);
    }

    config.validate()?;
    Ok(config)
}

/// runコマンドの実行
pub async fn execute_run(args: RunArgs) -> Result<RunSummary> {
    let config = build_config(&args)?;
    tracing::info!(
        capacity = config.capacity(),
        items = config.item_count(),
        timeout = ?config.insert_timeout(),
        cancel_after = ?config.cancel_after(),
        consumers = config.consumer_count(),
        "configuration loaded"
    );

    // Ctrl+Cでもキャンセルを発火する
    let cancellation = CancellationSource::new();
    let ctrl_c = {
        let cancellation = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling producer");
                cancellation.cancel();
            }
        })
    };

    let reporter = if args.json {
        TracingProgressReporter::quiet()
    } else {
        TracingProgressReporter::new()
    };
    let runner = PipelineRunner::new(config, reporter)
        .with_cancellation(cancellation)
        .with_item_capture(args.json);

    let source = if args.deterministic {
        SentenceSource::RoundRobin
    } else {
        SentenceSource::Random
    };

    let result = run_sentences_with_runner(&runner, source)
        .await
        .context("パイプライン実行に失敗しました");
    ctrl_c.abort();
    let summary = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!("📊 実行結果:");
    println!("   - 容量: {}", summary.capacity);
    println!("   - 生成予定数: {}", summary.planned);
    println!("   - 生成数: {}", summary.produced);
    println!("   - 消費数: {}", summary.consumed);
    println!("   - Producer停止理由: {}", summary.producer_stop.as_str());
    println!("   - 実行時間: {}ms", summary.elapsed_ms);
}
