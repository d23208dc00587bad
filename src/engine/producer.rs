// Producer - パイプラインへの要素供給

use crate::{
    core::{CompletionOutcome, DelaySchedule, InsertOutcome, ProducerStop, ProgressReporter},
    pipeline::{BoundedPipeline, CancellationSignal},
};
use anyhow::Result;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// Producerの実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerReport {
    pub produced: usize,
    pub stop: ProducerStop,
}

/// スコープを抜けるときに完了をマークする
///
/// Producerがパニックで終了しても、Consumerが枯渇を観測できるようにする
struct CompletionGuard<T> {
    pipeline: Arc<BoundedPipeline<T>>,
}

impl<T> Drop for CompletionGuard<T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            tracing::error!("producer panicked; marking pipeline completed");
        }
        if self.pipeline.mark_completed() == CompletionOutcome::AlreadyCompleted {
            tracing::warn!("pipeline was completed by someone other than the producer");
        }
    }
}

/// Producer: 要素を順に挿入し、最後に必ず完了をマークする
///
/// タイムアウト・キャンセル・拒否のいずれかで挿入に失敗した時点で停止する
pub fn spawn_producer<T, R>(
    items: Vec<T>,
    pipeline: Arc<BoundedPipeline<T>>,
    insert_timeout: Option<Duration>,
    delay: DelaySchedule,
    signal: CancellationSignal,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<Result<ProducerReport>>
where
    T: Display + Send + 'static,
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let completion = CompletionGuard {
            pipeline: Arc::clone(&pipeline),
        };
        let mut produced = 0;
        let mut stop = ProducerStop::Finished;

        for (index, item) in items.into_iter().enumerate() {
            let label = item.to_string();
            match pipeline.try_insert(item, insert_timeout, &signal).await {
                InsertOutcome::Inserted => {
                    produced += 1;
                    reporter.report_produced(index, &label).await;
                }
                InsertOutcome::TimedOut(_) => {
                    stop = ProducerStop::TimedOut;
                    break;
                }
                InsertOutcome::Canceled(_) => {
                    stop = ProducerStop::Canceled;
                    break;
                }
                InsertOutcome::Rejected { .. } => {
                    stop = ProducerStop::Rejected;
                    break;
                }
            }

            let pause = delay.delay_for(index);
            if !pause.is_zero() {
                // キャンセルされたら待機を打ち切る
                tokio::select! {
                    _ = tokio::time::sleep(pause) => {}
                    _ = signal.cancelled() => {}
                }
            }
        }

        // Consumerに生成終了を通知
        drop(completion);
        reporter.report_producer_stopped(stop, produced).await;

        Ok(ProducerReport { produced, stop })
    })
}
