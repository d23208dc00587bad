// BoundedPipeline - 容量固定のProducer-Consumer受け渡しバッファ
// バックプレッシャー、完了通知、キャンセル対応の挿入を提供

use super::cancellation::CancellationSignal;
use crate::core::{
    CompletionOutcome, InsertOutcome, PipelineError, PipelineResult, PipelineState, RejectReason,
};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

struct Inner<T> {
    buffer: VecDeque<T>,
    completed: bool,
}

/// ロック内で1回だけ挿入を試みた結果
enum PushAttempt<T> {
    Done(InsertOutcome<T>),
    Full(T),
}

/// ロック内で1回だけ取り出しを試みた結果
enum TakeAttempt<T> {
    Item(T),
    Empty,
    Exhausted,
}

/// 容量固定のFIFOパイプライン
///
/// `Arc`で共有してProducerとConsumerの双方から使用する。
/// バッファと完了フラグは1つのMutexで保護し、ガードは`.await`をまたがない。
pub struct BoundedPipeline<T> {
    capacity: usize,
    inner: Mutex<Inner<T>>,
    // 空きが出た、または完了した（挿入待ち向け）
    space_freed: Notify,
    // 要素が追加された、または完了した（取り出し待ち向け）
    item_added: Notify,
}

impl<T> BoundedPipeline<T> {
    /// 新しいパイプラインを作成
    pub fn new(capacity: usize) -> PipelineResult<Self> {
        if capacity == 0 {
            return Err(PipelineError::configuration(
                "パイプライン容量は1以上である必要があります",
            ));
        }

        Ok(Self {
            capacity,
            inner: Mutex::new(Inner {
                buffer: VecDeque::with_capacity(capacity),
                completed: false,
            }),
            space_freed: Notify::new(),
            item_added: Notify::new(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 現在バッファされている要素数
    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().buffer.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.lock().completed
    }

    /// 完了済みかつ空の場合true。一度trueになると戻らない
    pub fn is_exhausted(&self) -> bool {
        let inner = self.lock();
        inner.completed && inner.buffer.is_empty()
    }

    pub fn state(&self) -> PipelineState {
        let inner = self.lock();
        match (inner.completed, inner.buffer.is_empty()) {
            (false, _) => PipelineState::Active,
            (true, false) => PipelineState::Draining,
            (true, true) => PipelineState::Exhausted,
        }
    }

    /// 要素の挿入を試みる
    ///
    /// 空きがあれば即座に挿入する。満杯の場合は空き・タイムアウト・キャンセルの
    /// いずれかが先に起きるまで待機する。挿入されなかった要素は結果に含めて返す。
    /// `timeout`が`None`、または期限が表現できないほど大きい場合は無期限に待機する。
    pub async fn try_insert(
        &self,
        item: T,
        timeout: Option<Duration>,
        cancel: &CancellationSignal,
    ) -> InsertOutcome<T> {
        // 表現できない期限は期限なしとして扱う
        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));
        let mut item = item;

        loop {
            // 状態確認より先に登録して通知の取りこぼしを防ぐ
            let space_freed = self.space_freed.notified();
            tokio::pin!(space_freed);
            space_freed.as_mut().enable();

            item = match self.push_once(item, cancel) {
                PushAttempt::Done(outcome) => return outcome,
                PushAttempt::Full(item) => item,
            };

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                tracing::debug!(capacity = self.capacity, "insert timed out");
                return InsertOutcome::TimedOut(item);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(capacity = self.capacity, "insert canceled while waiting");
                    return InsertOutcome::Canceled(item);
                }
                _ = sleep_until(deadline) => {
                    tracing::debug!(capacity = self.capacity, "insert timed out");
                    return InsertOutcome::TimedOut(item);
                }
                _ = &mut space_freed => {}
            }
        }
    }

    /// タイムアウトなしで挿入する
    pub async fn insert(&self, item: T, cancel: &CancellationSignal) -> InsertOutcome<T> {
        self.try_insert(item, None, cancel).await
    }

    /// 先頭の要素を取り出す（ブロックしない）
    pub fn try_remove(&self) -> Option<T> {
        match self.take_once() {
            TakeAttempt::Item(item) => Some(item),
            TakeAttempt::Empty | TakeAttempt::Exhausted => None,
        }
    }

    /// 要素が来るか枯渇するまで待機して取り出す
    ///
    /// `None`はパイプラインが枯渇し、今後要素が現れないことを意味する
    pub async fn take(&self) -> Option<T> {
        loop {
            let item_added = self.item_added.notified();
            tokio::pin!(item_added);
            item_added.as_mut().enable();

            match self.take_once() {
                TakeAttempt::Item(item) => return Some(item),
                TakeAttempt::Exhausted => return None,
                TakeAttempt::Empty => item_added.await,
            }
        }
    }

    /// 完了をマークする
    ///
    /// 2回目以降は`AlreadyCompleted`を返し、状態は変えない
    pub fn mark_completed(&self) -> CompletionOutcome {
        let remaining = {
            let mut inner = self.lock();
            if inner.completed {
                tracing::warn!("pipeline already marked completed");
                return CompletionOutcome::AlreadyCompleted;
            }
            inner.completed = true;
            inner.buffer.len()
        };

        tracing::debug!(remaining, "pipeline marked completed");
        self.item_added.notify_waiters();
        self.space_freed.notify_waiters();
        CompletionOutcome::Completed
    }

    fn push_once(&self, item: T, cancel: &CancellationSignal) -> PushAttempt<T> {
        let len = {
            let mut inner = self.lock();
            if inner.completed {
                return PushAttempt::Done(InsertOutcome::Rejected {
                    item,
                    reason: RejectReason::AlreadyCompleted,
                });
            }
            if cancel.is_cancelled() {
                return PushAttempt::Done(InsertOutcome::Canceled(item));
            }
            if inner.buffer.len() >= self.capacity {
                return PushAttempt::Full(item);
            }

            inner.buffer.push_back(item);
            assert!(
                inner.buffer.len() <= self.capacity,
                "buffered count exceeds capacity"
            );
            inner.buffer.len()
        };

        tracing::trace!(len, capacity = self.capacity, "item inserted");
        self.item_added.notify_waiters();
        PushAttempt::Done(InsertOutcome::Inserted)
    }

    fn take_once(&self) -> TakeAttempt<T> {
        let item = {
            let mut inner = self.lock();
            match inner.buffer.pop_front() {
                Some(item) => item,
                None if inner.completed => return TakeAttempt::Exhausted,
                None => return TakeAttempt::Empty,
            }
        };

        tracing::trace!(capacity = self.capacity, "item removed");
        self.space_freed.notify_waiters();
        TakeAttempt::Item(item)
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        // パニックしたスレッドがあっても状態は常に整合している
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for BoundedPipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("BoundedPipeline")
            .field("capacity", &self.capacity)
            .field("len", &inner.buffer.len())
            .field("completed", &inner.completed)
            .finish()
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
