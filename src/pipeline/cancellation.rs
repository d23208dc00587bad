// 協調的キャンセル
// CancellationSourceが発火し、CancellationSignalが観測する

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// キャンセルを発火する側のハンドル
#[derive(Debug, Clone)]
pub struct CancellationSource {
    tx: Arc<watch::Sender<bool>>,
}

impl CancellationSource {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// 観測用のシグナルを発行
    pub fn signal(&self) -> CancellationSignal {
        CancellationSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// キャンセルを発火（複数回呼んでも同じ）
    pub fn cancel(&self) {
        // 受信側がいなくても値は保持される
        let previous = self.tx.send_replace(true);
        if !previous {
            tracing::debug!("cancellation requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// 指定時間後にキャンセルするタイマータスクを起動
    pub fn cancel_after(&self, delay: Duration) -> tokio::task::JoinHandle<()> {
        let source = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(delay = ?delay, "cancel timer fired");
            source.cancel();
        })
    }

    /// 親シグナルの発火をこのソースへ伝える
    ///
    /// 親が発火済みなら即座にキャンセルする。逆方向（このソースから親）には伝わらない
    pub fn cancel_when(&self, parent: &CancellationSignal) -> tokio::task::JoinHandle<()> {
        if parent.is_cancelled() {
            self.cancel();
        }
        let source = self.clone();
        let parent = parent.clone();
        tokio::spawn(async move {
            parent.cancelled().await;
            source.cancel();
        })
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

/// キャンセルを観測する側のハンドル
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    rx: watch::Receiver<bool>,
}

impl CancellationSignal {
    /// 決して発火しないシグナル
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// キャンセルされるまで待機
    ///
    /// 発火済みなら即座に完了する。発火しないままSourceが破棄された場合は永久に待機する
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}
