// パイプライン層 - 容量固定の受け渡しバッファと協調的キャンセル

pub mod bounded;
pub mod cancellation;

pub use bounded::BoundedPipeline;
pub use cancellation::{CancellationSignal, CancellationSource};
