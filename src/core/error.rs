// パイプライン専用のカスタムエラー型定義
// 挿入のタイムアウト・キャンセルはエラーではなくInsertOutcomeで返す

use std::path::PathBuf;
use thiserror::Error;

/// パイプライン周辺で発生するエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("バリデーションエラー: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("設定ファイルエラー: {path} - {source}")]
    ConfigFileError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

/// パイプライン処理の結果型
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// バリデーションエラーの作成
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 設定ファイルエラーの作成
    pub fn config_file(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::ConfigFileError {
            path: path.into(),
            source,
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::InternalError { source }
    }

    /// エラーが回復可能かどうかを判定
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ConfigurationError { .. } | Self::ValidationError { .. } => false,
            Self::ConfigFileError { .. } => true,
            Self::TaskError { .. } => true,
            Self::InternalError { .. } => false,
        }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::task(source)
    }
}
