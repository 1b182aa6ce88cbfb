//! # ドメインエラー型
//!
//! `thiserror` を使い、すべてのドメインエラーに明確な型を付与する。
//! Iron Principles: 非テストコードでの `unwrap()` / `expect()` は禁止。

use thiserror::Error;

/// CommentLens のドメインエラー
#[derive(Debug, Error)]
pub enum LensError {
    // === リンク解析 ===
    #[error("YouTube リンクとして解釈できない: {input}")]
    InvalidLink { input: String },

    // === プラットフォーム API ===
    #[error("YouTube API リクエスト失敗: {reason}")]
    PlatformRequest { reason: String },

    #[error("コメントの取得に失敗 (video: {video_id})")]
    CommentsUnavailable { video_id: String },

    // === 設定 ===
    #[error("設定読み込みエラー: {source}")]
    ConfigLoad {
        #[source]
        source: anyhow::Error,
    },

    #[error("YouTube API キーが設定されていない")]
    MissingApiKey,

    // === CSV 書き出し ===
    #[error("CSV 書き出しエラー ({path}): {source}")]
    CsvExport {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    // === 感情分析 ===
    #[error("感情分析に失敗: {reason}")]
    SentimentAnalysis { reason: String },
}
