//! # The Contract — パイプライン間の型付きデータ契約
//!
//! API アダプタ境界で検証済みのレコードを定義する。
//! 下流は `serde_json::Value` へのアドホックなキー参照ではなく、必ずこの型を通す。

use serde::{Deserialize, Serialize};

// --- Video クラスター ---

/// 動画の公開統計 (プラットフォーム側が秘匿する場合があるためすべて Option)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoStatistics {
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

// --- Channel クラスター ---

/// チャンネルの公開プロフィール
///
/// フィールドはすべてチャンネル所有者が非公開にできるため Option。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelProfile {
    pub title: Option<String>,
    pub video_count: Option<u64>,
    pub logo_url: Option<String>,
    /// 作成日 (`YYYY-MM-DD` に正規化済み)
    pub created_date: Option<String>,
    pub subscriber_count: Option<u64>,
    pub description: Option<String>,
}

// --- Comment クラスター ---

/// トップレベルコメント1件分 (作者表示名 + 本文プレーンテキスト)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub author: String,
    pub text: String,
}

/// commentThreads API の1ページ分
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<CommentRecord>,
    /// 次ページが存在する場合のみ Some
    pub next_page_token: Option<String>,
}

// --- Sentiment クラスター ---

/// 感情ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// CSV 全体の感情集計
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub num_positive: usize,
    pub num_negative: usize,
    pub num_neutral: usize,
    /// コメントごとのラベル (CSV 行順)
    pub labels: Vec<SentimentLabel>,
    /// コメントごとの compound スコア (分布プロット用)
    pub scores: Vec<f64>,
}

impl SentimentSummary {
    /// 1コメント分の判定を記録し、該当カウンタを進める
    pub fn record(&mut self, label: SentimentLabel, score: f64) {
        match label {
            SentimentLabel::Positive => self.num_positive += 1,
            SentimentLabel::Negative => self.num_negative += 1,
            SentimentLabel::Neutral => self.num_neutral += 1,
        }
        self.labels.push(label);
        self.scores.push(score);
    }

    pub fn total(&self) -> usize {
        self.num_positive + self.num_negative + self.num_neutral
    }
}

// --- Analyze クラスター ---

/// 解析リクエスト (表示層からの唯一の入力)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub link: String,
}

/// 解析結果一式 (表示層へ返す構造化レスポンス)
///
/// Option のフィールドは「取得できなかった」ことを表し、
/// 表示層は N/A プレースホルダとして描画する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeReport {
    pub video_id: String,
    /// プレイヤー埋め込み用 URL
    pub embed_url: String,
    pub channel: Option<ChannelProfile>,
    pub statistics: Option<VideoStatistics>,
    pub sentiment: SentimentSummary,
    /// CSV に書き出した行数
    pub comment_rows: usize,
    /// 生データ CSV のダウンロードルート
    pub download_path: String,
}
