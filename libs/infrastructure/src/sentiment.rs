//! # SentimentEngine — 感情分析
//!
//! 書き出した CSV を読み戻し、VADER 辞書モデルの compound スコアを
//! しきい値ポリシーで positive / negative / neutral に分類して集計する。

use lens_core::contracts::{SentimentLabel, SentimentSummary};
use lens_core::error::LensError;
use shared::config::LensConfig;
use std::path::Path;
use tracing::info;
use vader_sentiment::SentimentIntensityAnalyzer;

pub struct SentimentEngine {
    /// compound がこれを超えたら positive
    positive_threshold: f64,
    /// compound がこれを下回ったら negative
    negative_threshold: f64,
}

impl SentimentEngine {
    pub fn new(positive_threshold: f64, negative_threshold: f64) -> Self {
        Self {
            positive_threshold,
            negative_threshold,
        }
    }

    pub fn from_config(config: &LensConfig) -> Self {
        Self::new(config.positive_threshold, config.negative_threshold)
    }

    /// CSV の全コメントを分類して集計を返す
    pub fn analyze(&self, csv_path: &Path) -> Result<SentimentSummary, LensError> {
        let mut reader = csv::Reader::from_path(csv_path).map_err(|e| {
            LensError::SentimentAnalysis {
                reason: format!("CSV 読み込み失敗 ({}): {}", csv_path.display(), e),
            }
        })?;

        let analyzer = SentimentIntensityAnalyzer::new();
        let mut summary = SentimentSummary::default();

        for record in reader.records() {
            let record = record.map_err(|e| LensError::SentimentAnalysis {
                reason: format!("CSV 行の解析失敗: {e}"),
            })?;
            let text = record.get(1).unwrap_or("");
            let (label, score) = self.classify(&analyzer, text);
            summary.record(label, score);
        }

        info!(
            "🧠 [Sentiment] {} 件を分類: 👍 {} / 👎 {} / 😐 {}",
            summary.total(),
            summary.num_positive,
            summary.num_negative,
            summary.num_neutral
        );
        Ok(summary)
    }

    /// 1コメント分の分類。空文字・空白のみは neutral (score 0.0) 扱い。
    fn classify(
        &self,
        analyzer: &SentimentIntensityAnalyzer,
        text: &str,
    ) -> (SentimentLabel, f64) {
        if text.trim().is_empty() {
            return (SentimentLabel::Neutral, 0.0);
        }

        let scores = analyzer.polarity_scores(text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);

        let label = if compound > self.positive_threshold {
            SentimentLabel::Positive
        } else if compound < self.negative_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        (label, compound)
    }
}
