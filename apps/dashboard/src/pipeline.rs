//! # LensPipeline — 解析パイプライン
//!
//! リンク受領から結果組み立てまでの単一エントリポイント。
//! リンク解析 → チャンネル解決 → コメント書き出し → 統計/プロフィール取得 →
//! 感情分析を順に実行し、表示層へ構造化レスポンスを返す。

use infrastructure::comment_export::CommentExporter;
use infrastructure::sentiment::SentimentEngine;
use lens_core::contracts::AnalyzeReport;
use lens_core::error::LensError;
use lens_core::link;
use lens_core::traits::VideoPlatform;
use shared::config::LensConfig;
use std::sync::Arc;
use tracing::info;

pub struct LensPipeline {
    platform: Arc<dyn VideoPlatform>,
    exporter: CommentExporter,
    sentiment: SentimentEngine,
}

impl LensPipeline {
    pub fn new(platform: Arc<dyn VideoPlatform>, config: &LensConfig) -> Self {
        Self {
            platform,
            exporter: CommentExporter::from_config(config),
            sentiment: SentimentEngine::from_config(config),
        }
    }

    /// 1本のリンクを解析して結果一式を返す
    ///
    /// チャンネル解決とコメント取得の失敗はエラー。統計・プロフィールの
    /// 欠落は `None` のまま結果に載せ、表示層が N/A として描画する。
    pub async fn run(&self, link_input: &str) -> Result<AnalyzeReport, LensError> {
        let video_id = link::extract_video_id(link_input)?;
        info!("🔍 [Pipeline] 解析開始: video {}", video_id);

        let Some(channel_id) = self.platform.resolve_channel_id(&video_id).await else {
            return Err(LensError::PlatformRequest {
                reason: format!("動画情報を取得できない (video: {video_id})"),
            });
        };

        let Some(csv_path) = self
            .exporter
            .export_comments(self.platform.as_ref(), &video_id)
            .await?
        else {
            return Err(LensError::CommentsUnavailable { video_id });
        };

        // 統計とプロフィールは欠けても続行する
        let channel = self.platform.channel_profile(&channel_id).await;
        let statistics = self.platform.video_statistics(&video_id).await;

        let sentiment = self.sentiment.analyze(&csv_path)?;
        let comment_rows = sentiment.total();
        info!(
            "✅ [Pipeline] 解析完了: video {} ({} コメント)",
            video_id, comment_rows
        );

        Ok(AnalyzeReport {
            embed_url: format!("https://www.youtube.com/embed/{video_id}"),
            download_path: format!("/api/download/{video_id}"),
            video_id,
            channel,
            statistics,
            sentiment,
            comment_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lens_core::contracts::{ChannelProfile, CommentPage, CommentRecord, VideoStatistics};

    /// 固定レスポンスを返すスタブ。`None` は「アダプタ境界で吸収済みの失敗」を表す。
    struct StubPlatform {
        channel_id: Option<String>,
        statistics: Option<VideoStatistics>,
        profile: Option<ChannelProfile>,
        comments: Vec<CommentRecord>,
        fail_comments: bool,
    }

    impl Default for StubPlatform {
        fn default() -> Self {
            Self {
                channel_id: Some("channel-1".to_string()),
                statistics: Some(VideoStatistics {
                    view_count: Some(100),
                    like_count: Some(10),
                    comment_count: Some(2),
                }),
                profile: Some(ChannelProfile {
                    title: Some("Stub Channel".to_string()),
                    ..ChannelProfile::default()
                }),
                comments: vec![
                    CommentRecord {
                        author: "alice".to_string(),
                        text: "I love this, wonderful!".to_string(),
                    },
                    CommentRecord {
                        author: "bob".to_string(),
                        text: "terrible, I hate it".to_string(),
                    },
                ],
                fail_comments: false,
            }
        }
    }

    #[async_trait]
    impl VideoPlatform for StubPlatform {
        async fn resolve_channel_id(&self, _video_id: &str) -> Option<String> {
            self.channel_id.clone()
        }

        async fn video_statistics(&self, _video_id: &str) -> Option<VideoStatistics> {
            self.statistics.clone()
        }

        async fn channel_profile(&self, _channel_id: &str) -> Option<ChannelProfile> {
            self.profile.clone()
        }

        async fn comment_page(
            &self,
            video_id: &str,
            _page_token: Option<&str>,
        ) -> Result<CommentPage, LensError> {
            if self.fail_comments {
                return Err(LensError::PlatformRequest {
                    reason: format!("simulated comment failure (video: {video_id})"),
                });
            }
            Ok(CommentPage {
                comments: self.comments.clone(),
                next_page_token: None,
            })
        }
    }

    fn pipeline_with(platform: StubPlatform, data_dir: &std::path::Path) -> LensPipeline {
        let config = LensConfig {
            data_dir: data_dir.display().to_string(),
            ..LensConfig::default()
        };
        LensPipeline::new(Arc::new(platform), &config)
    }

    #[tokio::test]
    async fn test_full_run_builds_report() {
        let tmp = tempfile::TempDir::new().unwrap();
        let pipeline = pipeline_with(StubPlatform::default(), tmp.path());

        let report = pipeline
            .run("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();

        assert_eq!(report.video_id, "dQw4w9WgXcQ");
        assert_eq!(report.embed_url, "https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_eq!(report.download_path, "/api/download/dQw4w9WgXcQ");
        assert_eq!(report.comment_rows, 2);
        assert_eq!(report.sentiment.num_positive, 1);
        assert_eq!(report.sentiment.num_negative, 1);
        assert_eq!(
            report.channel.unwrap().title.as_deref(),
            Some("Stub Channel")
        );
        // CSV も残っている (ダウンロード用)
        assert!(tmp.path().join("dQw4w9WgXcQ.csv").exists());
    }

    #[tokio::test]
    async fn test_statistics_failure_does_not_block_sentiment() {
        let tmp = tempfile::TempDir::new().unwrap();
        let platform = StubPlatform {
            statistics: None,
            profile: None,
            ..StubPlatform::default()
        };
        let pipeline = pipeline_with(platform, tmp.path());

        let report = pipeline.run("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        assert!(report.statistics.is_none());
        assert!(report.channel.is_none());
        // 統計が欠けてもコメント書き出しと感情分析は進む
        assert_eq!(report.sentiment.total(), 2);
    }

    #[tokio::test]
    async fn test_unresolvable_channel_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let platform = StubPlatform {
            channel_id: None,
            ..StubPlatform::default()
        };
        let pipeline = pipeline_with(platform, tmp.path());

        let err = pipeline
            .run("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        match err {
            LensError::PlatformRequest { .. } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_comment_failure_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let platform = StubPlatform {
            fail_comments: true,
            ..StubPlatform::default()
        };
        let pipeline = pipeline_with(platform, tmp.path());

        let err = pipeline
            .run("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        match err {
            LensError::CommentsUnavailable { video_id } => {
                assert_eq!(video_id, "dQw4w9WgXcQ")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_link_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let pipeline = pipeline_with(StubPlatform::default(), tmp.path());

        let err = pipeline.run("https://vimeo.com/123").await.unwrap_err();
        match err {
            LensError::InvalidLink { .. } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
