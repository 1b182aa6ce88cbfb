//! # YouTubeClient — YouTube Data API v3 アダプタ
//!
//! プラットフォームへの読み取りクエリ4種 (videos.snippet / videos.statistics /
//! channels / commentThreads) をラップする。HTTP レベルの失敗はこの境界で
//! 捕捉・ログし、読み取り系は `None` に変換する。下流へ渡すのは
//! ワイヤ型から検証済みのドメインレコードのみ。

use async_trait::async_trait;
use chrono::DateTime;
use lens_core::contracts::{ChannelProfile, CommentPage, CommentRecord, VideoStatistics};
use lens_core::error::LensError;
use lens_core::traits::VideoPlatform;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// commentThreads の1ページあたり取得件数 (API 上限)
const COMMENTS_PER_PAGE: u32 = 100;

/// YouTube Data API v3 クライアント
///
/// 起動時に一度だけ構築し、`Arc` で各コンポーネントへ渡して使い回す。
/// リクエスト間で状態を持たないため再利用は安全。
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String, timeout_secs: u64) -> Result<Self, LensError> {
        // HTTP クライアント既定にはタイムアウトが無いため明示的に課す
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LensError::PlatformRequest {
                reason: format!("HTTP クライアント初期化失敗: {e}"),
            })?;
        Ok(Self { http, api_key })
    }

    async fn get_json<T>(&self, url: &str, context: &str) -> Result<T, LensError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LensError::PlatformRequest {
                reason: format!("{context}: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LensError::PlatformRequest {
                reason: format!("{context}: status {status}: {body}"),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| LensError::PlatformRequest {
                reason: format!("{context}: JSON 解析失敗: {e}"),
            })
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn resolve_channel_id(&self, video_id: &str) -> Option<String> {
        let url = format!(
            "{API_BASE}/videos?part=snippet&id={video_id}&key={}",
            self.api_key
        );
        match self.get_json::<VideoListResponse>(&url, "videos.list(snippet)").await {
            Ok(resp) => {
                let channel_id = resp
                    .items
                    .into_iter()
                    .next()
                    .and_then(|v| v.snippet)
                    .and_then(|s| s.channel_id);
                if channel_id.is_none() {
                    warn!("⚠️ [YouTube] 動画 {} が見つからない (items が空)", video_id);
                }
                channel_id
            }
            Err(e) => {
                warn!("⚠️ [YouTube] チャンネル ID の解決に失敗: {}", e);
                None
            }
        }
    }

    async fn video_statistics(&self, video_id: &str) -> Option<VideoStatistics> {
        let url = format!(
            "{API_BASE}/videos?part=statistics&id={video_id}&key={}",
            self.api_key
        );
        match self.get_json::<VideoListResponse>(&url, "videos.list(statistics)").await {
            Ok(resp) => {
                let stats = resp
                    .items
                    .into_iter()
                    .next()
                    .and_then(|v| v.statistics)
                    .map(|w| to_video_statistics(&w));
                if let Some(s) = &stats {
                    info!(
                        "📊 [YouTube] 動画 {} の統計: views={:?} likes={:?}",
                        video_id, s.view_count, s.like_count
                    );
                }
                stats
            }
            Err(e) => {
                warn!("⚠️ [YouTube] 動画統計の取得に失敗: {}", e);
                None
            }
        }
    }

    async fn channel_profile(&self, channel_id: &str) -> Option<ChannelProfile> {
        let url = format!(
            "{API_BASE}/channels?part=snippet,statistics&id={channel_id}&key={}",
            self.api_key
        );
        match self.get_json::<ChannelListResponse>(&url, "channels.list").await {
            Ok(resp) => resp.items.into_iter().next().map(to_channel_profile),
            Err(e) => {
                warn!("⚠️ [YouTube] チャンネル情報の取得に失敗: {}", e);
                None
            }
        }
    }

    async fn comment_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentPage, LensError> {
        let mut url = format!(
            "{API_BASE}/commentThreads?part=snippet&videoId={video_id}\
             &textFormat=plainText&maxResults={COMMENTS_PER_PAGE}&key={}",
            self.api_key
        );
        if let Some(token) = page_token {
            url.push_str("&pageToken=");
            url.push_str(token);
        }

        let resp: CommentThreadListResponse =
            self.get_json(&url, "commentThreads.list").await?;

        let comments = resp
            .items
            .into_iter()
            .filter_map(|item| {
                let snippet = item.snippet?.top_level_comment?.snippet?;
                Some(CommentRecord {
                    author: snippet.author_display_name.unwrap_or_default(),
                    text: snippet.text_display.unwrap_or_default(),
                })
            })
            .collect();

        Ok(CommentPage {
            comments,
            next_page_token: resp.next_page_token,
        })
    }
}

// --- ワイヤ型 (YouTube Data API v3 のレスポンス形状) ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VideoListResponse {
    items: Vec<VideoResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VideoResource {
    snippet: Option<VideoSnippet>,
    statistics: Option<VideoStatisticsWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VideoSnippet {
    channel_id: Option<String>,
}

/// statistics の数値は API が文字列で返す
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VideoStatisticsWire {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChannelListResponse {
    items: Vec<ChannelResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChannelResource {
    snippet: Option<ChannelSnippet>,
    statistics: Option<ChannelStatisticsWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChannelSnippet {
    title: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    thumbnails: Option<ThumbnailSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChannelStatisticsWire {
    subscriber_count: Option<String>,
    video_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThumbnailSet {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnail {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CommentThreadListResponse {
    next_page_token: Option<String>,
    items: Vec<CommentThreadResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CommentThreadResource {
    snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CommentThreadSnippet {
    top_level_comment: Option<CommentResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CommentResource {
    snippet: Option<CommentSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CommentSnippet {
    author_display_name: Option<String>,
    text_display: Option<String>,
}

// --- ワイヤ型 → ドメインレコード ---

fn parse_count(raw: &Option<String>) -> Option<u64> {
    raw.as_deref().and_then(|v| v.parse().ok())
}

fn to_video_statistics(wire: &VideoStatisticsWire) -> VideoStatistics {
    VideoStatistics {
        view_count: parse_count(&wire.view_count),
        like_count: parse_count(&wire.like_count),
        comment_count: parse_count(&wire.comment_count),
    }
}

fn to_channel_profile(resource: ChannelResource) -> ChannelProfile {
    let snippet = resource.snippet.unwrap_or_default();
    let stats = resource.statistics.unwrap_or_default();
    ChannelProfile {
        title: snippet.title,
        video_count: parse_count(&stats.video_count),
        logo_url: snippet
            .thumbnails
            .and_then(|t| t.high.or(t.default))
            .and_then(|t| t.url),
        created_date: snippet.published_at.as_deref().map(normalize_date),
        subscriber_count: parse_count(&stats.subscriber_count),
        description: snippet.description,
    }
}

/// RFC 3339 の publishedAt を `YYYY-MM-DD` に丸める
fn normalize_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => raw.chars().take(10).collect(),
    }
}
