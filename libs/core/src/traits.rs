//! # ドメイントレイト定義
//!
//! 動画ホスティングプラットフォームへのアクセス面を定義する。
//! 具体実装は `libs/infrastructure` に配置する（依存性逆転の原則）。

use crate::contracts::{ChannelProfile, CommentPage, VideoStatistics};
use crate::error::LensError;
use async_trait::async_trait;

/// 動画プラットフォームの読み取り専用 API
///
/// resolve_channel_id / video_statistics / channel_profile は
/// プラットフォーム側の失敗を境界で吸収して `None` に変換する契約。
/// 呼び出し側は `None` を「取得不可」として表示を退化させ、決してクラッシュしない。
/// `comment_page` だけはページネーションの中断を伝える必要があるためエラーを返す。
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// 動画の所属チャンネル ID を取得
    async fn resolve_channel_id(&self, video_id: &str) -> Option<String>;

    /// 動画の公開統計を取得
    async fn video_statistics(&self, video_id: &str) -> Option<VideoStatistics>;

    /// チャンネルの公開プロフィールを取得
    async fn channel_profile(&self, channel_id: &str) -> Option<ChannelProfile>;

    /// トップレベルコメントを1ページ分取得
    ///
    /// `page_token` が `None` なら先頭ページ。
    async fn comment_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentPage, LensError>;
}
