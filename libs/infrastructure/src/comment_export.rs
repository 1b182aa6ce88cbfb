//! # CommentExporter — コメント CSV 書き出し
//!
//! commentThreads のページネーションを完走させ、(作者, 本文) を
//! `<data_dir>/<video_id>.csv` へ保存する。途中で失敗した場合は
//! 部分結果を捨てて `None` を返す (all-or-nothing)。

use lens_core::contracts::CommentRecord;
use lens_core::error::LensError;
use lens_core::traits::VideoPlatform;
use shared::config::LensConfig;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct CommentExporter {
    data_dir: PathBuf,
    max_pages: u32,
}

impl CommentExporter {
    pub fn new(data_dir: impl Into<PathBuf>, max_pages: u32) -> Self {
        Self {
            data_dir: data_dir.into(),
            max_pages,
        }
    }

    pub fn from_config(config: &LensConfig) -> Self {
        Self::new(config.data_dir.clone(), config.max_comment_pages)
    }

    /// コメントを全ページ収集して CSV に保存し、ファイルパスを返す
    ///
    /// プラットフォーム側の失敗は `None`。CSV の I/O 失敗だけがエラーになる。
    pub async fn export_comments(
        &self,
        platform: &dyn VideoPlatform,
        video_id: &str,
    ) -> Result<Option<PathBuf>, LensError> {
        let comments = match self.collect_all_pages(platform, video_id).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!("⚠️ [Exporter] コメント取得を中断、結果を破棄: {}", e);
                return Ok(None);
            }
        };

        let path = self.write_csv(video_id, &comments)?;
        info!(
            "💾 [Exporter] {} 件のコメントを保存: {}",
            comments.len(),
            path.display()
        );
        Ok(Some(path))
    }

    /// nextPageToken が尽きるかページ上限に達するまで順に収集する
    async fn collect_all_pages(
        &self,
        platform: &dyn VideoPlatform,
        video_id: &str,
    ) -> Result<Vec<CommentRecord>, LensError> {
        let mut comments = Vec::new();
        let mut token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let page = platform.comment_page(video_id, token.as_deref()).await?;
            comments.extend(page.comments);
            pages += 1;

            match page.next_page_token {
                Some(next) if pages < self.max_pages => token = Some(next),
                Some(_) => {
                    // ページ上限到達。残りは切り捨て (Top-K Truncation)
                    warn!(
                        "⚠️ [Exporter] ページ上限 {} に到達、以降は切り捨て (video: {})",
                        self.max_pages, video_id
                    );
                    break;
                }
                None => break,
            }
        }

        Ok(comments)
    }

    fn write_csv(&self, video_id: &str, comments: &[CommentRecord]) -> Result<PathBuf, LensError> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| csv_error(&self.data_dir, e))?;

        let path = self.data_dir.join(format!("{video_id}.csv"));
        let mut writer = csv::Writer::from_path(&path).map_err(|e| csv_error(&path, e))?;
        writer
            .write_record(["Username", "Comment"])
            .map_err(|e| csv_error(&path, e))?;
        for comment in comments {
            writer
                .write_record([comment.author.as_str(), comment.text.as_str()])
                .map_err(|e| csv_error(&path, e))?;
        }
        writer.flush().map_err(|e| csv_error(&path, e))?;

        Ok(path)
    }
}

fn csv_error(path: &Path, err: impl Into<anyhow::Error>) -> LensError {
    LensError::CsvExport {
        path: path.display().to_string(),
        source: err.into(),
    }
}
