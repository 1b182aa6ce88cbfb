use serde::{Deserialize, Serialize};

/// CommentLens 全体の設定
#[derive(Clone, Serialize, Deserialize)]
pub struct LensConfig {
    /// YouTube Data API v3 のキー
    pub youtube_api_key: String,
    /// コメント CSV の出力先ディレクトリ
    pub data_dir: String,
    /// API リクエスト1回あたりのタイムアウト（秒）
    pub request_timeout_secs: u64,
    /// コメント取得の最大ページ数（メモリと実行時間の上限保証）
    pub max_comment_pages: u32,
    /// compound スコアがこれを超えたら positive
    pub positive_threshold: f64,
    /// compound スコアがこれを下回ったら negative
    pub negative_threshold: f64,
}

impl std::fmt::Debug for LensConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LensConfig")
            .field(
                "youtube_api_key",
                if self.youtube_api_key.is_empty() { &"" } else { &"***" },
            )
            .field("data_dir", &self.data_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_comment_pages", &self.max_comment_pages)
            .field("positive_threshold", &self.positive_threshold)
            .field("negative_threshold", &self.negative_threshold)
            .finish()
    }
}

impl LensConfig {
    /// 設定をファイルまたは環境変数から読み込む
    ///
    /// 優先順位: デフォルト < config.toml < 環境変数 (COMMENT_LENS_*)
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default(
                "youtube_api_key",
                std::env::var("YOUTUBE_API_KEY").unwrap_or_else(|_| "".to_string()),
            )?
            .set_default("data_dir", "data")?
            .set_default("request_timeout_secs", 30)?
            .set_default("max_comment_pages", 50)?
            .set_default("positive_threshold", 0.05)?
            .set_default("negative_threshold", -0.05)?
            // config.toml があれば読み込む
            .add_source(config::File::with_name("config").required(false))
            // 環境変数 (COMMENT_LENS_*) があれば上書き
            .add_source(config::Environment::with_prefix("COMMENT_LENS"))
            .build()?;

        settings.try_deserialize()
    }
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: String::new(),
            data_dir: "data".to_string(),
            request_timeout_secs: 30,
            max_comment_pages: 50,
            positive_threshold: 0.05,
            negative_threshold: -0.05,
        }
    }
}
