use infrastructure::youtube::YouTubeClient;
use lens_core::error::LensError;
use shared::config::LensConfig;
use shared::health::HealthMonitor;
use std::sync::Arc;
use tracing::{error, info};

mod pipeline;
mod server;

use pipeline::LensPipeline;
use server::router::{create_router, AppState};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// ダッシュボードサーバーモード
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// リンクを1本だけ解析する CLI モード
    Analyze {
        /// YouTube 動画リンク
        #[arg(short, long)]
        link: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // 1. 設定を読み込む
    let config = LensConfig::load().map_err(|e| LensError::ConfigLoad { source: e.into() })?;

    // API キーの欠如は致命的。対話を始める前に停止する
    if config.youtube_api_key.trim().is_empty() {
        error!(
            "❌ YouTube API キーが未設定です。config.toml の youtube_api_key か \
             環境変数 COMMENT_LENS_YOUTUBE_API_KEY を設定してください"
        );
        return Err(LensError::MissingApiKey.into());
    }

    info!("⚙️  Config loaded:");
    info!("   Data dir:  {}", config.data_dir);
    info!("   Timeout:   {}s", config.request_timeout_secs);
    info!("   Page cap:  {}", config.max_comment_pages);

    // 2. API クライアントは起動時に一度だけ構築し、Arc で各所へ渡して使い回す
    let platform = Arc::new(YouTubeClient::new(
        config.youtube_api_key.clone(),
        config.request_timeout_secs,
    )?);

    let pipeline = LensPipeline::new(platform, &config);

    // コマンド分岐
    match args.command.unwrap_or(Commands::Serve { port: 3000 }) {
        Commands::Serve { port } => {
            let state = Arc::new(AppState {
                pipeline,
                data_dir: std::path::PathBuf::from(&config.data_dir),
                health: tokio::sync::Mutex::new(HealthMonitor::new()),
            });

            let app = create_router(state);
            let addr = format!("0.0.0.0:{port}");
            info!("📡 CommentLens dashboard listening on {}", addr);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
        }
        Commands::Analyze { link } => {
            info!("🚀 解析パイプラインを起動...");
            match pipeline.run(&link).await {
                Ok(report) => {
                    println!("\n📊 解析完了！");
                    println!("   🎬 動画 ID:    {}", report.video_id);
                    if let Some(channel) = &report.channel {
                        println!(
                            "   📺 チャンネル: {}",
                            channel.title.as_deref().unwrap_or("N/A")
                        );
                    }
                    if let Some(stats) = &report.statistics {
                        println!("   👀 再生数:     {}", format_count(stats.view_count));
                        println!("   👍 高評価:     {}", format_count(stats.like_count));
                    }
                    println!("   💬 コメント:   {} 件", report.comment_rows);
                    println!(
                        "   🧠 感情:       positive {} / negative {} / neutral {}",
                        report.sentiment.num_positive,
                        report.sentiment.num_negative,
                        report.sentiment.num_neutral
                    );
                }
                Err(e) => {
                    error!("❌ 解析パイプラインが失敗: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}

fn format_count(count: Option<u64>) -> String {
    count.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}
