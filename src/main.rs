//! GovSense - 内容分类命令行客户端
//!
//! 将命令行参数转换为用户操作，驱动提交编排器，
//! 并以 JSON 输出最终的展示意图。

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::broadcast;

use govsense::application::ports::ClassificationServicePort;
use govsense::config::{load_config_from_path, print_config, AppConfig};
use govsense::domain::{DisplayIntent, ImageFile, Mode};
use govsense::infrastructure::adapters::{
    FakeClassifierClient, HttpClassifierClient, HttpClassifierClientConfig,
};
use govsense::infrastructure::events::{EventPublisher, SubmissionEvent};
use govsense::infrastructure::worker::{OrchestratorConfig, OrchestratorHandle, SubmissionOrchestrator};

#[derive(Parser)]
#[command(author, version, about = "Classify text or images as constructive or harmful", long_about = None)]
struct Args {
    /// 配置文件路径（默认搜索 govsense.toml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 使用离线分类器，不访问分类服务
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 分类一段文本
    Text { text: String },
    /// 分类一张图片
    Image { path: Option<PathBuf> },
    /// 检查分类服务是否在线
    Health,
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("warn,govsense={}", config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    // 日志输出到 stderr，stdout 只输出结果
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// 等待提交结束（结果或错误）
async fn wait_for_outcome(
    rx: &mut broadcast::Receiver<SubmissionEvent>,
) -> anyhow::Result<DisplayIntent> {
    loop {
        match rx.recv().await {
            Ok(event) if matches!(event.intent, DisplayIntent::Result(_) | DisplayIntent::Error(_)) => {
                return Ok(event.intent);
            }
            Ok(_) => continue,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "State events lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                anyhow::bail!("Orchestrator stopped before the submission resolved");
            }
        }
    }
}

async fn classify(handle: &OrchestratorHandle, command: Command) -> anyhow::Result<DisplayIntent> {
    let mut rx = handle.subscribe();

    match command {
        Command::Text { text } => {
            handle.select_mode(Mode::Text).await?;
            handle.submit_text(text).await?;
        }
        Command::Image { path } => {
            let file = match path {
                Some(path) => Some(
                    ImageFile::load(&path)
                        .await
                        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?,
                ),
                None => None,
            };
            handle.select_mode(Mode::Image).await?;
            handle.submit_image(file).await?;
        }
        Command::Health => anyhow::bail!("Health check is not a submission"),
    }

    wait_for_outcome(&mut rx).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(args.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    let service: Arc<dyn ClassificationServicePort> = if args.offline {
        tracing::info!("Using offline classifier");
        Arc::new(FakeClassifierClient::new())
    } else {
        let client_config = HttpClassifierClientConfig {
            base_url: config.service.url.clone(),
            timeout_secs: config.service.timeout_secs,
        };
        Arc::new(HttpClassifierClient::new(client_config)?)
    };

    if let Command::Health = args.command {
        let online = service.health_check().await;
        println!("{}", serde_json::json!({ "online": online, "url": config.service.url }));
        if !online {
            std::process::exit(1);
        }
        return Ok(());
    }

    let (orchestrator, handle) = SubmissionOrchestrator::new(
        OrchestratorConfig {
            queue_capacity: config.orchestrator.queue_capacity,
        },
        service,
        Arc::new(EventPublisher::new()),
    );
    let worker = tokio::spawn(orchestrator.run());

    let intent = classify(&handle, args.command).await?;

    handle.shutdown().await?;
    worker.await?;

    println!("{}", serde_json::to_string_pretty(&intent)?);
    if intent.is_error() {
        std::process::exit(1);
    }

    Ok(())
}
