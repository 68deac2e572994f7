use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chess_client::game::GameSession;
use chess_client::network::{run_session, NetworkConnection, SessionEnd};
use chess_client::settings::{ClientSettings, LogLevel};

/// 国际象棋终端客户端
#[derive(Parser, Debug)]
#[command(name = "chess-client", version, about)]
struct Args {
    /// 对局 ID
    #[arg(long)]
    game: String,

    /// 服务器主机（覆盖设置文件）
    #[arg(long)]
    host: Option<String>,

    /// 服务器端口（覆盖设置文件）
    #[arg(long)]
    port: Option<u16>,

    /// 日志级别
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// 把生效的设置写回设置文件
    #[arg(long)]
    save: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = ClientSettings::load();
    if let Some(host) = args.host {
        settings.network.host = host;
    }
    if let Some(port) = args.port {
        settings.network.port = port;
    }
    if let Some(level) = args.log_level {
        settings.log_level = level;
    }

    // 日志写到 stderr，stdout 留给棋盘
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_filter()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if args.save {
        settings.save().context("failed to save settings")?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(run(args.game, settings))
}

async fn run(game_id: String, settings: ClientSettings) -> anyhow::Result<()> {
    let url = settings.network.game_url(&game_id);
    tracing::info!("Joining game {} at {}", game_id, url);

    let mut conn = NetworkConnection::connect(&url)
        .await
        .with_context(|| format!("failed to connect to {}", url))?;
    if let Some(addr) = conn.peer_addr() {
        tracing::debug!("Server address: {}", addr);
    }
    let mut session = GameSession::new(game_id);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let end = run_session(&mut conn, &mut session, stdin, &mut stdout, settings.show_labels)
        .await
        .context("session failed")?;

    match end {
        SessionEnd::Quit => tracing::info!("Bye"),
        SessionEnd::ServerClosed => tracing::warn!("Disconnected from server"),
    }
    Ok(())
}
