use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::BufReader;
use voice_ai_agents::{
    assistant::{AgentKind, Assistant, BaristaAssistant, WellnessAssistant},
    checkin::{CheckinLog, DEFAULT_LOG_PATH},
    config::{load_config, DEFAULT_ENV_FILE},
    order::{OrderStateAccumulator, DEFAULT_ORDER_PATH},
    session::{Session, WorkerContext},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Which persona to run (barista or wellness)
    #[arg(long, default_value = "barista")]
    agent: AgentKind,

    /// Room name attached to every log line of the session
    #[arg(long, default_value = "console")]
    room: String,

    /// Where the finalized order is written
    #[arg(long, default_value = DEFAULT_ORDER_PATH)]
    order_path: PathBuf,

    /// Wellness check-in log
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    /// Env file holding the backend credentials
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Print the instructions and tool schema, then exit
    #[arg(long)]
    print_tools: bool,
}

fn print_tools(assistant: &dyn Assistant) -> Result<()> {
    let schema = serde_json::json!({
        "agent": assistant.kind().to_string(),
        "instructions": assistant.instructions(),
        "tools": assistant.tools().get_tool_definitions(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&schema).context("Failed to encode tool schema")?
    );
    Ok(())
}

/// Answer JSON-lines tool calls from stdin until EOF or Ctrl+C.
async fn run<A: Assistant>(mut session: Session<A>) -> Result<()> {
    let room = session.room().to_string();
    session.add_shutdown_callback(move |usage| {
        println!("👋 Session in '{}' closed after {} tool call(s)", room, usage.tool_calls);
    });

    let cancel = session.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl+C, shutting down...");
            cancel.cancel();
        }
    });

    session
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("Tool-call loop failed")?;
    Ok(())
}

/// Whether the backend credentials need checking before starting.
fn needs_backend(args: &Args) -> bool {
    !args.print_tools
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::info!("🚀 Starting {} agent", args.agent);

    if !needs_backend(&args) {
        return match args.agent {
            AgentKind::Barista => {
                print_tools(&BaristaAssistant::new(OrderStateAccumulator::new(args.order_path)))
            }
            AgentKind::Wellness => {
                print_tools(&WellnessAssistant::new(CheckinLog::new(args.log_path)))
            }
        };
    }

    if let Err(e) = load_config(&args.env_file) {
        match args.agent {
            AgentKind::Wellness => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
            AgentKind::Barista => {
                log::warn!("Backend not configured ({}), running tools locally", e);
            }
        }
    }

    let worker = WorkerContext::default();

    match args.agent {
        AgentKind::Barista => {
            let assistant = BaristaAssistant::new(OrderStateAccumulator::new(args.order_path));
            worker.prewarm();
            run(Session::new(&worker, args.room, assistant)).await
        }
        AgentKind::Wellness => {
            let assistant = WellnessAssistant::new(CheckinLog::new(args.log_path));
            worker.prewarm();
            run(Session::new(&worker, args.room, assistant)).await
        }
    }
}
