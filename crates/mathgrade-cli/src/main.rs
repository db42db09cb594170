use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mathgrade_core::judge::{JudgeRuntimeConfig, SemanticJudge};
use mathgrade_core::model::CaseStatus;
use mathgrade_core::providers::llm::openai::OpenAIClient;
use mathgrade_core::storage::judge_cache::JudgeCache;
use mathgrade_core::storage::Store;

mod templates;

#[derive(Parser)]
#[command(
    name = "mathgrade",
    version,
    about = "Answer-equivalence evaluation for math solver outputs"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    Run(RunArgs),
    Init(InitArgs),
    Version,
}

#[derive(Parser, Clone)]
struct RunArgs {
    #[arg(long, default_value = "eval.yaml")]
    config: PathBuf,
    #[arg(long, default_value = ".eval/judge-cache.db")]
    db: PathBuf,

    /// semantic judge provider: none|openai
    #[arg(long, default_value = "none")]
    judge: String,
    #[arg(long, default_value = "gpt-4.1")]
    judge_model: String,
    /// re-query the judge even when a cached score exists
    #[arg(long)]
    refresh_judge: bool,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// require exact normalized equality for accuracy
    #[arg(long)]
    strict_matching: bool,

    /// write the full run artifact as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// write the per-case summary table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Parser, Clone)]
struct InitArgs {
    #[arg(long, default_value = "eval.yaml")]
    config: PathBuf,

    /// generate .gitignore for cache/artifacts
    #[arg(long)]
    gitignore: bool,
}

mod exit_codes {
    pub const OK: i32 = 0;
    pub const TEST_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::CONFIG_ERROR
        }
    };
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::Run(args) => cmd_run(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<i32> {
    if !args.config.exists() {
        if let Some(parent) = args.config.parent() {
            std::fs::create_dir_all(parent)?;
        }
        mathgrade_core::config::write_sample_config(&args.config)?;
        eprintln!("created {}", args.config.display());
    } else {
        eprintln!("note: {} already exists", args.config.display());
    }

    if args.gitignore {
        let path = std::path::Path::new(".gitignore");
        if !path.exists() {
            std::fs::write(path, templates::GITIGNORE)?;
            eprintln!("created {}", path.display());
        } else {
            eprintln!("note: {} already exists (skipped)", path.display());
        }
    }

    Ok(exit_codes::OK)
}

async fn cmd_run(args: RunArgs) -> anyhow::Result<i32> {
    let mut cfg =
        mathgrade_core::config::load_config(&args.config).map_err(|e| anyhow::anyhow!(e))?;
    if args.strict_matching {
        cfg.settings.strict_matching = Some(true);
    }

    let judge = build_judge(&args, &cfg.settings)?;
    let metrics = mathgrade_metrics::default_metrics(&cfg.settings, judge)?;

    let runner = mathgrade_core::engine::runner::Runner { metrics };
    let artifacts = runner.run_suite(&cfg).await?;

    mathgrade_core::report::console::print_summary(&artifacts);

    if let Some(path) = &args.json {
        mathgrade_core::report::json::write_json(&artifacts, path)?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(path) = &args.csv {
        mathgrade_core::report::csv::write_csv(&artifacts.results, path)?;
        eprintln!("wrote {}", path.display());
    }

    let any_fail = artifacts
        .results
        .iter()
        .any(|r| matches!(r.status, CaseStatus::Fail | CaseStatus::Error));
    Ok(if any_fail {
        exit_codes::TEST_FAILED
    } else {
        exit_codes::OK
    })
}

fn build_judge(
    args: &RunArgs,
    settings: &mathgrade_core::model::Settings,
) -> anyhow::Result<Option<Arc<SemanticJudge>>> {
    match args.judge.as_str() {
        "none" => Ok(None),
        "openai" => {
            let api_key = args.openai_api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("config error: --judge openai requires OPENAI_API_KEY")
            })?;

            if let Some(parent) = args.db.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let store = Store::open(&args.db)?;
            store.init_schema()?;
            let cache = JudgeCache::new(store);

            let config = JudgeRuntimeConfig {
                provider: "openai".into(),
                model: args.judge_model.clone(),
                timeout: Duration::from_secs(settings.judge_timeout_seconds.unwrap_or(15)),
                refresh: args.refresh_judge,
                ..JudgeRuntimeConfig::default()
            };
            let client = OpenAIClient::new(
                config.model.clone(),
                api_key,
                config.temperature,
                config.max_tokens,
            );
            Ok(Some(Arc::new(SemanticJudge::new(
                config,
                Arc::new(client),
                Some(cache),
            ))))
        }
        other => anyhow::bail!("config error: unknown judge provider '{}'", other),
    }
}
