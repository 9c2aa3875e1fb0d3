mod commands;
mod context;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "preset")]
#[command(about = "クラスタ作成用のクレデンシャルプリセット", long_about = None)]
struct Cli {
    /// ストアディレクトリ（設定とシードより優先）
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// 可視性チェックに使うメールアドレス
    #[arg(long, global = true)]
    email: Option<String>,

    /// プロジェクト
    #[arg(long, global = true)]
    project: Option<String>,

    /// 出力形式
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// デバッグログを有効化
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 参照可能なプリセットを一覧表示
    List,
    /// プリセットの詳細を表示
    Get {
        /// プリセット名
        name: String,
    },
    /// プリセットのクレデンシャルをクラウド設定にバインド
    Bind {
        /// プリセット名
        name: String,
        /// バインドするプロバイダー（例: aws, AWS, vsphere）
        #[arg(long)]
        provider: Option<String>,
        /// 元にするクラウド設定（JSON）
        #[arg(long)]
        cloud_spec: Option<PathBuf>,
        /// デフォルト値を適用するデータセンター
        #[arg(long)]
        datacenter: Option<String>,
        /// データセンターを定義したマニフェスト（省略時は自動検出）
        #[arg(short = 'f', long)]
        manifest: Option<PathBuf>,
    },
    /// マニフェストの全プリセットを作成・更新
    Apply {
        /// マニフェストのパス（省略時は自動検出）
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
        /// 書き込まずに変更内容のみ表示
        #[arg(long)]
        dry_run: bool,
    },
    /// マニフェストをパースして検証
    Validate {
        /// マニフェストのパス（省略時は自動検出）
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },
    /// プロバイダーとOSに対応するSSHログイン名
    SshUser {
        /// クラウドプロバイダー
        #[arg(long)]
        provider: Option<String>,
        /// OS
        #[arg(long)]
        os: Option<String>,
    },
    /// バージョン情報を表示
    Version,
}

/// ログはstderrへ出力（stdoutはコマンド結果用）
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let globals = context::GlobalArgs {
        store: cli.store,
        email: cli.email,
        project: cli.project,
        output: cli.output,
    };

    match cli.command {
        Commands::Version => {
            println!("presetflow {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate { file } => {
            commands::validate::handle(file).await?;
        }
        Commands::SshUser { provider, os } => {
            commands::ssh_user::handle(provider.as_deref(), os.as_deref(), globals.output)?;
        }
        Commands::List => {
            let ctx = context::Context::load(globals)?;
            commands::list::handle(&ctx).await?;
        }
        Commands::Get { name } => {
            let ctx = context::Context::load(globals)?;
            commands::get::handle(&ctx, &name).await?;
        }
        Commands::Bind {
            name,
            provider,
            cloud_spec,
            datacenter,
            manifest,
        } => {
            let ctx = context::Context::load(globals)?;
            let args = commands::bind::BindArgs {
                name,
                provider,
                cloud_spec,
                datacenter,
                manifest,
            };
            commands::bind::handle(&ctx, args).await?;
        }
        Commands::Apply { file, dry_run } => {
            let ctx = context::Context::load(globals)?;
            commands::apply::handle(&ctx, file, dry_run).await?;
        }
    }

    Ok(())
}
