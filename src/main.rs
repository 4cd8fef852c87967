use clap::Parser;
use net_sizer::{cli, config, error, input, loader, prompt, report};
use cli::{CatalogArgs, Cli, Commands, OpeningArgs};
use config::Config;
use error::Result;
use net_sizer_common::{parse_discount, FitEngine, OpeningOutcome, OrderSession};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Match { openings, catalog, json } => {
            let engine = prepare(&config, &catalog, !json).await?;
            let outcomes = run_match(&engine, &openings)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
                return Ok(());
            }

            let line = engine.product_line();
            println!("📐 照合結果\n");
            for outcome in &outcomes {
                println!("{}\n", report::opening_text(line, outcome));
            }
            println!("--- 注文メッセージ ---\n");
            println!("{}", report::summary_message(line, &outcomes));
        }

        Commands::Invoice {
            openings,
            catalog,
            tier,
            discount,
            quantities,
            interactive,
        } => {
            let engine = prepare(&config, &catalog, true).await?;
            let outcomes = run_match(&engine, &openings)?;
            let line = engine.product_line();

            for outcome in outcomes.iter().filter(|o| o.result.is_err()) {
                println!("{}", report::opening_text(line, outcome));
            }

            let mut session = OrderSession::from_outcomes(&outcomes, line);
            if session.is_empty() {
                println!("注文できる開口部がありません（上限超過・該当なしは個別にご相談ください）");
                return Ok(());
            }

            for spec in &quantities {
                session.set_quantity(spec.opening_index, spec.quantity)?;
            }

            let (tier, discount_percent) = if interactive {
                println!("📝 請求内容を入力\n");
                prompt::prompt_quantities(&mut session, &line.opening_label)?;
                let tier = prompt::prompt_tier(tier)?;
                (tier, prompt::prompt_discount()?)
            } else {
                (tier, parse_discount(discount.as_deref()).map_err(net_sizer_common::Error::from)?)
            };

            let invoice = session.invoice(tier, discount_percent)?;
            println!("\n🧾 請求書\n");
            println!(
                "{}",
                report::invoice_text(line, &session, tier, &invoice, &config.currency)
            );
            println!("\n--- 管理者向け注文テキスト ---\n");
            println!("{}", report::admin_message(line, &outcomes, &session));
        }

        Commands::Catalog { catalog } => {
            let engine = prepare(&config, &catalog, true).await?;
            let summary = engine.catalog()?.summary();
            println!("{}", report::catalog_summary_text(engine.product_line(), &summary));
        }

        Commands::Config { set_catalog, set_product_line, show } => {
            if let Some(path) = set_catalog {
                config.set_catalog(path)?;
                println!("✔ カタログファイルを保存しました");
            }

            if let Some(name) = set_product_line {
                // プリセット名のみ受け付ける
                loader::resolve_product_line(&name, None)?;
                config.set_product_line(name)?;
                println!("✔ 製品ラインを保存しました");
            }

            if show {
                println!("設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "カタログ: {}",
                    config
                        .catalog_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("製品ライン: {}", config.product_line);
                println!("通貨: {}", config.currency);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 製品ラインを決めてカタログを読み込む
async fn prepare(config: &Config, args: &CatalogArgs, announce: bool) -> Result<FitEngine> {
    let name = args.product_line.as_deref().unwrap_or(&config.product_line);
    let product_line = loader::resolve_product_line(name, args.line_file.as_deref())?;
    let catalog_path = config.resolve_catalog(args.catalog.clone())?;

    if announce {
        println!("- カタログを読み込み中... ({})", product_line.name);
    }
    let engine = loader::prepare_engine(product_line, &catalog_path).await;
    match engine.catalog() {
        Ok(catalog) if announce => println!("✔ {}件のサイズを読み込み\n", catalog.len()),
        Ok(_) => {}
        Err(_) => eprintln!("Failed to load size data. Please try again later."),
    }
    Ok(engine)
}

fn run_match(engine: &FitEngine, openings: &OpeningArgs) -> Result<Vec<OpeningOutcome>> {
    let requests = input::build_requests(&openings.openings, openings.unit(), &openings.color)?;
    Ok(engine.calculate(&requests)?)
}
