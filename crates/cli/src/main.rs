use std::path::PathBuf;

use anyhow::Context;
use clap::{Arg, ArgAction, Command, value_parser};

use mockgen_cli::{CliConfig, DraftScript, render_product, render_sku_listing};

fn cli() -> Command {
    let draft_arg = Arg::new("draft")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to the JSON draft script");

    Command::new("mockgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate mock product catalogs from variation axes")
        .subcommand_required(true)
        .arg(
            Arg::new("currency")
                .long("currency")
                .global(true)
                .help("Currency symbol for price texts (overrides MOCKGEN_CURRENCY_SYMBOL)"),
        )
        .subcommand(
            Command::new("generate")
                .about("Print the generated product as JSON")
                .arg(draft_arg.clone())
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue)
                        .help("Single-line JSON instead of pretty-printed"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write JSON to a file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("skus")
                .about("List generated SKUs with their badges and missing fields")
                .arg(draft_arg),
        )
}

fn main() -> anyhow::Result<()> {
    mockgen_observability::init();

    let matches = cli().get_matches();

    let mut config = CliConfig::from_env();
    if let Some(symbol) = matches.get_one::<String>("currency") {
        config = config.with_currency_symbol(symbol.clone());
    }

    match matches.subcommand() {
        Some(("generate", sub)) => {
            let path = sub
                .get_one::<PathBuf>("draft")
                .context("missing draft path")?;
            let draft = DraftScript::load(path)?.replay(&config)?;
            let json = render_product(&draft, sub.get_flag("compact"))?;

            match sub.get_one::<PathBuf>("output") {
                Some(output) => {
                    std::fs::write(output, json + "\n")
                        .with_context(|| format!("failed to write {}", output.display()))?;
                    tracing::info!(path = %output.display(), "product written");
                }
                None => println!("{json}"),
            }
        }
        Some(("skus", sub)) => {
            let path = sub
                .get_one::<PathBuf>("draft")
                .context("missing draft path")?;
            let draft = DraftScript::load(path)?.replay(&config)?;
            print!("{}", render_sku_listing(&draft));
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}
