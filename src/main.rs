//! Pressline CLI

use std::{
    io::{self, Write},
    num::NonZeroU32,
    path::PathBuf,
    process::ExitCode,
    str::FromStr,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::{Zoned, civil::DateTime};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pressline::{
    cart::CartError,
    catalog::{CatalogError, ProductId},
    config::{ConfigError, Settings},
    draft::OrderDraft,
    i18n::Language,
    pricing::DeliveryMethod,
    report::{ReportError, write_catalog, write_quote, write_slots},
    slots::generate,
};

#[derive(Debug, Parser)]
#[command(name = "pressline", about = "Ironing service ordering core", long_about = None)]
struct Cli {
    /// Settings file; the bundled settings are used when omitted
    #[arg(long, global = true, env = "PRESSLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Display language (he, fr)
    #[arg(long, global = true, env = "PRESSLINE_LANGUAGE", default_value = "he")]
    language: Language,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the garments on offer
    Catalog,

    /// List bookable slots
    Slots(SlotsArgs),

    /// Price a cart
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
struct SlotsArgs {
    /// Local wall-clock time to generate from, e.g. 2026-10-17T12:00; defaults to now
    #[arg(long)]
    at: Option<DateTime>,

    /// Days to look ahead; defaults to the configured horizon
    #[arg(long)]
    days: Option<u32>,
}

#[derive(Debug, Args)]
struct QuoteArgs {
    /// Garment to add, as ID or IDxQUANTITY; repeatable
    #[arg(long = "item", required = true)]
    items: Vec<ItemArg>,

    /// Delivery method (pickup-and-return, pickup-only, return-only, drop-off)
    #[arg(long, default_value = "pickup-and-return")]
    method: DeliveryMethod,

    /// Customer lives in the provider's building
    #[arg(long)]
    same_building: bool,
}

#[derive(Debug, Clone, Copy)]
struct ItemArg {
    product: ProductId,
    quantity: NonZeroU32,
}

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = s.split_once('x').unwrap_or((s, "1"));

        let product = id
            .trim()
            .parse::<u32>()
            .map_err(|err| format!("invalid product id {id:?}: {err}"))?;

        let quantity = quantity
            .trim()
            .parse::<NonZeroU32>()
            .map_err(|err| format!("invalid quantity {quantity:?}: {err}"))?;

        Ok(Self {
            product: ProductId(product),
            quantity,
        })
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            #[expect(
                clippy::print_stderr,
                reason = "errors are reported to the user regardless of the log filter"
            )]
            {
                eprintln!("{err}");
            }

            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::new(&cli.log_level);

    match cli.log_format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings<'static>, ConfigError> {
    match &cli.config {
        Some(path) => Settings::from_path(path),
        None => Settings::bundled(),
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = load_settings(cli)?;
    let out = io::stdout().lock();

    match &cli.command {
        Commands::Catalog => write_catalog(out, &settings.catalog, cli.language)?,
        Commands::Slots(args) => slots(out, &settings, args, cli.language)?,
        Commands::Quote(args) => quote(out, &settings, args, cli.language)?,
    }

    Ok(())
}

fn slots(
    mut out: impl Write,
    settings: &Settings<'_>,
    args: &SlotsArgs,
    language: Language,
) -> Result<(), CliError> {
    let now = args.at.unwrap_or_else(|| Zoned::now().datetime());
    let days = args.days.unwrap_or(settings.horizon_days);

    debug!(%now, days, "generating slots");

    let slots = generate(&settings.calendar, days, now);

    writeln!(out, "{} slot(s) from {now}", slots.len())?;
    write_slots(out, &slots, language)?;

    Ok(())
}

fn quote(
    out: impl Write,
    settings: &Settings<'_>,
    args: &QuoteArgs,
    language: Language,
) -> Result<(), CliError> {
    let mut draft = OrderDraft::new(settings.currency());

    draft.set_delivery_method(args.method);
    draft.customer.is_same_building = args.same_building;

    for item in &args.items {
        draft.cart.add(settings.catalog.get(item.product)?)?;

        let current = draft
            .cart
            .line(item.product)
            .map_or(1, |line| line.quantity().get());

        draft.cart.set_quantity(
            item.product,
            current.saturating_add(item.quantity.get() - 1),
        )?;
    }

    write_quote(out, &draft, &settings.delivery, language)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn item_arg_defaults_to_one() -> TestResult {
        let item: ItemArg = "3".parse()?;

        assert_eq!(item.product, ProductId(3));
        assert_eq!(item.quantity.get(), 1);

        Ok(())
    }

    #[test]
    fn item_arg_reads_quantity() -> TestResult {
        let item: ItemArg = "2x4".parse()?;

        assert_eq!(item.product, ProductId(2));
        assert_eq!(item.quantity.get(), 4);

        Ok(())
    }

    #[test]
    fn item_arg_rejects_zero_and_garbage() {
        assert!("2x0".parse::<ItemArg>().is_err());
        assert!("shirt".parse::<ItemArg>().is_err());
    }

    #[test]
    fn cli_parses_quote() -> TestResult {
        let cli = Cli::try_parse_from([
            "pressline",
            "--language",
            "fr",
            "quote",
            "--item",
            "2x2",
            "--item",
            "1",
            "--method",
            "pickup-only",
            "--same-building",
        ])?;

        let Commands::Quote(args) = cli.command else {
            return Err("expected quote".into());
        };

        assert_eq!(cli.language, Language::Fr);
        assert_eq!(args.items.len(), 2);
        assert_eq!(args.method, DeliveryMethod::PickupOnly);
        assert!(args.same_building);

        Ok(())
    }

    #[test]
    fn quote_merges_repeated_items() -> TestResult {
        let settings = Settings::bundled()?;
        let args = QuoteArgs {
            items: vec!["2x2".parse()?, "2".parse()?],
            method: DeliveryMethod::PickupAndReturn,
            same_building: false,
        };

        let mut out = Vec::new();
        quote(&mut out, &settings, &args, Language::Fr)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Chemise"));
        assert!(text.contains(" 3 "));

        Ok(())
    }
}
