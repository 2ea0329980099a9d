use anyhow::{Context, Result};
use oportuna_common::CourseRecord;
use oportuna_config::OportunaConfig;
use oportuna_drivers::ev_browser::driver::BrowserSettings;
use oportuna_drivers::ev_browser::scroll::ScrollSettings;
use oportuna_scrape::catalog::CourseCatalog;
use oportuna_scrape::source::BrowserListingSource;
use oportuna_shell::render::Layout;
use oportuna_shell::welcome::ShellSession;
use oportuna_shell::{dataset, filter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
    Csv,
}

/// Run the scrape pipeline once and write the collected records.
pub async fn scrape(cfg: &OportunaConfig, format: OutputFormat, out: Option<&Path>) -> Result<()> {
    let listing_url = Url::parse(&cfg.scrape.listing_url)
        .with_context(|| format!("invalid listing URL: {}", cfg.scrape.listing_url))?;
    // Course links resolve against the listing's origin.
    let base = listing_url.join("/")?;

    let source = BrowserListingSource::new(
        listing_url,
        BrowserSettings {
            webdriver_url: cfg.scrape.webdriver_url.clone(),
            headless: cfg.scrape.headless,
        },
        ScrollSettings {
            settle: Duration::from_secs(cfg.scrape.settle_secs),
            max_rounds: cfg.scrape.max_scroll_rounds,
        },
    );
    let catalog = CourseCatalog::new(Arc::new(source), base);

    let records = catalog.fetch().await?;
    info!(count = records.len(), "scrape finished");

    let output = match format {
        OutputFormat::Html => {
            let rows = dataset::from_scraped(&records, &cfg.shell.source_label);
            ShellSession::skip_welcome().render(&rows, Layout::Table)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&*records)?,
        OutputFormat::Csv => encode_csv(&records)?,
    };

    emit(out, &output)
}

pub struct RenderArgs {
    pub dataset: Option<PathBuf>,
    pub area: Option<String>,
    pub fonte: Option<String>,
    pub duracao: Option<String>,
    pub cards: bool,
    pub welcome: bool,
    pub out: Option<PathBuf>,
}

/// Filter the classified dataset and render it with the presentation shell.
pub fn render(cfg: &OportunaConfig, args: RenderArgs) -> Result<()> {
    let path = args.dataset.unwrap_or_else(|| cfg.shell.dataset.clone());
    let rows = dataset::load_classified(&path)?;

    let selection = filter::FilterSelection::from_labels(args.area, args.fonte, args.duracao);
    let filtered = filter::apply(&rows, &selection);
    info!(total = rows.len(), kept = filtered.len(), "filters applied");

    if filtered.is_empty() && selection != filter::FilterSelection::default() {
        info!(
            areas = ?filter::options(&rows, |r| &r.area),
            fontes = ?filter::options(&rows, |r| &r.fonte),
            duracoes = ?filter::options(&rows, |r| &r.duracao),
            "no rows matched the selection; valid filter values listed"
        );
    }

    let layout = if args.cards { Layout::Cards } else { Layout::Table };

    let mut session = ShellSession::new();
    let mut output = String::new();
    if args.welcome {
        // One-shot rendering: show the panel, then treat this invocation as
        // the user starting to explore.
        output.push_str(&session.render(&filtered, layout));
        output.push('\n');
    }
    session.acknowledge();
    output.push_str(&session.render(&filtered, layout));

    emit(args.out.as_deref(), &output)
}

fn encode_csv(records: &[CourseRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush csv output: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn emit(out: Option<&Path>, output: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = output.len(), "output written");
        }
        None => println!("{output}"),
    }
    Ok(())
}
