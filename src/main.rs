use clap::Parser;
use menubar_scrapers::{config, fetch::WebFetcher, menu, sites, Menu, ScrapeError, SiteConfig};
use std::{path::PathBuf, process::ExitCode, time::Duration};
use tracing::{debug, error};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

const FAILURE_GLYPH: &str = "⚠️";

/// Scrape one site and print it in menu-bar plugin syntax.
#[derive(Debug, Parser)]
#[command(name = "menubar-scraper", version, about)]
struct Args {
    /// Site to scrape, built-in or from --config
    #[arg(required_unless_present = "list")]
    site: Option<String>,

    /// JSON file with one site config or an array of them
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the available site names and exit
    #[arg(long)]
    list: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,
}

async fn scrape(site: &SiteConfig, timeout: Duration) -> Result<Menu, ScrapeError> {
    let fetcher = WebFetcher::new(timeout)?;
    let today = chrono::Local::now().naive_local().date();
    debug!("Scrape {} for {}", site.name, today);
    menubar_scrapers::run(site, &fetcher, today).await
}

fn print(menu: &Menu) -> ExitCode {
    let stdout = std::io::stdout();
    match menu::emit(menu, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Could not write menu: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout belongs to the menu-bar host
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "warn,html5ever=error,selectors=error,hyper=warn,reqwest=warn".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();

    let extra = match args.config.as_ref().map(config::load).transpose() {
        Ok(extra) => extra.unwrap_or_default(),
        Err(e) => {
            error!("Could not load {:?}: {}", args.config, e);
            let name = args.site.as_deref().unwrap_or("config");
            print(&Menu::failure(FAILURE_GLYPH, name, &e));
            return ExitCode::FAILURE;
        }
    };

    if args.list {
        for name in sites::names(&extra) {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    let Some(name) = args.site.as_deref() else {
        return ExitCode::FAILURE;
    };

    let site = match sites::find(name, &extra) {
        Ok(site) => site,
        Err(e) => {
            error!("{}", e);
            print(&Menu::failure(FAILURE_GLYPH, name, &e));
            return ExitCode::FAILURE;
        }
    };

    match scrape(&site, Duration::from_secs(args.timeout)).await {
        Ok(menu) => print(&menu),
        Err(e) => {
            error!("Scraping {} failed: {}", site.name, e);
            print(&Menu::failure(&site.glyph, &site.name, &e));
            ExitCode::FAILURE
        }
    }
}
