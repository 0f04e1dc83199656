use crate::{FetchStrategy, PageRequest, PageSource, ScrapeError};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Plain GET for server-rendered pages.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }

    pub async fn get(&self, url: &Url) -> Result<String, ScrapeError> {
        debug!("Visit {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Headless Chrome for pages that build their listings with scripts.
#[cfg(feature = "browser")]
#[derive(Debug, Clone)]
pub struct BrowserFetcher {
    timeout: Duration,
}

#[cfg(feature = "browser")]
impl BrowserFetcher {
    pub fn new(timeout: Duration) -> Self {
        BrowserFetcher { timeout }
    }

    pub async fn get(&self, url: &Url, wait_for: Option<&str>) -> Result<String, ScrapeError> {
        debug!("Render {}", url);
        let url = url.to_string();
        let wait_for = wait_for.map(ToString::to_string);
        let timeout = self.timeout;
        tokio::task::spawn_blocking(move || render(&url, wait_for.as_deref(), timeout)).await?
    }
}

#[cfg(feature = "browser")]
fn render(url: &str, wait_for: Option<&str>, timeout: Duration) -> Result<String, ScrapeError> {
    use headless_chrome::{Browser, LaunchOptions};

    let browser_err = |e: &dyn std::fmt::Display| ScrapeError::Browser(e.to_string());

    let options = LaunchOptions::default_builder()
        .headless(true)
        .window_size(Some((1440, 900)))
        .idle_browser_timeout(timeout * 2)
        .build()
        .map_err(|e| browser_err(&e))?;
    let browser = Browser::new(options).map_err(|e| browser_err(&e))?;
    let tab = browser.new_tab().map_err(|e| browser_err(&e))?;
    tab.set_default_timeout(timeout);

    tab.navigate_to(url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| browser_err(&e))?;
    if let Some(selector) = wait_for {
        debug!("Wait for {} on {}", selector, url);
        tab.wait_for_element(selector).map_err(|e| browser_err(&e))?;
    }
    tab.get_content().map_err(|e| browser_err(&e))
}

/// Picks the fetcher matching each request's strategy.
#[derive(Debug, Clone)]
pub struct WebFetcher {
    http: HttpFetcher,
    #[cfg(feature = "browser")]
    browser: BrowserFetcher,
}

impl WebFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        Ok(WebFetcher {
            http: HttpFetcher::new(timeout)?,
            #[cfg(feature = "browser")]
            browser: BrowserFetcher::new(timeout),
        })
    }
}

#[async_trait::async_trait]
impl PageSource for WebFetcher {
    async fn fetch(&self, request: &PageRequest<'_>) -> Result<String, ScrapeError> {
        match request.strategy {
            FetchStrategy::Static => self.http.get(request.url).await,
            #[cfg(feature = "browser")]
            FetchStrategy::Rendered => self.browser.get(request.url, request.wait_for).await,
            #[cfg(not(feature = "browser"))]
            FetchStrategy::Rendered => Err(ScrapeError::BrowserUnavailable(request.url.to_string())),
        }
    }
}
