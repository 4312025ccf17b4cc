//! One Chromium instance, one page, owned for the whole run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use flow::{FlowError, Locator, PageDriver};

use super::js;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    screenshot_dir: PathBuf,
    nav_timeout: Duration,
}

impl BrowserSession {
    pub async fn launch(
        headed: bool,
        screenshot_dir: &Path,
        nav_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(1920, 1080)
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage");
        if headed {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(|e| anyhow::anyhow!(e))?;

        debug!(target = "clawlogin", headed, "launching chromium");
        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        page.set_user_agent(SetUserAgentOverrideParams::new(USER_AGENT))
            .await?;

        Ok(Self {
            browser,
            page,
            handler_task,
            screenshot_dir: screenshot_dir.to_path_buf(),
            nav_timeout,
        })
    }

    /// Close the browser. Runs on every exit path, including interrupts.
    pub async fn close(mut self) {
        if let Err(err) = self.browser.close().await {
            warn!(target = "clawlogin", error = %err, "browser did not close cleanly");
            self.handler_task.abort();
            return;
        }
        if tokio::time::timeout(Duration::from_secs(5), &mut self.handler_task)
            .await
            .is_err()
        {
            self.handler_task.abort();
        }
    }

    async fn eval_bool(&self, script: String) -> bool {
        match self.page.evaluate(script).await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            Err(err) => {
                debug!(target = "clawlogin", error = %err, "script evaluation failed");
                false
            }
        }
    }
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn navigate(&self, url: &str) -> flow::Result<()> {
        match tokio::time::timeout(self.nav_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(FlowError::Automation(format!(
                "navigation to {url} failed: {err}"
            ))),
            Err(_) => Err(FlowError::Automation(format!("navigation to {url} timed out"))),
        }
    }

    async fn current_url(&self) -> String {
        match self.page.url().await {
            Ok(Some(url)) => url,
            Ok(None) => String::new(),
            Err(err) => {
                warn!(target = "clawlogin", error = %err, "could not read the current URL");
                String::new()
            }
        }
    }

    async fn wait_for_idle(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.page.wait_for_navigation())
            .await
            .is_ok()
    }

    async fn click_first(&self, candidates: &[Locator]) -> bool {
        self.eval_bool(js::click_first(candidates)).await
    }

    async fn fill_first(&self, candidates: &[Locator], value: &str) -> bool {
        self.eval_bool(js::fill_first(candidates, value)).await
    }

    async fn press_enter(&self, candidates: &[Locator]) -> bool {
        self.eval_bool(js::press_enter(candidates)).await
    }

    async fn read_text(&self, candidates: &[Locator]) -> Option<String> {
        match self.page.evaluate(js::read_text(candidates)).await {
            Ok(result) => result.into_value::<Option<String>>().ok().flatten(),
            Err(_) => None,
        }
    }

    async fn has_text(&self, needle: &str) -> bool {
        self.eval_bool(js::has_text(needle)).await
    }

    async fn matches_any(&self, candidates: &[Locator]) -> bool {
        self.eval_bool(js::matches_any(candidates)).await
    }

    async fn capture(&self, name: &str) {
        let path = self.screenshot_dir.join(format!("{name}.png"));
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(err) = std::fs::create_dir_all(parent) {
                    warn!(target = "clawlogin", error = %err, "could not create the screenshot directory");
                    return;
                }
            }
        }
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();
        match self.page.save_screenshot(params, &path).await {
            Ok(_) => info!(target = "clawlogin", path = %path.display(), "checkpoint saved"),
            Err(err) => warn!(target = "clawlogin", error = %err, "screenshot failed"),
        }
    }
}
