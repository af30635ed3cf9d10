//! Scoped headless browser process.
//!
//! A `BrowserSession` owns the launched Chromium process and the task driving
//! its CDP connection. Call [`BrowserSession::close`] on every path; if a
//! session is dropped without being closed (an early `?` return, a timeout
//! cancelling the future) the process is shut down from `Drop` instead.

use std::path::Path;

use chromiumoxide::browser::{Browser, BrowserConfig as LaunchConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::ports::ExportError;

/// Launch options for a single session.
#[derive(Debug, Clone, Copy)]
pub struct LaunchOptions {
    pub no_sandbox: bool,
}

pub struct BrowserSession {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
}

impl BrowserSession {
    /// Launches `executable` headless and starts driving its event loop.
    pub async fn launch(executable: &Path, options: LaunchOptions) -> Result<Self, ExportError> {
        let mut builder = LaunchConfig::builder()
            .chrome_executable(executable)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--font-render-hinting=none");
        if options.no_sandbox {
            builder = builder.no_sandbox();
        }
        let config = builder
            .build()
            .map_err(|e| ExportError::service_unavailable(format!("invalid browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            ExportError::service_unavailable(format!(
                "failed to launch {}: {}",
                executable.display(),
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "Browser handler stopped");
                    break;
                }
            }
        });

        tracing::debug!(executable = %executable.display(), "Browser launched");
        Ok(Self {
            browser: Some(browser),
            handler: Some(handler),
        })
    }

    /// Opens a blank page.
    pub async fn new_page(&self) -> Result<Page, ExportError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| ExportError::pdf_failed("browser session already closed"))?;
        browser
            .new_page("about:blank")
            .await
            .map_err(|e| ExportError::pdf_failed(format!("failed to open page: {}", e)))
    }

    /// Closes the browser and waits for the process to exit.
    pub async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                tracing::warn!(error = %e, "Failed to close browser cleanly");
            }
            if let Err(e) = browser.wait().await {
                tracing::warn!(error = %e, "Failed to wait for browser exit");
            }
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        tracing::debug!("Browser closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let Some(mut browser) = self.browser.take() else {
            return;
        };
        let handler = self.handler.take();

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                tracing::debug!("Browser session dropped without close; shutting down");
                runtime.spawn(async move {
                    let _ = browser.close().await;
                    let _ = browser.wait().await;
                    if let Some(handler) = handler {
                        handler.abort();
                    }
                });
            }
            Err(_) => {
                tracing::warn!("Browser session dropped outside a runtime; process may linger");
                if let Some(handler) = handler {
                    handler.abort();
                }
            }
        }
    }
}
