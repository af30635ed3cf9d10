//! Headless Chromium export service adapter.
//!
//! HTML is rendered in-process by [`render_document`]. PDF export loads that
//! document into a headless Chromium page and prints it:
//!
//! 1. resolve an executable through the [`BrowserResolverChain`]
//! 2. launch a scoped [`BrowserSession`]
//! 3. set the page content and wait for it to load
//! 4. emulate `screen` media, then print honoring the CSS `@page` size
//!
//! The whole pipeline runs under the configured render timeout. The session
//! is closed on success and on every error, including the timeout.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::SetEmulatedMediaParams;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;

use super::browser_resolvers::BrowserResolverChain;
use super::browser_session::{BrowserSession, LaunchOptions};
use super::html_renderer::render_document;
use crate::config::BrowserConfig;
use crate::ports::{DocumentExportService, ExportError};

/// Export service printing PDFs through headless Chromium.
#[derive(Clone)]
pub struct ChromiumExportService {
    resolvers: BrowserResolverChain,
    launch_options: LaunchOptions,
    render_timeout: Duration,
}

impl ChromiumExportService {
    pub fn new(resolvers: BrowserResolverChain, render_timeout: Duration) -> Self {
        Self {
            resolvers,
            launch_options: LaunchOptions { no_sandbox: true },
            render_timeout,
        }
    }

    /// Service using the default resolver chain for `config`.
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(
            BrowserResolverChain::from_config(config),
            config.render_timeout(),
        )
        .with_no_sandbox(config.no_sandbox)
    }

    pub fn with_no_sandbox(mut self, no_sandbox: bool) -> Self {
        self.launch_options.no_sandbox = no_sandbox;
        self
    }

    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        let executable = self.resolvers.resolve().await?;
        let session = BrowserSession::launch(&executable, self.launch_options).await?;

        let result = print_page(&session, html).await;
        session.close().await;
        result
    }
}

async fn print_page(session: &BrowserSession, html: &str) -> Result<Vec<u8>, ExportError> {
    let page = session.new_page().await?;

    page.set_content(html)
        .await
        .map_err(|e| ExportError::pdf_failed(format!("failed to load page content: {}", e)))?;

    page.execute(SetEmulatedMediaParams::builder().media("screen").build())
        .await
        .map_err(|e| ExportError::pdf_failed(format!("failed to emulate media: {}", e)))?;

    let params = PrintToPdfParams {
        print_background: Some(true),
        prefer_css_page_size: Some(true),
        ..Default::default()
    };
    let pdf = page
        .pdf(params)
        .await
        .map_err(|e| ExportError::pdf_failed(format!("failed to print page: {}", e)))?;

    if pdf.is_empty() {
        return Err(ExportError::pdf_failed("browser returned an empty PDF"));
    }
    Ok(pdf)
}

#[async_trait]
impl DocumentExportService for ChromiumExportService {
    async fn to_pdf(&self, markdown: &str, title: &str) -> Result<Vec<u8>, ExportError> {
        let html = render_document(markdown, title);

        let started = std::time::Instant::now();
        let pdf = tokio::time::timeout(self.render_timeout, self.render_pdf(&html))
            .await
            .map_err(|_| ExportError::Timeout(self.render_timeout.as_secs()))??;

        tracing::debug!(
            bytes = pdf.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "PDF rendered"
        );
        Ok(pdf)
    }

    async fn to_html(&self, markdown: &str, title: &str) -> Result<String, ExportError> {
        Ok(render_document(markdown, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::ExplicitPathResolver;
    use std::sync::Arc;

    fn unresolvable() -> ChromiumExportService {
        let chain = BrowserResolverChain::new(vec![Arc::new(ExplicitPathResolver::new(None))]);
        ChromiumExportService::new(chain, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn html_export_needs_no_browser() {
        let html = unresolvable().to_html("# Hi", "T & C").await.unwrap();
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<title>T &amp; C</title>"));
    }

    #[tokio::test]
    async fn pdf_export_without_browser_is_a_configuration_error() {
        let err = unresolvable().to_pdf("# Hi", "dossie").await.unwrap_err();
        assert!(matches!(err, ExportError::ServiceUnavailable(_)));
        assert!(err.to_string().contains("explicit-path"));
    }

    #[test]
    fn from_config_carries_sandbox_flag() {
        let config = BrowserConfig {
            no_sandbox: false,
            render_timeout_secs: 30,
            ..Default::default()
        };
        let service = ChromiumExportService::from_config(&config);
        assert!(!service.launch_options.no_sandbox);
        assert_eq!(service.render_timeout, Duration::from_secs(30));
    }

    /// PIDs whose command line is exactly `argv`.
    #[cfg(target_os = "linux")]
    fn processes_running(argv: &[&str]) -> Vec<String> {
        let expected: Vec<u8> = argv.iter().flat_map(|a| a.bytes().chain([0])).collect();
        std::fs::read_dir("/proc")
            .unwrap()
            .flatten()
            .filter(|entry| entry.file_name().to_string_lossy().bytes().all(|b| b.is_ascii_digit()))
            .filter(|entry| {
                std::fs::read(entry.path().join("cmdline")).map_or(false, |c| c == expected)
            })
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn hung_browser_times_out_and_is_killed() {
        use std::os::unix::fs::PermissionsExt;

        let marker = (400_000 + std::process::id()).to_string();
        let dir = tempfile::tempdir().unwrap();
        let browser = dir.path().join("chrome");
        std::fs::write(&browser, format!("#!/bin/sh\nexec sleep {}\n", marker)).unwrap();
        std::fs::set_permissions(&browser, std::fs::Permissions::from_mode(0o755)).unwrap();

        let chain =
            BrowserResolverChain::new(vec![Arc::new(ExplicitPathResolver::new(Some(browser)))]);
        let service = ChromiumExportService::new(chain, Duration::from_secs(2));

        let err = service.to_pdf("# Hi", "dossie").await.unwrap_err();
        assert!(matches!(err, ExportError::Timeout(2)), "got {err:?}");

        let argv = ["sleep", marker.as_str()];
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !processes_running(&argv).is_empty() && std::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(processes_running(&argv).is_empty(), "browser process left running");
    }
}
