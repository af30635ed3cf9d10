//! Document adapters - Markdown rendering and PDF printing.
//!
//! - `html_renderer` - Markdown to a print-styled HTML document
//! - `ChromiumExportService` - `DocumentExportService` backed by headless Chromium
//! - Browser resolvers - Ordered strategies for locating a Chromium executable

mod browser_resolvers;
mod browser_session;
mod chromium_export_service;
mod html_renderer;

pub use browser_resolvers::{
    BrowserResolverChain, CloudPackagedResolver, CloudPlatform, ExplicitPathResolver,
    LocalInstallResolver,
};
pub use browser_session::{BrowserSession, LaunchOptions};
pub use chromium_export_service::ChromiumExportService;
pub use html_renderer::{html_escape, markdown_to_html, render_document, wrap_html};
