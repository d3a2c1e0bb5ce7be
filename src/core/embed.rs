//! Isolated surface for server-rendered plot documents.
//!
//! The scatter endpoint returns a complete HTML document with its own
//! scripts. It is not sanitized here. Instead it is placed inside a sandboxed
//! `<iframe srcdoc>` on a small host page, which the system browser opens.
//! The sandbox allows scripts and same-origin resource loading and nothing
//! else: no top-level navigation, popups, forms or downloads.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::SurfaceError;

/// Capabilities granted to the embedded document.
pub const SANDBOX: &str = "allow-scripts allow-same-origin";

const HOST_FILE: &str = "scatter.html";

pub struct EmbedSurface {
    dir: PathBuf,
}

impl EmbedSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Location of the host page.
    pub fn page_path(&self) -> PathBuf {
        self.dir.join(HOST_FILE)
    }

    /// Replace the host page with one embedding `markup`.
    ///
    /// The page is written to a sibling file and renamed over the previous
    /// one, so a reader never sees a half-written document.
    pub fn mount(&self, markup: &str) -> Result<PathBuf, SurfaceError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.page_path();
        let staging = self.dir.join(format!("{HOST_FILE}.tmp"));
        fs::write(&staging, host_page(markup))?;
        fs::rename(&staging, &target)?;
        log::info!("Mounted {} byte document at {}", markup.len(), target.display());
        Ok(target)
    }

    /// Hand a mounted page to the system browser.
    pub fn open(&self, page: &Path) -> Result<(), SurfaceError> {
        open::that_detached(page).map_err(|e| SurfaceError::Open {
            path: page.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Host page wrapping `markup` in the sandboxed frame.
pub fn host_page(markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Scatter</title>\n\
         <style>html,body{{margin:0;height:100%;background:#0b121a}}\
         iframe{{border:0;width:100%;height:100%}}</style>\n\
         </head>\n\
         <body>\n\
         <iframe sandbox=\"{SANDBOX}\" srcdoc=\"{}\"></iframe>\n\
         </body>\n\
         </html>\n",
        escape_attribute(markup)
    )
}

/// Escape text for a double-quoted HTML attribute value.
pub fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
