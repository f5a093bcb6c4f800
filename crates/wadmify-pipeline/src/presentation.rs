//! Display region contents, escaping, and clipboard copy.
//!
//! # Design
//! - The manifest is embedded as escaped markup so characters like `<` in annotations
//!   cannot inject elements.
//! - Copy reads back what is displayed (the unescaped markup), not the engine's value.
//! - Success and failure notifications go through distinct [`Notifier`] methods: one is
//!   passive, the other blocks until acknowledged.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{HostError, PipelineError, PipelineResult};
use crate::model::{ManifestResult, SelectedFile};

/// Class placed on the code element for syntax highlighters.
pub const CODE_CLASS: &str = "language-yaml";

const CODE_OPEN: &str = "<pre><code class=\"language-yaml\">";
const CODE_CLOSE: &str = "</code></pre>";

/// Message shown when a copy succeeds.
pub const COPY_SUCCESS_MESSAGE: &str = "Manifest copied to clipboard";

/// Escape text for inclusion in HTML content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Reverse [`escape_html`].
#[must_use]
pub fn unescape_html(markup: &str) -> String {
    // `&amp;` goes last so `&amp;lt;` decodes to `&lt;`, not `<`.
    markup
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// A manifest rendered as escaped, highlightable markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedManifest {
    markup: String,
}

impl RenderedManifest {
    /// Render manifest text into a code block.
    #[must_use]
    pub fn render(manifest: &ManifestResult) -> Self {
        Self {
            markup: format!("{CODE_OPEN}{}{CODE_CLOSE}", escape_html(&manifest.text)),
        }
    }

    /// Full markup for the display region.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Escaped contents of the code block.
    #[must_use]
    pub fn escaped_text(&self) -> &str {
        self.markup
            .strip_prefix(CODE_OPEN)
            .and_then(|rest| rest.strip_suffix(CODE_CLOSE))
            .unwrap_or_default()
    }

    /// Text as the user sees it.
    #[must_use]
    pub fn displayed_text(&self) -> String {
        unescape_html(self.escaped_text())
    }
}

/// Contents of the display region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Region {
    /// Nothing selected yet.
    #[default]
    Empty,
    /// Name and size of the selection (minimal variant).
    FileInfo(SelectedFile),
    /// Selection is being read and converted.
    Processing(SelectedFile),
    /// Rendered manifest (interactive variant).
    Manifest(RenderedManifest),
    /// The last operation failed.
    Failed {
        /// User-facing message.
        message: String,
    },
}

impl Region {
    /// Rendered manifest, when one is displayed.
    #[must_use]
    pub const fn manifest(&self) -> Option<&RenderedManifest> {
        match self {
            Self::Manifest(rendered) => Some(rendered),
            _ => None,
        }
    }

    /// Short state label for logs and tests.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::FileInfo(_) => "file-info",
            Self::Processing(_) => "processing",
            Self::Manifest(_) => "manifest",
            Self::Failed { .. } => "failed",
        }
    }
}

/// System clipboard.
#[async_trait(?Send)]
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), HostError>;
}

/// User notifications.
pub trait Notifier {
    /// Non-blocking success notice.
    fn success(&self, message: &str);

    /// Blocking failure notice.
    fn alert(&self, message: &str);
}

/// Copy the displayed manifest to the clipboard and notify the user.
///
/// The region is never modified.
///
/// # Errors
///
/// Returns [`PipelineError::NothingToCopy`] if no manifest is displayed and
/// [`PipelineError::Clipboard`] when the clipboard write fails.
pub async fn copy_displayed<C, N>(
    region: &Region,
    clipboard: &C,
    notifier: &N,
) -> PipelineResult<()>
where
    C: Clipboard + ?Sized,
    N: Notifier + ?Sized,
{
    let Some(rendered) = region.manifest() else {
        return Err(PipelineError::NothingToCopy);
    };
    let text = rendered.displayed_text();
    match clipboard.write_text(&text).await {
        Ok(()) => {
            info!(chars = text.len(), "manifest copied to clipboard");
            notifier.success(COPY_SUCCESS_MESSAGE);
            Ok(())
        }
        Err(err) => {
            let err = PipelineError::Clipboard { detail: err.detail };
            warn!(error = %err, "clipboard write failed");
            notifier.alert(&err.to_string());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn unescape_reverses_escape_including_literal_entities() {
        for text in [
            "plain",
            "description: <script>alert('x')</script>",
            "already &lt; escaped &amp; text",
            "quote \" and apostrophe '",
            "",
        ] {
            assert_eq!(unescape_html(&escape_html(text)), text);
        }
    }

    #[test]
    fn rendered_manifest_wraps_escaped_text() {
        let rendered = RenderedManifest::render(&ManifestResult {
            text: "name: <demo>\n".to_string(),
        });
        assert_eq!(
            rendered.markup(),
            "<pre><code class=\"language-yaml\">name: &lt;demo&gt;\n</code></pre>"
        );
        assert_eq!(rendered.escaped_text(), "name: &lt;demo&gt;\n");
        assert_eq!(rendered.displayed_text(), "name: <demo>\n");
        assert!(rendered.markup().contains(CODE_CLASS));
    }

    #[test]
    fn region_labels() {
        assert_eq!(Region::default().label(), "empty");
        assert_eq!(
            Region::Failed {
                message: "x".to_string()
            }
            .label(),
            "failed"
        );
        assert!(Region::Empty.manifest().is_none());
    }
}
