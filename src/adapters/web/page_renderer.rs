use std::path::PathBuf;

use error_stack::{Report, ResultExt};
use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    manuscript::Manuscript,
    report::{ManuscriptReport, StatusCounts},
};

#[derive(Error, Debug)]
pub enum PageRenderError {
    #[error("Failed to read template '{0}'")]
    ReadTemplate(String),
    #[error("Failed to render template '{0}'")]
    Render(String),
}

#[derive(Debug, Serialize)]
pub struct ManuscriptRow<'a> {
    #[serde(flatten)]
    pub manuscript: &'a Manuscript,
    /// Whether the catalog link is safe to render as a link.
    pub published: bool,
}

/// Only web links are rendered as anchors; `-`, empty cells and other schemes
/// such as `javascript:` are shown as plain text.
fn is_web_link(link: &str) -> bool {
    let link = link.trim_start().to_ascii_lowercase();
    link.starts_with("https://") || link.starts_with("http://")
}

/// Everything the dashboard template can refer to.
#[derive(Debug, Serialize)]
pub struct DashboardPage<'a> {
    pub manuscripts: Vec<ManuscriptRow<'a>>,
    pub counts: StatusCounts,
    pub has_data: bool,
    pub rejected: Vec<String>,
    pub rejected_count: usize,
}

impl<'a> From<&'a ManuscriptReport> for DashboardPage<'a> {
    fn from(report: &'a ManuscriptReport) -> Self {
        DashboardPage {
            manuscripts: report
                .manuscripts
                .iter()
                .map(|manuscript| ManuscriptRow {
                    manuscript,
                    published: is_web_link(&manuscript.catalog_link),
                })
                .collect(),
            counts: report.counts,
            has_data: !report.is_empty(),
            rejected: report.rejected.iter().map(ToString::to_string).collect(),
            rejected_count: report.rejected.len(),
        }
    }
}

/// Renders the dashboard from a Handlebars template on disk.
///
/// The template is read on every render so edits show up without a restart.
pub struct PageRenderer {
    template_path: PathBuf,
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer")
            .field("template_path", &self.template_path)
            .finish()
    }
}

impl PageRenderer {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            registry: Handlebars::new(),
        }
    }

    #[instrument(skip(report))]
    pub async fn render(
        &self,
        report: &ManuscriptReport,
    ) -> error_stack::Result<String, PageRenderError> {
        let template_name = self.template_path.display().to_string();
        let template = tokio::fs::read_to_string(&self.template_path)
            .await
            .change_context_lazy(|| PageRenderError::ReadTemplate(template_name.clone()))?;

        self.registry
            .render_template(&template, &DashboardPage::from(report))
            .map_err(|e| Report::new(e).change_context(PageRenderError::Render(template_name)))
    }
}
