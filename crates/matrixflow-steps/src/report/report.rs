//! A small HTML report builder.
//!
//! Reports are assembled from titled sections, each holding maud content
//! blocks and plotly charts in insertion order, and rendered to a single
//! self-contained page that pulls `plotly.js` from the CDN.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const REPORT_CSS: &str = "
body {
    font-family: 'Segoe UI', Helvetica, Arial, sans-serif;
    margin: 0;
    background-color: #fafafa;
    color: #222;
}
.report-header {
    background-color: #1f2a36;
    color: #fafafa;
    padding: 20px 40px;
}
.report-header h1 {
    margin: 0 0 4px 0;
}
.report-meta {
    margin: 0;
    color: #b8c4cf;
    font-size: 0.9em;
}
.report-logo {
    max-height: 48px;
    float: right;
}
.report-section {
    background-color: #ffffff;
    border: 1px solid #e0e0e0;
    border-radius: 5px;
    margin: 20px 40px;
    padding: 10px 20px 20px 20px;
}
.report-section h2 {
    border-bottom: 1px solid #e0e0e0;
    padding-bottom: 6px;
}
.section-plot {
    margin-top: 10px;
}
table.report-table {
    border-collapse: collapse;
}
table.report-table th, table.report-table td {
    border: 1px solid #e0e0e0;
    padding: 4px 12px;
    text-align: left;
}
";

enum SectionBlock {
    Content(Markup),
    Plot(Plot),
}

/// One titled section of a report.
pub struct ReportSection {
    title: String,
    blocks: Vec<SectionBlock>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn add_content(&mut self, content: Markup) {
        self.blocks.push(SectionBlock::Content(content));
    }

    pub fn add_plot(&mut self, plot: Plot) {
        self.blocks.push(SectionBlock::Plot(plot));
    }
}

/// An HTML report with a header and a list of sections.
pub struct Report {
    company: String,
    version: String,
    logo_url: Option<String>,
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(company: &str, version: &str, logo_url: Option<&str>, title: &str) -> Self {
        Self {
            company: company.to_string(),
            version: version.to_string(),
            logo_url: logo_url.map(str::to_string),
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn render(&self) -> Markup {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style { (PreEscaped(REPORT_CSS)) }
                }
                body {
                    div class="report-header" {
                        @if let Some(logo) = &self.logo_url {
                            img class="report-logo" src=(logo) alt=(self.company);
                        }
                        h1 { (self.title) }
                        p class="report-meta" {
                            (self.company) " " (self.version) " - generated " (generated)
                        }
                    }
                    @for (section_idx, section) in self.sections.iter().enumerate() {
                        div class="report-section" {
                            h2 { (section.title) }
                            @for (block_idx, block) in section.blocks.iter().enumerate() {
                                @match block {
                                    SectionBlock::Content(content) => {
                                        div class="section-content" {
                                            (PreEscaped(content.0.as_str()))
                                        }
                                    }
                                    SectionBlock::Plot(plot) => {
                                        div class="section-plot" {
                                            @let div_id =
                                                format!("report-plot-{}-{}", section_idx, block_idx);
                                            (PreEscaped(plot.to_inline_html(Some(div_id.as_str()))))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Render the report and write it to `path`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(&path, self.render().into_string())
            .with_context(|| format!("Failed to write report: {}", path.as_ref().display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sections_in_order() {
        let mut report = Report::new("MatrixFlow", "0.1.0", None, "Workflow Report");

        let mut first = ReportSection::new("Overview");
        first.add_content(html! { p { "hello" } });
        report.add_section(first);
        report.add_section(ReportSection::new("Configuration"));

        let rendered = report.render().into_string();
        let overview = rendered.find("Overview").unwrap();
        let configuration = rendered.find("Configuration").unwrap();
        assert!(overview < configuration);
        assert!(rendered.contains("<p>hello</p>"));
    }

    #[test]
    fn plots_get_distinct_div_ids() {
        let mut report = Report::new("MatrixFlow", "0.1.0", None, "Workflow Report");
        let mut section = ReportSection::new("Overview");
        section.add_plot(Plot::new());
        section.add_plot(Plot::new());
        report.add_section(section);

        let rendered = report.render().into_string();
        assert!(rendered.contains("report-plot-0-0"));
        assert!(rendered.contains("report-plot-0-1"));
    }

    #[test]
    fn saves_a_full_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        let report = Report::new("MatrixFlow", "0.1.0", None, "Workflow Report");
        report.save_to_file(&path).unwrap();

        let rendered = std::fs::read_to_string(&path).unwrap();
        assert!(rendered.starts_with("<!DOCTYPE html>"));
        assert!(rendered.contains("plotly"));
    }
}
