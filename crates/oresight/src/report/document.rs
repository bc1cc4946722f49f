//! HTML document model and the narrative analysis report.
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

use crate::stats::SummaryRecord;

/// Download name for the generated narrative report.
pub const REPORT_FILE_NAME: &str = "mining_analysis_report.html";
/// MIME type advertised for the report download.
pub const REPORT_MIME_TYPE: &str = "text/html; charset=utf-8";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

const REPORT_CSS: &str = "\
body { font-family: sans-serif; margin: 2em auto; max-width: 70em; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.3em 0.6em; text-align: right; }
";

/// Fixed narrative subsections of the visualization analysis. The prose is
/// static content, independent of the data.
pub const VISUALIZATION_NARRATIVES: [(&str, &str); 4] = [
    (
        "1. Grade Distributions",
        "The plots show the distribution of copper and molybdenum grades in the dataset, \
         helping identify the typical concentration ranges and any potential anomalies.",
    ),
    (
        "2. Prediction Accuracy",
        "These plots compare sensor predictions with actual blasthole assays, \
         demonstrating the accuracy of the sensor measurements.",
    ),
    (
        "3. Distance vs Prediction Error",
        "This analysis shows how the distance to the nearest blasthole affects \
         the accuracy of grade predictions.",
    ),
    (
        "4. Shift Analysis",
        "The plot compares average grades across different shifts, \
         helping identify any systematic variations in measurements.",
    ),
];

/// One titled section of a document: prose blocks and embedded plots.
pub struct ReportSection {
    heading: String,
    blocks: Vec<Markup>,
}

impl ReportSection {
    pub fn new(heading: &str) -> Self {
        Self {
            heading: heading.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn add_content(&mut self, content: Markup) {
        self.blocks.push(content);
    }

    pub fn add_plot(&mut self, plot: Plot) {
        self.blocks.push(PreEscaped(plot.to_inline_html(None)));
    }

    fn render(&self) -> Markup {
        let mut body = String::new();
        for block in &self.blocks {
            body.push_str(&block.0);
        }
        html! {
            section {
                h2 { (self.heading) }
                (PreEscaped(body))
            }
        }
    }
}

/// A standalone HTML document assembled from titled sections.
pub struct Report {
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    /// Render the document to an HTML string.
    pub fn render(&self) -> String {
        let mut sections = String::new();
        for section in &self.sections {
            sections.push_str(&section.render().into_string());
        }
        let markup = html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style { (PreEscaped(REPORT_CSS)) }
                }
                body {
                    h1 { (self.title) }
                    (PreEscaped(sections))
                }
            }
        };
        markup.into_string()
    }

    /// Serialize to an in-memory byte buffer suitable for download.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }

    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        std::fs::write(path, self.render())
    }
}

/// Assemble the narrative analysis report from the summary statistics.
///
/// The document lists every summary entry in insertion order, then the four
/// fixed visualization subsections with their narrative paragraphs.
pub fn compose_report(summary: &SummaryRecord) -> Report {
    let mut report = Report::new("Mining Data Analysis Report");

    let mut stats_section = ReportSection::new("Summary Statistics");
    for (name, value) in summary.entries() {
        stats_section.add_content(html! {
            p { (name) ": " (value) }
        });
    }
    report.add_section(stats_section);

    let mut analysis_section = ReportSection::new("Visualization Analysis");
    for (heading, narrative) in VISUALIZATION_NARRATIVES {
        analysis_section.add_content(html! {
            h3 { (heading) }
            p { (narrative) }
        });
    }
    report.add_section(analysis_section);

    report
}
