//! Dashboard HTML rendering: the interactive view written by `analyze`.
use maud::{html, Markup};

use oresight::config::DisplayConfig;
use oresight::report::document::{Report, ReportSection};
use oresight::session::Analysis;

/// Assemble the dashboard document: dataset overview, sample rows, the four
/// chart panels, and the summary statistics.
pub fn render_dashboard(analysis: &Analysis, config: &DisplayConfig) -> Report {
    let mut report = Report::new("Mining Data Analysis Dashboard");

    /* Section 1: Dataset overview */
    {
        let mut overview = ReportSection::new("Dataset Overview");
        overview.add_content(html! {
            p { "Number of records: " (analysis.table.len()) }
            p { "Number of columns: " (analysis.table.source_columns()) }
        });
        overview.add_content(sample_rows(analysis, config.sample_rows));
        report.add_section(overview);
    }

    /* Section 2: Visualizations */
    {
        let mut panels = ReportSection::new("Data Visualizations");
        panels.add_plot(analysis.panels.grade_distributions.clone());
        panels.add_plot(analysis.panels.prediction_accuracy.clone());
        panels.add_plot(analysis.panels.distance_vs_error.clone());
        panels.add_plot(analysis.panels.shift_averages.clone());
        report.add_section(panels);
    }

    /* Section 3: Summary statistics */
    {
        let mut stats = ReportSection::new("Summary Statistics");
        for (name, value) in analysis.summary.entries() {
            stats.add_content(html! {
                p { b { (name) ": " } (value) }
            });
        }
        report.add_section(stats);
    }

    report
}

fn sample_rows(analysis: &Analysis, n: usize) -> Markup {
    html! {
        h3 { "Sample Data" }
        table {
            thead {
                tr {
                    th { "cugrade" }
                    th { "mograde" }
                    th { "avg_bh_grade_cu" }
                    th { "avg_bh_grade_mo" }
                    th { "Dist_to_NN_bh" }
                    th { "shift_id" }
                    th { "run_date_time" }
                }
            }
            tbody {
                @for row in analysis.table.head(n) {
                    tr {
                        td { (format!("{:.3}", row.cu_grade)) }
                        td { (format!("{:.3}", row.mo_grade)) }
                        td { (format!("{:.3}", row.bh_cu_grade)) }
                        td { (format!("{:.3}", row.bh_mo_grade)) }
                        td { (format!("{:.2}", row.distance_to_bh)) }
                        td { (row.shift_id) }
                        td { (row.run_at.format("%Y-%m-%d %H:%M:%S").to_string()) }
                    }
                }
            }
        }
    }
}
