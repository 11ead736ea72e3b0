use crate::model::AnalysisResult;
use chrono::NaiveDate;
use serde_json::{Value, json};

const REPORT_PREFIX: &str = "Vastu_Report";

/// Naming for the exports of one result: `<stem>.pdf` for the rendered
/// report, `<stem>.json` for the raw result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportExport {
    pub stem: String,
}

impl ReportExport {
    pub fn dated(date: NaiveDate) -> Self {
        Self {
            stem: format!("{}_{}", REPORT_PREFIX, date.format("%Y-%m-%d")),
        }
    }

    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.stem)
    }

    /// Options for the html2pdf exporter: A4 portrait with 10 mm margins,
    /// rendered at twice the screen scale, avoiding page breaks inside cards.
    pub fn pdf_options(&self) -> Value {
        json!({
            "margin": [10, 10, 10, 10],
            "filename": self.pdf_file_name(),
            "image": { "type": "jpeg", "quality": 0.98 },
            "html2canvas": { "scale": 2, "useCORS": true, "letterRendering": true },
            "jsPDF": { "unit": "mm", "format": "a4", "orientation": "portrait" },
            "pagebreak": { "mode": ["avoid-all", "css", "legacy"] },
        })
    }

    pub fn json_file_name(&self) -> String {
        format!("{}.json", self.stem)
    }

    pub fn json_body(&self, result: &AnalysisResult) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(result)
    }
}
