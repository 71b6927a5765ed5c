//! Rendering of a [`Summary`] as Markdown, AsciiDoc or JSON

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::output::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Adoc,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "adoc" | "asciidoc" => Ok(Self::Adoc),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Markdown => "md",
            Self::Adoc => "adoc",
            Self::Json => "json",
        })
    }
}

impl Summary {
    /// Writes the report in the requested format.
    pub fn render(&self, format: ReportFormat, out: &mut impl Write) -> io::Result<()> {
        match format {
            ReportFormat::Markdown => self.markdown(out),
            ReportFormat::Adoc => self.adoc(out),
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)
            }
        }
    }

    fn markdown(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "#### General information\n")?;
        writeln!(out, "| Metric | Value |")?;
        writeln!(out, "|:-|-:|")?;
        writeln!(out, "| Files | {} |", self.paths.join(", "))?;
        writeln!(out, "| Number of requests | {} |", self.total_requests)?;
        writeln!(out, "| Average response size | {}b |", self.avg_response_size)?;
        writeln!(
            out,
            "| 95th percentile of response size | {}b |",
            self.response_size_p95
        )?;
        writeln!(
            out,
            "| Average requests per day | {} |\n",
            self.avg_requests_per_day
        )?;

        writeln!(out, "#### Requested resources\n")?;
        writeln!(out, "| Resource | Count |")?;
        writeln!(out, "|:-|-:|")?;
        for resource in &self.frequent_resources {
            writeln!(out, "| `{}` | {} |", resource.name, resource.count)?;
        }

        writeln!(out, "\n#### Response codes\n")?;
        writeln!(out, "| Code | Name | Count |")?;
        writeln!(out, "|:-|:-:|-:|")?;
        for status in &self.frequent_statuses {
            writeln!(
                out,
                "| {} | {} | {} |",
                status.code, status.name, status.count
            )?;
        }

        writeln!(out, "\n#### Requesting addresses\n")?;
        writeln!(out, "| Address | Count |")?;
        writeln!(out, "|:-|-:|")?;
        for address in &self.frequent_addresses {
            writeln!(out, "| `{}` | {} |", address.name, address.count)?;
        }
        Ok(())
    }

    fn adoc(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "==== General information\n")?;
        writeln!(out, "[options=\"header\"]")?;
        writeln!(out, "|===")?;
        writeln!(out, "| Metric | Value")?;
        writeln!(out, "| Files | {}", self.paths.join(", "))?;
        writeln!(out, "| Number of requests | {}", self.total_requests)?;
        writeln!(out, "| Average response size | {}b", self.avg_response_size)?;
        writeln!(
            out,
            "| 95th percentile of response size | {}b",
            self.response_size_p95
        )?;
        writeln!(out, "| Average requests per day | {}", self.avg_requests_per_day)?;
        writeln!(out, "|===\n")?;

        writeln!(out, "==== Requested resources\n")?;
        writeln!(out, "[options=\"header\"]")?;
        writeln!(out, "|===")?;
        writeln!(out, "| Resource | Count")?;
        for resource in &self.frequent_resources {
            writeln!(out, "| `{}` | {}", resource.name, resource.count)?;
        }
        writeln!(out, "|===\n")?;

        writeln!(out, "==== Response codes\n")?;
        writeln!(out, "[options=\"header\"]")?;
        writeln!(out, "|===")?;
        writeln!(out, "| Code | Name | Count")?;
        for status in &self.frequent_statuses {
            writeln!(out, "| {} | {} | {}", status.code, status.name, status.count)?;
        }
        writeln!(out, "|===\n")?;

        writeln!(out, "==== Requesting addresses\n")?;
        writeln!(out, "[options=\"header\"]")?;
        writeln!(out, "|===")?;
        writeln!(out, "| Address | Count")?;
        for address in &self.frequent_addresses {
            writeln!(out, "| `{}` | {}", address.name, address.count)?;
        }
        writeln!(out, "|===")
    }
}
