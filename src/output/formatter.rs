//! Output formatters for analysis reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::{Analysis, AnalysisStatus, BreakdownEntry, PrioritizedGap, Recommendation};
use colored::Colorize;

/// Trait for rendering a completed analysis in one output format.
pub trait OutputFormatter {
    fn format_analysis(&self, analysis: &Analysis) -> Result<String>;
}

pub fn formatter_for(format: OutputFormat, detailed: bool, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter {
            use_colors,
            detailed,
        }),
        OutputFormat::Json => Box::new(JsonFormatter { pretty: true }),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

/// Console formatter with colors and compact sections.
pub struct ConsoleFormatter {
    pub use_colors: bool,
    pub detailed: bool,
}

impl ConsoleFormatter {
    fn paint(&self, text: &str, score: f64) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        let painted = if score >= 85.0 {
            text.green()
        } else if score >= 70.0 {
            text.cyan()
        } else if score >= 55.0 {
            text.yellow()
        } else {
            text.red()
        };
        painted.bold().to_string()
    }

    fn bucket_section(&self, out: &mut String, label: &str, entries: &[BreakdownEntry]) {
        if entries.is_empty() {
            return;
        }
        out.push_str(&format!("\n  {}\n", label));
        for entry in entries {
            out.push_str(&format!(
                "    {:<16} {:>5.1}  ({} matches, {} gaps, {:?} confidence)\n",
                entry.dimension,
                entry.score,
                entry.matches,
                entry.gaps,
                entry.confidence,
            ));
        }
    }

    fn gap_lines(out: &mut String, label: &str, gaps: &[PrioritizedGap]) {
        if gaps.is_empty() {
            return;
        }
        out.push_str(&format!("  {}:\n", label));
        for gap in gaps.iter().take(8) {
            out.push_str(&format!(
                "    - [{}] {} (importance {:.0})\n",
                gap.dimension.display_name(),
                gap.item,
                gap.importance_score
            ));
        }
    }

    fn recommendation_lines(out: &mut String, recommendation: &Recommendation) {
        out.push_str(&format!(
            "  [{:?}] {} — {}\n",
            recommendation.priority, recommendation.category, recommendation.title
        ));
        for action in &recommendation.actions {
            out.push_str(&format!(
                "    • {} ({}, impact: {})\n",
                action.action, action.timeframe, action.impact
            ));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_analysis(&self, analysis: &Analysis) -> Result<String> {
        let mut out = String::new();

        out.push_str(&format!(
            "\nFit analysis: {} ({})\n",
            analysis.occupation_title, analysis.occupation_code
        ));
        out.push_str(&format!("{}\n", "=".repeat(60)));

        if analysis.status == AnalysisStatus::Failed {
            let message = analysis
                .error_message
                .as_deref()
                .unwrap_or("unknown error");
            out.push_str(&format!(
                "Status: {}\nReason: {}\n",
                if self.use_colors {
                    "FAILED".red().bold().to_string()
                } else {
                    "FAILED".to_string()
                },
                message
            ));
            return Ok(out);
        }

        let score = analysis.overall_fit_score;
        out.push_str(&format!(
            "Overall fit: {}  ({})\n",
            self.paint(&format!("{:.1}", score), score),
            analysis.fit_category.category
        ));
        out.push_str(&format!("{}\n", analysis.fit_category.description));

        out.push_str("\nDimension scores:\n");
        for (dimension, result) in &analysis.dimension_scores {
            let mut line = format!(
                "  {:<16} {}",
                dimension.display_name(),
                self.paint(&format!("{:>5.1}", result.score), result.score)
            );
            if let Some(error) = &result.error {
                line.push_str(&format!("  (judge error: {})", error));
            } else if let Some(note) = &result.note {
                line.push_str(&format!("  ({})", note));
            }
            out.push_str(&line);
            out.push('\n');

            if self.detailed {
                if !result.matches.is_empty() {
                    out.push_str(&format!("      matches: {}\n", result.matches.join(", ")));
                }
                if !result.gaps.is_empty() {
                    out.push_str(&format!("      gaps: {}\n", result.gaps.join(", ")));
                }
            }
        }

        out.push_str("\nScore breakdown:");
        self.bucket_section(&mut out, "Strengths (80+):", &analysis.score_breakdown.strengths);
        self.bucket_section(&mut out, "Adequate (65+):", &analysis.score_breakdown.adequate);
        self.bucket_section(
            &mut out,
            "Needs improvement (50+):",
            &analysis.score_breakdown.needs_improvement,
        );
        self.bucket_section(&mut out, "Critical (<50):", &analysis.score_breakdown.critical);

        if !analysis.gaps.is_empty() {
            out.push_str("\nPriority gaps:\n");
            Self::gap_lines(&mut out, "Critical", &analysis.gaps.critical);
            Self::gap_lines(&mut out, "Important", &analysis.gaps.important);
            Self::gap_lines(&mut out, "Nice to have", &analysis.gaps.nice_to_have);
        }

        if !analysis.recommendations.is_empty() {
            out.push_str("\nRecommendations:\n");
            for recommendation in &analysis.recommendations {
                Self::recommendation_lines(&mut out, recommendation);
            }
        }

        out.push_str(&format!(
            "\nTime to qualify: {} months\n  {}\n",
            analysis.time_to_qualify.total_months, analysis.time_to_qualify.summary
        ));
        for estimate in &analysis.time_to_qualify.time_estimates {
            out.push_str(&format!(
                "  {} — {} months ({})\n",
                estimate.area, estimate.months, estimate.reason
            ));
        }

        out.push_str(&format!(
            "\nAnalyzed in {} ms on {}\n",
            analysis.processing_time_ms,
            analysis.analysis_date.format("%Y-%m-%d %H:%M UTC")
        ));

        Ok(out)
    }
}

/// JSON formatter for API integration and scripting.
pub struct JsonFormatter {
    pub pretty: bool,
}

impl OutputFormatter for JsonFormatter {
    fn format_analysis(&self, analysis: &Analysis) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(analysis)?
        } else {
            serde_json::to_string(analysis)?
        };
        Ok(json)
    }
}

/// Markdown formatter for documentation and sharing.
pub struct MarkdownFormatter;

impl OutputFormatter for MarkdownFormatter {
    fn format_analysis(&self, analysis: &Analysis) -> Result<String> {
        let mut out = String::new();

        out.push_str(&format!(
            "# Fit Analysis: {} ({})\n\n",
            analysis.occupation_title, analysis.occupation_code
        ));

        if analysis.status == AnalysisStatus::Failed {
            out.push_str(&format!(
                "**Status: failed** — {}\n",
                analysis.error_message.as_deref().unwrap_or("unknown error")
            ));
            return Ok(out);
        }

        out.push_str(&format!(
            "**Overall fit: {:.1}** — {} ({})\n\n",
            analysis.overall_fit_score,
            analysis.fit_category.category,
            analysis.fit_category.description
        ));

        out.push_str("## Dimension Scores\n\n");
        out.push_str("| Dimension | Score | Matches | Gaps | Confidence |\n");
        out.push_str("|---|---|---|---|---|\n");
        for (dimension, result) in &analysis.dimension_scores {
            out.push_str(&format!(
                "| {} | {:.1} | {} | {} | {:?} |\n",
                dimension.display_name(),
                result.score,
                result.matches.len(),
                result.gaps.len(),
                result.effective_confidence(),
            ));
        }

        if !analysis.gaps.is_empty() {
            out.push_str("\n## Priority Gaps\n\n");
            for (label, bucket) in [
                ("Critical", &analysis.gaps.critical),
                ("Important", &analysis.gaps.important),
                ("Nice to have", &analysis.gaps.nice_to_have),
            ] {
                if bucket.is_empty() {
                    continue;
                }
                out.push_str(&format!("### {}\n\n", label));
                for gap in bucket {
                    out.push_str(&format!(
                        "- **{}** ({}, importance {:.0})\n",
                        gap.item,
                        gap.dimension.display_name(),
                        gap.importance_score
                    ));
                }
                out.push('\n');
            }
        }

        if !analysis.recommendations.is_empty() {
            out.push_str("## Recommendations\n\n");
            for recommendation in &analysis.recommendations {
                out.push_str(&format!(
                    "### {} ({:?} priority)\n\n",
                    recommendation.title, recommendation.priority
                ));
                for action in &recommendation.actions {
                    out.push_str(&format!(
                        "- {} — {} (impact: {})\n",
                        action.action, action.timeframe, action.impact
                    ));
                }
                out.push('\n');
            }
        }

        out.push_str(&format!(
            "## Time to Qualify\n\n{} ({} months total)\n",
            analysis.time_to_qualify.summary, analysis.time_to_qualify.total_months
        ));

        Ok(out)
    }
}
