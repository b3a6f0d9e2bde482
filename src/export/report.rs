//! Paginated report serializer. Tracks one vertical cursor across
//! heterogeneous blocks (wrapped free text and fixed-row tables) and inserts
//! page breaks at per-section near-bottom thresholds.

use chrono::Local;

use crate::analysis::types::{AnalysisResult, Sentiment};
use crate::error::PipelineResult;

use super::pdf::{Font, PAGE_WIDTH_MM, PdfDocument, Rgb};

const MARGIN_MM: f64 = 20.0;
const TOP_MM: f64 = 20.0;
const LINE_HEIGHT_MM: f64 = 5.0;
const ROW_HEIGHT_MM: f64 = 8.0;
const CELL_PAD_MM: f64 = 2.0;
const CELL_BASELINE_MM: f64 = 5.5;

const TITLE_SIZE: f64 = 20.0;
const HEADING_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 10.0;

// Thresholds at which the next section starts on a fresh page
const CLEANED_TEXT_BREAK_MM: f64 = 250.0;
const STATISTICS_BREAK_MM: f64 = 230.0;
const MODEL_BREAK_MM: f64 = 200.0;

const BLACK: Rgb = Rgb(0, 0, 0);
const GRAY: Rgb = Rgb(100, 100, 100);
const DARK_GRAY: Rgb = Rgb(60, 60, 60);
const WHITE: Rgb = Rgb(255, 255, 255);
const GRID: Rgb = Rgb(180, 180, 180);

const GREEN: Rgb = Rgb(34, 197, 94);
const RED: Rgb = Rgb(239, 68, 68);
const BLUE: Rgb = Rgb(59, 130, 246);

/// Accent color for a model table, keyed to its sentiment label
fn accent(sentiment: Sentiment) -> Rgb {
    match sentiment {
        Sentiment::Positive => GREEN,
        Sentiment::Negative => RED,
        Sentiment::Neutral => BLUE,
    }
}

/// Render the full printable report for one record
pub fn render(result: &AnalysisResult) -> PipelineResult<Vec<u8>> {
    let mut report = Report::new();

    report.title("Scriptural Sentiment Analysis Report")?;
    report.metadata(result)?;

    report.text_section("Input Text", &result.input_text, 10.0)?;

    report.ensure_room(CLEANED_TEXT_BREAK_MM);
    report.text_section("Cleaned Text", &result.cleaned_text, 15.0)?;

    report.ensure_room(STATISTICS_BREAK_MM);
    let avg = match result.avg_word_length() {
        Some(avg) => format!("{:.2}", avg),
        None => "n/a".to_string(),
    };
    report.table(
        "Text Statistics",
        &[
            ("Word Count".to_string(), result.word_count.to_string()),
            ("Character Count".to_string(), result.char_count.to_string()),
            ("Average Word Length".to_string(), avg),
        ],
        BLUE,
    )?;

    let ml = &result.ml_prediction;
    report.ensure_room(MODEL_BREAK_MM);
    report.table(
        "ML Prediction Model",
        &[
            ("Sentiment".to_string(), ml.sentiment.as_str().to_uppercase()),
            ("Confidence".to_string(), percent(ml.confidence)),
            ("Positive Probability".to_string(), percent(ml.probabilities.positive)),
            ("Negative Probability".to_string(), percent(ml.probabilities.negative)),
            ("Neutral Probability".to_string(), percent(ml.probabilities.neutral)),
        ],
        accent(ml.sentiment),
    )?;

    let vader = &result.vader_analysis;
    report.ensure_room(MODEL_BREAK_MM);
    report.table(
        "VADER Analysis",
        &[
            ("Sentiment".to_string(), vader.sentiment.as_str().to_uppercase()),
            ("Compound Score".to_string(), format!("{:.4}", vader.compound)),
            ("Positive Score".to_string(), format!("{:.4}", vader.positive)),
            ("Negative Score".to_string(), format!("{:.4}", vader.negative)),
            ("Neutral Score".to_string(), format!("{:.4}", vader.neutral)),
        ],
        accent(vader.sentiment),
    )?;

    let textblob = &result.textblob_analysis;
    report.ensure_room(MODEL_BREAK_MM);
    report.table(
        "TextBlob Analysis",
        &[
            ("Sentiment".to_string(), textblob.sentiment.as_str().to_uppercase()),
            ("Polarity".to_string(), format!("{:.4}", textblob.polarity)),
            ("Subjectivity".to_string(), format!("{:.4}", textblob.subjectivity)),
        ],
        accent(textblob.sentiment),
    )?;

    Ok(report.doc.render())
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Cursor-tracking composer over the raw page writer
struct Report {
    doc: PdfDocument,
    cursor: f64,
}

impl Report {
    fn new() -> Self {
        Self {
            doc: PdfDocument::new(),
            cursor: TOP_MM,
        }
    }

    /// Start a new page when the cursor has moved past `threshold`
    fn ensure_room(&mut self, threshold: f64) {
        if self.cursor > threshold {
            self.doc.add_page();
            self.cursor = TOP_MM;
        }
    }

    fn title(&mut self, text: &str) -> PipelineResult<()> {
        let width = self.doc.text_width_mm(text, Font::HelveticaBold, TITLE_SIZE);
        let x = (PAGE_WIDTH_MM - width) / 2.0;
        self.doc
            .draw_text(text, x, self.cursor, Font::HelveticaBold, TITLE_SIZE, BLACK)?;
        self.cursor += 15.0;
        Ok(())
    }

    fn metadata(&mut self, result: &AnalysisResult) -> PipelineResult<()> {
        let id_line = format!("Analysis ID: {}", result.id);
        self.doc
            .draw_text(&id_line, MARGIN_MM, self.cursor, Font::Helvetica, BODY_SIZE, GRAY)?;
        self.cursor += 5.0;

        let generated = format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        self.doc
            .draw_text(&generated, MARGIN_MM, self.cursor, Font::Helvetica, BODY_SIZE, GRAY)?;
        self.cursor += 15.0;
        Ok(())
    }

    /// Heading plus word-wrapped body; the cursor advances by one line height
    /// per wrapped line plus the section gap
    fn text_section(&mut self, heading: &str, body: &str, gap: f64) -> PipelineResult<()> {
        self.doc
            .draw_text(heading, MARGIN_MM, self.cursor, Font::HelveticaBold, HEADING_SIZE, BLACK)?;
        self.cursor += 7.0;

        let max_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let max_chars = (max_width / Font::Helvetica.char_width_mm(BODY_SIZE)) as usize;
        let lines = wrap_text(body, max_chars);
        for (i, line) in lines.iter().enumerate() {
            self.doc.draw_text(
                line,
                MARGIN_MM,
                self.cursor + i as f64 * LINE_HEIGHT_MM,
                Font::Helvetica,
                BODY_SIZE,
                DARK_GRAY,
            )?;
        }
        self.cursor += lines.len() as f64 * LINE_HEIGHT_MM + gap;
        Ok(())
    }

    /// Heading plus a two-column metric/value table with a colored header row
    fn table(
        &mut self,
        heading: &str,
        rows: &[(String, String)],
        accent: Rgb,
    ) -> PipelineResult<()> {
        self.doc
            .draw_text(heading, MARGIN_MM, self.cursor, Font::HelveticaBold, HEADING_SIZE, BLACK)?;
        self.cursor += 10.0;

        let table_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let column_width = table_width / 2.0;

        self.doc
            .fill_rect(MARGIN_MM, self.cursor, table_width, ROW_HEIGHT_MM, accent);
        self.doc.draw_text(
            "Metric",
            MARGIN_MM + CELL_PAD_MM,
            self.cursor + CELL_BASELINE_MM,
            Font::HelveticaBold,
            BODY_SIZE,
            WHITE,
        )?;
        self.doc.draw_text(
            "Value",
            MARGIN_MM + column_width + CELL_PAD_MM,
            self.cursor + CELL_BASELINE_MM,
            Font::HelveticaBold,
            BODY_SIZE,
            WHITE,
        )?;
        self.cursor += ROW_HEIGHT_MM;

        for (metric, value) in rows {
            self.doc
                .stroke_rect(MARGIN_MM, self.cursor, column_width, ROW_HEIGHT_MM, GRID);
            self.doc.stroke_rect(
                MARGIN_MM + column_width,
                self.cursor,
                column_width,
                ROW_HEIGHT_MM,
                GRID,
            );
            self.doc.draw_text(
                metric,
                MARGIN_MM + CELL_PAD_MM,
                self.cursor + CELL_BASELINE_MM,
                Font::Helvetica,
                BODY_SIZE,
                BLACK,
            )?;
            self.doc.draw_text(
                value,
                MARGIN_MM + column_width + CELL_PAD_MM,
                self.cursor + CELL_BASELINE_MM,
                Font::Helvetica,
                BODY_SIZE,
                BLACK,
            )?;
            self.cursor += ROW_HEIGHT_MM;
        }

        self.cursor += 15.0;
        Ok(())
    }
}

/// Greedy word wrap against a character budget; tokens wider than a whole
/// line are hard-split
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for token in text.split_whitespace() {
        let mut word = token;
        let mut word_len = word.chars().count();

        while word_len > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
            word_len = word.chars().count();
        }
        if word_len == 0 {
            continue;
        }

        let needed = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}
