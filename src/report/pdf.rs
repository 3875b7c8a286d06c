//! PDF export — draws the report blocks onto A4 pages.
//!
//! Pure text-layout arithmetic against `printpdf`: each block is wrapped to
//! the content column, laid out at a descending vertical offset, and a new
//! page is started when vertical space runs out.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::error::ReportError;
use crate::report::blocks::{parse_blocks, wrap_text, BlockKind};
use crate::report::model::{ReportData, REPORT_TITLE};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_CHAR_WIDTH_FACTOR: f32 = 0.5;
const LINE_HEIGHT_FACTOR: f32 = 1.4;

const TITLE_SIZE: f32 = 18.0;
const AGENT_SIZE: f32 = 11.0;
const LIST_INDENT_MM: f32 = 5.0;

/// Font weight and size for one block tier.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BlockStyle {
    bold: bool,
    size: f32,
}

fn block_style(kind: BlockKind) -> BlockStyle {
    match kind {
        BlockKind::Heading(1) => BlockStyle { bold: true, size: 16.0 },
        BlockKind::Heading(2) => BlockStyle { bold: true, size: 13.0 },
        BlockKind::Heading(_) => BlockStyle { bold: true, size: 11.0 },
        BlockKind::Paragraph | BlockKind::ListItem => BlockStyle { bold: false, size: 10.0 },
    }
}

/// Columns available to a line of the given font size.
fn max_chars(font_size: f32, width_mm: f32) -> usize {
    let char_width_mm = font_size * AVG_CHAR_WIDTH_FACTOR * PT_TO_MM;
    ((width_mm / char_width_mm) as usize).max(1)
}

fn line_height_mm(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR * PT_TO_MM
}

/// Tracks the current layer and vertical position, paging as needed.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y_mm: f32,
}

impl<'a> PageCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    /// Reserve one line of the given height, starting a new page if the
    /// current one is exhausted. Returns the baseline for the line.
    fn take_line(&mut self, height_mm: f32) -> f32 {
        if self.y_mm - height_mm < MARGIN_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.y_mm -= height_mm;
        self.y_mm
    }

    /// Vertical gap, clamped to the page (no empty leading gap after a break).
    fn gap(&mut self, height_mm: f32) {
        self.y_mm = (self.y_mm - height_mm).max(MARGIN_MM);
    }

    fn write_line(&mut self, text: &str, size: f32, x_mm: f32, font: &IndirectFontRef) {
        let baseline = self.take_line(line_height_mm(size));
        self.layer.use_text(text, size, Mm(x_mm), Mm(baseline), font);
    }
}

/// Renders a [`ReportData`] to a PDF file.
pub struct PdfExporter {
    max_agents: usize,
}

impl PdfExporter {
    pub fn new(max_agents: usize) -> Self {
        Self { max_agents }
    }

    /// Draw the report and write it to `path`.
    pub fn export(&self, report: &ReportData, path: &Path) -> Result<(), ReportError> {
        if report.agents.is_empty() {
            return Err(ReportError::EmptyAgents);
        }

        let (doc, page, layer) = PdfDocument::new(
            REPORT_TITLE,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;

        let mut cursor = PageCursor::new(&doc, doc.get_page(page).get_layer(layer));

        // Title
        cursor.write_line(REPORT_TITLE, TITLE_SIZE, MARGIN_MM, &bold);
        cursor.gap(line_height_mm(TITLE_SIZE) * 0.5);

        // Ranked agents
        for agent in report.top_agents(self.max_agents) {
            let line = format!("{}  {}", agent.ranking_position, agent.name);
            cursor.write_line(&line, AGENT_SIZE, MARGIN_MM, &bold);
        }
        cursor.gap(line_height_mm(AGENT_SIZE));

        // Report body
        for block in parse_blocks(&report.output) {
            let style = block_style(block.kind);
            let font = if style.bold { &bold } else { &regular };
            let indent = match block.kind {
                BlockKind::ListItem => LIST_INDENT_MM,
                _ => 0.0,
            };
            let width = CONTENT_WIDTH_MM - indent;
            let lines = wrap_text(&block.text, max_chars(style.size, width));
            for (i, line) in lines.iter().enumerate() {
                let text = if block.kind == BlockKind::ListItem && i == 0 {
                    format!("• {line}")
                } else {
                    line.clone()
                };
                cursor.write_line(&text, style.size, MARGIN_MM + indent, font);
            }
            cursor.gap(line_height_mm(style.size) * 0.4);
        }

        let file = File::create(path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        tracing::info!(path = %path.display(), "Report PDF written");
        Ok(())
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(4)
    }
}
