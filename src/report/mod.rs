//! Report data model and rendering (terminal view + PDF export).

pub mod blocks;
pub mod handoff;
pub mod model;
pub mod pdf;

pub use blocks::{parse_blocks, render_plain, wrap_text, Block, BlockKind};
pub use handoff::ReportHandoff;
pub use model::{AgentInfo, AgentRanking, ReportData, REPORT_TITLE};
pub use pdf::PdfExporter;
