//! Exam report assembly and rendering.
//!
//! A report is first assembled into a [`ReportDocument`], an ordered list of
//! headings, paragraphs and spacers, and only then rendered to bytes. Keeping
//! the two steps apart lets callers inspect the content without parsing PDF.

pub mod document;
pub mod error;
pub mod exam_report;
pub mod labels;
pub mod naming;
pub mod pdf;

pub use document::{Align, Block, ReportDocument};
pub use error::ReportError;
pub use exam_report::{build_exam_report, ReportContext};
pub use naming::{download_file_name, storage_file_name};
pub use pdf::{render_pdf, PDF_MEDIA_TYPE};
