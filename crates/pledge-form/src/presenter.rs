//! # Presentation Responder
//!
//! Success and error feedback, plus print export of the confirmation receipt.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pledge_core::{ReferenceId, SubmissionRecord, Timestamp};

use crate::display::{DisplaySurface, DisplayTarget, View};
use crate::receipt::{render_print_document, render_sections_list, ReceiptView};

/// Pause between writing the print document and printing it, so layout can
/// settle.
pub const PRINT_SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Errors raised by a print target after it opened.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("print target could not be opened: {0}")]
    Unavailable(String),

    #[error("print target has no open document")]
    NotOpen,

    #[error("failed to write print document to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A secondary rendering surface the receipt is printed from.
pub trait PrintTarget {
    fn open(&mut self) -> Result<(), PrintError>;

    /// Replace the surface's document with `html`.
    fn write_document(&mut self, html: &str) -> Result<(), PrintError>;

    fn print(&mut self) -> Result<(), PrintError>;

    fn close(&mut self);
}

/// Prints by writing the document to a file.
#[derive(Debug, Clone)]
pub struct FilePrintTarget {
    path: PathBuf,
    document: Option<String>,
}

impl FilePrintTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintTarget for FilePrintTarget {
    fn open(&mut self) -> Result<(), PrintError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !parent.is_dir() {
            return Err(PrintError::Unavailable(format!(
                "{} is not a directory",
                parent.display()
            )));
        }
        self.document = Some(String::new());
        Ok(())
    }

    fn write_document(&mut self, html: &str) -> Result<(), PrintError> {
        let doc = self.document.as_mut().ok_or(PrintError::NotOpen)?;
        doc.clear();
        doc.push_str(html);
        Ok(())
    }

    fn print(&mut self) -> Result<(), PrintError> {
        let doc = self.document.as_ref().ok_or(PrintError::NotOpen)?;
        std::fs::write(&self.path, doc).map_err(|source| PrintError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), bytes = doc.len(), "receipt printed");
        Ok(())
    }

    fn close(&mut self) {
        self.document = None;
    }
}

/// Writes outcomes into a [`DisplaySurface`].
#[derive(Debug, Clone)]
pub struct Presenter {
    settle_delay: Duration,
}

impl Presenter {
    pub fn new() -> Self {
        Self {
            settle_delay: PRINT_SETTLE_DELAY,
        }
    }

    /// Override the print settle delay.
    pub fn with_settle_delay(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    /// Fill the confirmation view from `record` and reveal it.
    ///
    /// The timestamp shown is the presentation time, not the record's.
    pub fn show_success<D: DisplaySurface + ?Sized>(
        &self,
        display: &mut D,
        reference_id: &ReferenceId,
        record: &SubmissionRecord,
    ) {
        display.set_text(DisplayTarget::ReferenceId, reference_id.as_str());
        display.set_text(DisplayTarget::StudentName, &record.student_name);
        display.set_text(DisplayTarget::YearLevel, &record.year_level);
        display.set_text(DisplayTarget::StudentId, &record.student_id);
        display.set_text(DisplayTarget::Section, &record.section);
        display.set_text(DisplayTarget::Email, &record.email);
        display.set_text(DisplayTarget::Course, &record.course);
        display.set_text(DisplayTarget::ContactInfo, &record.contact_info);
        display.set_text(
            DisplayTarget::SubmittedAt,
            &Timestamp::now().to_human_readable(),
        );
        display.set_markup(DisplayTarget::Sections, &render_sections_list(record));
        display.reveal(View::Confirmation);
    }

    /// Fill the error view and reveal it.
    pub fn show_error<D: DisplaySurface + ?Sized>(&self, display: &mut D, title: &str, message: &str) {
        display.set_text(DisplayTarget::ErrorTitle, title);
        display.set_text(DisplayTarget::ErrorMessage, message);
        display.reveal(View::Error);
    }

    /// Export the confirmation view through `target`.
    ///
    /// Returns `Ok(false)` without side effects when the page has no
    /// confirmation view, or when the target refuses to open.
    pub async fn print<D, P>(&self, display: &D, target: &mut P) -> Result<bool, PrintError>
    where
        D: DisplaySurface + ?Sized,
        P: PrintTarget + ?Sized,
    {
        if !display.has_view(View::Confirmation) {
            return Ok(false);
        }
        if let Err(e) = target.open() {
            tracing::warn!(error = %e, "print target unavailable");
            return Ok(false);
        }

        let document = render_print_document(&ReceiptView::from_display(display));
        let result = async {
            target.write_document(&document)?;
            tokio::time::sleep(self.settle_delay).await;
            target.print()
        }
        .await;
        target.close();
        result.map(|()| true)
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
