//! Confirmation and error display surfaces.
//!
//! The page exposes two hidden views with fixed named sub-targets. The
//! presenter writes into the targets and then reveals a view.

use std::collections::{BTreeMap, BTreeSet};

/// Named sub-targets of the confirmation and error views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayTarget {
    ReferenceId,
    StudentName,
    YearLevel,
    StudentId,
    Section,
    Email,
    Course,
    ContactInfo,
    SubmittedAt,
    Sections,
    ErrorTitle,
    ErrorMessage,
}

impl DisplayTarget {
    /// Targets whose text the print export reproduces, in receipt order.
    pub const RECEIPT_FIELDS: [DisplayTarget; 9] = [
        Self::ReferenceId,
        Self::StudentName,
        Self::YearLevel,
        Self::StudentId,
        Self::Section,
        Self::Email,
        Self::Course,
        Self::ContactInfo,
        Self::SubmittedAt,
    ];

    /// Element id of the target on the page.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ReferenceId => "confirmReferenceId",
            Self::StudentName => "confirmStudentName",
            Self::YearLevel => "confirmYearLevel",
            Self::StudentId => "confirmStudentId",
            Self::Section => "confirmSection",
            Self::Email => "confirmEmail",
            Self::Course => "confirmCourse",
            Self::ContactInfo => "confirmContactInfo",
            Self::SubmittedAt => "confirmTimestamp",
            Self::Sections => "confirmSections",
            Self::ErrorTitle => "errorTitle",
            Self::ErrorMessage => "errorMessage",
        }
    }

    /// Caption shown next to the value on receipts.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::ReferenceId => "Reference ID",
            Self::StudentName => "Student Name",
            Self::YearLevel => "Year Level",
            Self::StudentId => "Student ID",
            Self::Section => "Section",
            Self::Email => "Email",
            Self::Course => "Course",
            Self::ContactInfo => "Contact Information",
            Self::SubmittedAt => "Submitted",
            Self::Sections => "Acknowledged Policies",
            Self::ErrorTitle => "Error",
            Self::ErrorMessage => "Details",
        }
    }
}

/// The two revealable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum View {
    Confirmation,
    Error,
}

/// Named sinks for presentation output.
pub trait DisplaySurface {
    /// Set the plain text of `target`. Missing targets are skipped.
    fn set_text(&mut self, target: DisplayTarget, text: &str);

    /// Replace the inner markup of `target`. Missing targets are skipped.
    fn set_markup(&mut self, target: DisplayTarget, markup: &str);

    /// Current text of `target`.
    fn text(&self, target: DisplayTarget) -> Option<String>;

    /// Current inner markup of `target`.
    fn markup(&self, target: DisplayTarget) -> Option<String>;

    /// Whether the page has `view` at all.
    fn has_view(&self, view: View) -> bool;

    /// Make `view` visible.
    fn reveal(&mut self, view: View);
}

/// In-memory [`DisplaySurface`].
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    targets: BTreeSet<DisplayTarget>,
    views: BTreeSet<View>,
    text: BTreeMap<DisplayTarget, String>,
    markup: BTreeMap<DisplayTarget, String>,
    revealed: Vec<View>,
}

impl MemoryDisplay {
    /// A page with every target and both views.
    pub fn new() -> Self {
        let targets = [
            DisplayTarget::ErrorTitle,
            DisplayTarget::ErrorMessage,
            DisplayTarget::Sections,
        ]
        .into_iter()
        .chain(DisplayTarget::RECEIPT_FIELDS)
        .collect();
        Self {
            targets,
            views: [View::Confirmation, View::Error].into_iter().collect(),
            text: BTreeMap::new(),
            markup: BTreeMap::new(),
            revealed: Vec::new(),
        }
    }

    /// Remove a view from the page.
    pub fn without_view(mut self, view: View) -> Self {
        self.views.remove(&view);
        self
    }

    /// Remove a target from the page.
    pub fn without_target(mut self, target: DisplayTarget) -> Self {
        self.targets.remove(&target);
        self
    }

    /// Views revealed so far, oldest first.
    pub fn revealed(&self) -> &[View] {
        &self.revealed
    }

    /// The most recently revealed view.
    pub fn last_revealed(&self) -> Option<View> {
        self.revealed.last().copied()
    }
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for MemoryDisplay {
    fn set_text(&mut self, target: DisplayTarget, text: &str) {
        if self.targets.contains(&target) {
            self.text.insert(target, text.to_string());
        }
    }

    fn set_markup(&mut self, target: DisplayTarget, markup: &str) {
        if self.targets.contains(&target) {
            self.markup.insert(target, markup.to_string());
        }
    }

    fn text(&self, target: DisplayTarget) -> Option<String> {
        self.text.get(&target).cloned()
    }

    fn markup(&self, target: DisplayTarget) -> Option<String> {
        self.markup.get(&target).cloned()
    }

    fn has_view(&self, view: View) -> bool {
        self.views.contains(&view)
    }

    fn reveal(&mut self, view: View) {
        if self.views.contains(&view) {
            self.revealed.push(view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_targets_are_skipped() {
        let mut display = MemoryDisplay::new().without_target(DisplayTarget::Course);
        display.set_text(DisplayTarget::Course, "BSCS");
        display.set_text(DisplayTarget::StudentName, "Ada");
        assert_eq!(display.text(DisplayTarget::Course), None);
        assert_eq!(display.text(DisplayTarget::StudentName).as_deref(), Some("Ada"));
    }

    #[test]
    fn missing_views_are_not_revealed() {
        let mut display = MemoryDisplay::new().without_view(View::Error);
        display.reveal(View::Error);
        assert!(display.revealed().is_empty());
        display.reveal(View::Confirmation);
        assert_eq!(display.last_revealed(), Some(View::Confirmation));
    }

    #[test]
    fn target_keys_are_unique() {
        let keys: BTreeSet<&str> = DisplayTarget::RECEIPT_FIELDS.iter().map(|t| t.key()).collect();
        assert_eq!(keys.len(), DisplayTarget::RECEIPT_FIELDS.len());
    }
}
