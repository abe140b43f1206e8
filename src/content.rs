use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::SectionId;

/// Where the formatter writes its output; implemented by the notification host.
pub trait ContentSink {
    fn add_text(&mut self, section: SectionId, text: &str);
    fn add_html(&mut self, section: SectionId, html: &str);
    fn add_attachment(&mut self, path: &Path);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    pub text: String,
    pub html: String,
}

/// In-memory content, serialized as JSON by the binary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationContent {
    sections: Vec<(SectionId, Section)>,
    attachments: Vec<PathBuf>,
}

impl NotificationContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|(s, _)| *s == id).map(|(_, section)| section)
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections.iter().map(|(id, section)| (*id, section))
    }

    pub fn attachments(&self) -> &[PathBuf] {
        &self.attachments
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.attachments.is_empty()
    }

    fn section_mut(&mut self, id: SectionId) -> &mut Section {
        let index = match self.sections.iter().position(|(s, _)| *s == id) {
            Some(index) => index,
            None => {
                self.sections.push((id, Section::default()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index].1
    }
}

impl ContentSink for NotificationContent {
    fn add_text(&mut self, section: SectionId, text: &str) {
        self.section_mut(section).text.push_str(text);
    }

    fn add_html(&mut self, section: SectionId, html: &str) {
        self.section_mut(section).html.push_str(html);
    }

    fn add_attachment(&mut self, path: &Path) {
        if !self.attachments.iter().any(|p| p == path) {
            self.attachments.push(path.to_path_buf());
        }
    }
}
