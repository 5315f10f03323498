//! The content tree: title, sections, subsections and hotkey entries

use crate::options::LayoutConfig;
use crate::types::*;

/// A single binding and what it does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyEntry {
    /// Key label, treated as opaque text (may list several alternatives)
    pub keys: String,
    pub description: String,
}

impl HotkeyEntry {
    pub fn new(keys: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            keys: keys.into(),
            description: description.into(),
        }
    }
}

/// A named group of entries inside a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    pub name: String,
    pub entries: Vec<HotkeyEntry>,
}

impl Subsection {
    pub fn new(name: impl Into<String>, entries: Vec<HotkeyEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}

/// One child of a section, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionChild {
    Subsection(Subsection),
    Entry(HotkeyEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub children: Vec<SectionChild>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a bare entry
    pub fn with_entry(mut self, keys: impl Into<String>, description: impl Into<String>) -> Self {
        self.children
            .push(SectionChild::Entry(HotkeyEntry::new(keys, description)));
        self
    }

    /// Append a subsection
    pub fn with_subsection(mut self, subsection: Subsection) -> Self {
        self.children.push(SectionChild::Subsection(subsection));
        self
    }

    /// Iterate over every entry, direct or nested, in presentation order
    pub fn entries(&self) -> impl Iterator<Item = &HotkeyEntry> {
        self.children.iter().flat_map(|child| match child {
            SectionChild::Subsection(sub) => sub.entries.as_slice(),
            SectionChild::Entry(entry) => std::slice::from_ref(entry),
        })
    }
}

/// A complete cheat sheet ready for layout
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
    pub config: LayoutConfig,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            config: LayoutConfig::default(),
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Total number of hotkey entries across all sections
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries().count()).sum()
    }

    /// Collect every content and configuration problem.
    ///
    /// Never stops at the first problem; an empty list means the document
    /// can be laid out.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = self.config.validate();

        if is_blank(&self.title) {
            violations.push(Violation::content("title", "must not be empty"));
        }

        for (si, section) in self.sections.iter().enumerate() {
            let section_path = format!("sections[{si}] {:?}", section.name);
            if is_blank(&section.name) {
                violations.push(Violation::content(&section_path, "name must not be empty"));
            }
            if section.children.is_empty() {
                violations.push(Violation::content(&section_path, "section is empty"));
            }

            for (ci, child) in section.children.iter().enumerate() {
                match child {
                    SectionChild::Entry(entry) => {
                        let path = format!("{section_path} / [{ci}]");
                        check_entry(entry, &path, &mut violations);
                    }
                    SectionChild::Subsection(sub) => {
                        let sub_path = format!("{section_path} / [{ci}] {:?}", sub.name);
                        if is_blank(&sub.name) {
                            violations
                                .push(Violation::content(&sub_path, "name must not be empty"));
                        }
                        if sub.entries.is_empty() {
                            violations.push(Violation::content(&sub_path, "subsection is empty"));
                        }
                        for (ei, entry) in sub.entries.iter().enumerate() {
                            let path = format!("{sub_path} / entries[{ei}]");
                            check_entry(entry, &path, &mut violations);
                        }
                    }
                }
            }
        }

        violations
    }

    /// Turn the violation list into an error, config problems first
    pub fn ensure_valid(&self) -> Result<()> {
        let violations = self.validate();
        if violations.is_empty() {
            return Ok(());
        }
        if violations.iter().any(|v| v.kind == ViolationKind::Config) {
            return Err(SheetError::Config(violations));
        }
        Err(SheetError::Validation(violations))
    }
}

fn check_entry(entry: &HotkeyEntry, path: &str, violations: &mut Vec<Violation>) {
    if is_blank(&entry.keys) {
        violations.push(Violation::content(path, "keys must not be empty"));
    }
    if is_blank(&entry.description) {
        violations.push(Violation::content(
            path,
            format!("description for {:?} must not be empty", entry.keys),
        ));
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
