//! YAML source loading
//!
//! Reads the hierarchical hotkey format into a `Document`. Only the shape of
//! the input is checked here; content rules (empty names and so on) are left
//! to `Document::validate`. The one exception is a `config` field of the
//! wrong type, which fails with `SheetError::Config` alongside every other
//! violation the document has.

use crate::model::{Document, HotkeyEntry, Section, SectionChild, Subsection};
use crate::options::LayoutConfig;
use crate::types::*;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Title used when the source doesn't name one
pub const DEFAULT_TITLE: &str = "Hotkey Cheat Sheet";

pub async fn load_from_yaml(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let document = tokio::task::spawn_blocking(move || parse_str(&contents)).await??;

    log::info!(
        "Loaded {} hotkeys in {} section(s) from {}",
        document.entry_count(),
        document.sections.len(),
        path.display()
    );
    Ok(document)
}

/// Parse YAML text into a document, collecting every structural problem
pub fn parse_str(text: &str) -> Result<Document> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| {
        SheetError::Structure(vec![Violation::structure(
            "<input>",
            format!("invalid YAML syntax: {e}"),
        )])
    })?;
    parse_value(&value)
}

/// Build a document from an already parsed YAML value
pub fn parse_value(value: &Value) -> Result<Document> {
    let Value::Mapping(root) = value else {
        return Err(SheetError::Structure(vec![Violation::structure(
            "<root>",
            "root element must be a mapping",
        )]));
    };

    let mut problems = Vec::new();

    let title = match root.get("title") {
        None => DEFAULT_TITLE.to_string(),
        Some(v) => scalar_text(v).unwrap_or_else(|| {
            problems.push(Violation::structure("title", "must be a string"));
            String::new()
        }),
    };

    let mut config_problems = Vec::new();
    let config = match root.get("config") {
        None | Some(Value::Null) => LayoutConfig::default(),
        Some(Value::Mapping(mapping)) => {
            let (config, field_problems) = LayoutConfig::from_mapping(mapping);
            config_problems = field_problems;
            config
        }
        Some(_) => {
            problems.push(Violation::structure("config", "must be a mapping"));
            LayoutConfig::default()
        }
    };

    let sections = match root.get("sections") {
        None => {
            problems.push(Violation::structure("sections", "missing 'sections' key"));
            Vec::new()
        }
        Some(Value::Mapping(sections)) => parse_sections(sections, &mut problems),
        Some(_) => {
            problems.push(Violation::structure("sections", "must be a mapping"));
            Vec::new()
        }
    };

    if !problems.is_empty() {
        return Err(SheetError::Structure(problems));
    }

    let document = Document {
        title,
        sections,
        config,
    };

    // A mistyped config field was replaced by its default, so report it now
    // together with everything else validation finds
    if !config_problems.is_empty() {
        config_problems.extend(document.validate());
        return Err(SheetError::Config(config_problems));
    }

    Ok(document)
}

fn parse_sections(sections: &Mapping, problems: &mut Vec<Violation>) -> Vec<Section> {
    let mut parsed = Vec::with_capacity(sections.len());

    for (si, (name, body)) in sections.iter().enumerate() {
        let Some(name) = scalar_text(name) else {
            problems.push(Violation::structure(
                format!("sections[{si}]"),
                "section name must be a string",
            ));
            continue;
        };
        let path = format!("sections[{si}] {name:?}");

        let mut section = Section::new(name);
        match body {
            // Reported later as an empty section
            Value::Null => {}
            Value::Mapping(children) => {
                for (ci, (key, value)) in children.iter().enumerate() {
                    let child_path = format!("{path} / [{ci}]");
                    if let Some(child) = parse_child(key, value, &child_path, problems) {
                        section.children.push(child);
                    }
                }
            }
            _ => problems.push(Violation::structure(&path, "section must be a mapping")),
        }
        parsed.push(section);
    }

    parsed
}

/// A scalar value is a direct entry, a mapping is a subsection
fn parse_child(
    key: &Value,
    value: &Value,
    path: &str,
    problems: &mut Vec<Violation>,
) -> Option<SectionChild> {
    let Some(key) = scalar_text(key) else {
        problems.push(Violation::structure(path, "key must be a string"));
        return None;
    };

    if let Value::Mapping(entries) = value {
        let path = format!("{path} {key:?}");
        let mut subsection = Subsection::new(key, Vec::with_capacity(entries.len()));
        for (ei, (keys, description)) in entries.iter().enumerate() {
            match (scalar_text(keys), scalar_text(description)) {
                (Some(keys), Some(description)) => {
                    subsection.entries.push(HotkeyEntry::new(keys, description))
                }
                _ => problems.push(Violation::structure(
                    format!("{path} / entries[{ei}]"),
                    "entries must map a key to a description; deeper nesting is not supported",
                )),
            }
        }
        return Some(SectionChild::Subsection(subsection));
    }

    match scalar_text(value) {
        Some(description) => Some(SectionChild::Entry(HotkeyEntry::new(key, description))),
        None => {
            problems.push(Violation::structure(
                path,
                format!("value for {key:?} must be a description or a mapping of entries"),
            ));
            None
        }
    }
}

/// Text of a scalar node; `null` reads as an empty string
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}
