use crate::constants::{COLUMN_GUTTER_PT, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Layout configuration for one generation run.
///
/// All sizes are in points. Every numeric field must be positive and finite,
/// except `margin` which may also be zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Entry text size
    pub font_size: f32,
    /// Section header size (the title is set slightly larger)
    pub header_font_size: f32,
    /// Number of columns per page
    pub columns: usize,
    /// Minimum height of a single entry row
    pub row_height: f32,
    /// Uniform page margin on all four sides
    pub margin: f32,
    /// Gap between the end of one section and the next header
    pub section_spacing: f32,
    /// Gap after a subsection when more content of the same section follows
    pub subsection_spacing: f32,
    /// TrueType/OpenType font used for every face instead of the builtin
    /// Helvetica and Courier, needed for text outside ASCII
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_file: Option<PathBuf>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            header_font_size: 11.0,
            columns: 3,
            row_height: 14.0,
            margin: 36.0,
            section_spacing: 10.0,
            subsection_spacing: 6.0,
            font_file: None,
        }
    }
}

impl LayoutConfig {
    /// Load a configuration from a standalone YAML file.
    ///
    /// Fields are read and checked the same way as an inline `config`
    /// mapping, so a bad value is a `Config` error naming every bad field.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;

        let value: Value = serde_yaml::from_str(&text).map_err(|e| {
            SheetError::Structure(vec![Violation::structure(
                "<config>",
                format!("invalid YAML syntax: {e}"),
            )])
        })?;
        let config = match value {
            Value::Null => Self::default(),
            Value::Mapping(mapping) => {
                let (config, mut problems) = Self::from_mapping(&mapping);
                problems.extend(config.validate());
                if !problems.is_empty() {
                    return Err(SheetError::Config(problems));
                }
                config
            }
            _ => {
                return Err(SheetError::Structure(vec![Violation::structure(
                    "<config>",
                    "config file must contain a mapping",
                )]));
            }
        };
        Ok(config)
    }

    /// Read a `config` mapping field by field.
    ///
    /// Missing or null fields keep their defaults and unknown keys are
    /// ignored. A value of the wrong type also keeps the default and is
    /// reported, so one bad field never hides another. Range checks are
    /// left to `validate`.
    pub fn from_mapping(mapping: &Mapping) -> (Self, Vec<Violation>) {
        let mut config = Self::default();
        let mut problems = Vec::new();

        let floats: [(&str, &mut f32); 6] = [
            ("font_size", &mut config.font_size),
            ("header_font_size", &mut config.header_font_size),
            ("row_height", &mut config.row_height),
            ("margin", &mut config.margin),
            ("section_spacing", &mut config.section_spacing),
            ("subsection_spacing", &mut config.subsection_spacing),
        ];
        for (name, slot) in floats {
            match mapping.get(name) {
                None | Some(Value::Null) => {}
                Some(value) => match value.as_f64() {
                    Some(number) => *slot = number as f32,
                    None => problems.push(Violation::config(
                        format!("config.{name}"),
                        format!("must be a number, got {}", describe(value)),
                    )),
                },
            }
        }

        match mapping.get("columns") {
            None | Some(Value::Null) => {}
            Some(value) => match value.as_u64().and_then(|n| usize::try_from(n).ok()) {
                Some(columns) => config.columns = columns,
                None => problems.push(Violation::config(
                    "config.columns",
                    format!("must be a whole number of at least 1, got {}", describe(value)),
                )),
            },
        }

        match mapping.get("font_file") {
            None | Some(Value::Null) => {}
            Some(Value::String(path)) => config.font_file = Some(PathBuf::from(path)),
            Some(value) => problems.push(Violation::config(
                "config.font_file",
                format!("must be a file path, got {}", describe(value)),
            )),
        }

        (config, problems)
    }

    /// Save the configuration as YAML
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        tokio::fs::write(path, yaml).await?;
        Ok(())
    }

    /// Collect every configuration problem.
    ///
    /// An empty list means the configuration is usable.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        let positive = [
            ("font_size", self.font_size),
            ("header_font_size", self.header_font_size),
            ("row_height", self.row_height),
            ("section_spacing", self.section_spacing),
            ("subsection_spacing", self.subsection_spacing),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                violations.push(Violation::config(
                    format!("config.{name}"),
                    format!("must be a positive number, got {value}"),
                ));
            }
        }

        if !self.margin.is_finite() || self.margin < 0.0 {
            violations.push(Violation::config(
                "config.margin",
                format!("must be zero or a positive number, got {}", self.margin),
            ));
        }

        if self.columns == 0 {
            violations.push(Violation::config("config.columns", "must be at least 1"));
        }

        // Only meaningful once the individual fields are sane
        if violations.is_empty() {
            let gutters = (self.columns - 1) as f32 * COLUMN_GUTTER_PT;
            if PAGE_WIDTH_PT - 2.0 * self.margin - gutters <= 0.0 {
                violations.push(Violation::config(
                    "config.margin",
                    format!(
                        "margin {} with {} columns leaves no printable width",
                        self.margin, self.columns
                    ),
                ));
            }
            let title_block = crate::layout::title_block_height(self);
            if PAGE_HEIGHT_PT - 2.0 * self.margin - title_block <= 0.0 {
                violations.push(Violation::config(
                    "config.margin",
                    format!("margin {} leaves no printable height", self.margin),
                ));
            }
        }

        violations
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Bool(b) => b.to_string(),
        Value::Sequence(_) => "a list".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Null => "nothing".to_string(),
        Value::Tagged(tagged) => describe(&tagged.value),
    }
}
