//! Compiles a `--track-list-format` template into a full-line matcher.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::FormatError;
use crate::types::FROM;

pub(crate) static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%([a-zA-Z0-9]+)%").expect("placeholder pattern is valid")
});

/// Placeholder names in the order they appear, duplicates included.
pub fn placeholder_names(template: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// A compiled line-format template.
#[derive(Debug, Clone)]
pub struct LineFormat {
    template: String,
    pattern: Regex,
    names: Vec<String>,
}

impl LineFormat {
    pub fn compile(template: &str) -> Result<Self, FormatError> {
        let template = template.trim();
        let names = placeholder_names(template);
        validate_names(&names)?;

        let mut pattern = String::with_capacity(template.len() * 2 + 2);
        pattern.push('^');
        let mut literal_start = 0;
        for found in PLACEHOLDER.find_iter(template) {
            pattern.push_str(&regex::escape(&template[literal_start..found.start()]));
            pattern.push_str("(.*?)");
            literal_start = found.end();
        }
        pattern.push_str(&regex::escape(&template[literal_start..]));
        pattern.push('$');

        let pattern = Regex::new(&pattern).map_err(|err| FormatError::Pattern(err.to_string()))?;
        tracing::debug!(template, pattern = pattern.as_str(), ?names, "compiled track list format");

        Ok(Self {
            template: template.to_string(),
            pattern,
            names,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Matches the whole line and returns one value per name, aligned with
    /// [`LineFormat::names`].
    pub fn captures<'l>(&self, line: &'l str) -> Option<Vec<&'l str>> {
        let caps = self.pattern.captures(line)?;
        let values: Vec<&str> = caps
            .iter()
            .skip(1)
            .map(|group| group.map_or("", |m| m.as_str()))
            .collect();
        if values.len() != self.names.len() {
            return None;
        }
        Some(values)
    }
}

fn validate_names(names: &[String]) -> Result<(), FormatError> {
    if !names.iter().any(|name| name == FROM) {
        return Err(FormatError::NoFrom);
    }
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(FormatError::Duplicate(name.clone()));
        }
    }
    Ok(())
}
