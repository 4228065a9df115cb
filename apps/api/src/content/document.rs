//! Static resume documents: YAML front-matter plus a markdown body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("front-matter block is not terminated by '---'")]
    UnterminatedFrontmatter,

    #[error("invalid front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Key-value metadata at the head of the resume document.
/// Unknown keys are preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ai_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default)]
    pub cv_url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub frontmatter: Frontmatter,
    pub content: String,
}

impl ResumeDocument {
    /// The degraded payload rendered when the document cannot be loaded.
    pub fn load_failure() -> Self {
        ResumeDocument {
            frontmatter: Frontmatter {
                name: Some("Error".to_string()),
                title: Some("Could not load resume".to_string()),
                cv_url: None,
                ..Frontmatter::default()
            },
            content: "Error loading resume content. Please check the server logs.".to_string(),
        }
    }
}

/// Splits an optional `---` front-matter block from the markdown body.
///
/// A document without a leading delimiter has empty front-matter and is
/// all body.
pub fn parse_document(raw: &str) -> Result<ResumeDocument, DocumentError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = raw.split_inclusive('\n');
    let opens = lines
        .next()
        .is_some_and(|first| first.trim_end() == DELIMITER);
    if !opens {
        return Ok(ResumeDocument {
            frontmatter: Frontmatter::default(),
            content: raw.to_string(),
        });
    }

    let yaml_start = raw.find('\n').map_or(raw.len(), |i| i + 1);
    let mut offset = yaml_start;
    let mut close = None;
    for line in lines {
        if line.trim_end() == DELIMITER {
            close = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }
    let (yaml_end, body_start) = close.ok_or(DocumentError::UnterminatedFrontmatter)?;

    let yaml = &raw[yaml_start..yaml_end];
    let frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    Ok(ResumeDocument {
        frontmatter,
        content: raw[body_start..].to_string(),
    })
}

/// A top-level (`## `) section of the markdown body, heading line included.
/// Text before the first heading is a section with no heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: Option<String>,
    pub text: String,
}

pub fn split_sections(content: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section {
        heading: None,
        text: String::new(),
    };
    let mut in_fence = false;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }
        let heading = (!in_fence)
            .then(|| line.strip_prefix("## "))
            .flatten()
            .map(|h| h.trim().to_string());

        if let Some(heading) = heading {
            if current.heading.is_some() || !current.text.trim().is_empty() {
                sections.push(current);
            }
            current = Section {
                heading: Some(heading),
                text: String::new(),
            };
        }
        current.text.push_str(line);
    }

    if current.heading.is_some() || !current.text.trim().is_empty() {
        sections.push(current);
    }
    sections
}

/// Removes the named `## ` sections, e.g. those already shown on the home page.
pub fn strip_sections(content: &str, names: &[&str]) -> String {
    split_sections(content)
        .into_iter()
        .filter(|s| {
            s.heading
                .as_deref()
                .map_or(true, |h| !names.contains(&h))
        })
        .map(|s| s.text)
        .collect()
}
