//! Questionnaire definition store backed by a TOML file.
//!
//! On first run the store writes a commented sample file so operators edit
//! a working template instead of starting from an empty page.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use warden_domain::QuestionnaireDefinition;

/// Sample definition written on first run. Disabled by default: enabling
/// the questionnaire is an explicit operator decision.
const DEFAULT_QUESTIONNAIRE_TOML: &str = r#"# Registration questionnaire definition.
# Option scores are never shown to applicants.

enabled = false
pass_score = 60
auto_approve_on_pass = false
default_text_max_score = 20

[[questions]]
id = 1
question_zh = "您是如何得知本服务器的？"
question_en = "How did you hear about our server?"
type = "single_choice"
required = true

[[questions.options]]
text_zh = "朋友推荐"
text_en = "Friend recommendation"
score = 10

[[questions.options]]
text_zh = "社交媒体"
text_en = "Social media"
score = 8

[[questions]]
id = 2
question_zh = "请介绍一下您的游戏经历。"
question_en = "Tell us about your experience with the game."
type = "text"
required = true
max_score = 20
scoring_rule = "Award higher scores to concrete, first-hand experience."

[questions.input]
placeholder_zh = "简单介绍即可"
placeholder_en = "A short introduction is enough"
"#;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read questionnaire file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse questionnaire file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to write default questionnaire file {path}: {source}")]
    WriteDefault {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Loads (and reloads) the questionnaire definition from disk.
pub struct QuestionnaireStore {
    path: PathBuf,
}

impl QuestionnaireStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the definition, writing the sample file first if none exists.
    ///
    /// Calling this again re-reads the file, so it doubles as reload.
    pub fn load(&self) -> Result<QuestionnaireDefinition, StoreError> {
        if !self.path.exists() {
            self.write_default()?;
            info!(path = %self.path.display(), "created default questionnaire file");
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_default(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::WriteDefault {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, DEFAULT_QUESTIONNAIRE_TOML).map_err(|source| {
            StoreError::WriteDefault {
                path: self.path.clone(),
                source,
            }
        })
    }
}
