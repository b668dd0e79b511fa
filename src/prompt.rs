//! Prompt inputs and composition.
//!
//! The prompt template is plain text with a single named placeholder, `{spec}`,
//! which is replaced by the feature specification. Brace handling follows the
//! usual format-string rules:
//!
//! - `{spec}` - substituted with the specification text, verbatim
//! - `{{` - renders as a literal `{`
//! - `}}` - renders as a literal `}`
//!
//! Anything else inside braces is rejected rather than passed through, so a
//! template with a typo in the placeholder fails before any request is sent.

use crate::error::{ApiError, TemplateError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the placeholder the specification is substituted into.
pub const SPEC_PLACEHOLDER: &str = "spec";

/// Template and specification text, read in full from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub template: String,
    pub spec: String,
}

impl PromptContext {
    pub fn new(template: impl Into<String>, spec: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            spec: spec.into(),
        }
    }

    /// Read both input files. A missing file is reported as [`ApiError::FileNotFound`].
    pub fn load(prompt_path: &Path, spec_path: &Path) -> Result<Self, ApiError> {
        let template = read_input(prompt_path)?;
        let spec = read_input(spec_path)?;
        debug!(
            prompt_file = %prompt_path.display(),
            spec_file = %spec_path.display(),
            template_bytes = template.len(),
            spec_bytes = spec.len(),
            "Loaded prompt inputs"
        );
        Ok(Self { template, spec })
    }

    /// Build the full prompt by substituting the specification into the template.
    pub fn compose(&self) -> Result<String, TemplateError> {
        compose_prompt(&self.template, &self.spec)
    }
}

/// Paths of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub prompt_file: PathBuf,
    pub spec_file: PathBuf,
}

/// Convenience wrapper around [`PromptContext::load`].
pub fn load_inputs(prompt_path: &Path, spec_path: &Path) -> Result<PromptContext, ApiError> {
    PromptContext::load(prompt_path, spec_path)
}

fn read_input(path: &Path) -> Result<String, ApiError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ApiError::FileNotFound(path.to_path_buf())
        } else {
            ApiError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Substitute `spec` at every `{spec}` placeholder in `template`.
///
/// The substituted text is inserted as-is and never re-scanned, so braces
/// inside the specification are preserved.
pub fn compose_prompt(template: &str, spec: &str) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len() + spec.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some(&(_, '{')) = chars.peek() {
                    chars.next();
                    result.push('{');
                    continue;
                }

                let start = pos + 1;
                let mut end = None;
                for (idx, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            end = Some(idx);
                            break;
                        }
                        '{' => return Err(TemplateError::UnmatchedOpen { position: pos }),
                        _ => {}
                    }
                }
                let end = end.ok_or(TemplateError::UnmatchedOpen { position: pos })?;

                match &template[start..end] {
                    "" => return Err(TemplateError::EmptyPlaceholder { position: pos }),
                    SPEC_PLACEHOLDER => result.push_str(spec),
                    other => {
                        return Err(TemplateError::UnknownPlaceholder {
                            name: other.to_string(),
                            position: pos,
                        })
                    }
                }
            }
            '}' => {
                if let Some(&(_, '}')) = chars.peek() {
                    chars.next();
                    result.push('}');
                } else {
                    return Err(TemplateError::UnmatchedClose { position: pos });
                }
            }
            c => result.push(c),
        }
    }

    Ok(result)
}
