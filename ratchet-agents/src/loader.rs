//! Document-form agent loading from markdown files with a metadata block.
//!
//! A definition document is UTF-8 text that begins with a `---` delimiter
//! line; the metadata block runs to the second `---` and parses as YAML; the
//! remainder, trimmed, becomes the agent's instructions:
//!
//! ```markdown
//! ---
//! name: code_reviewer
//! description: Expert code review specialist.
//! tools: Read, Grep, Glob
//! model: sonnet
//! ---
//!
//! You are a senior code reviewer.
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::definition::{AgentDefinition, ModelSelector};
use crate::error::{AgentError, AgentResult};

/// Delimiter line opening and closing the metadata block.
pub const DOCUMENT_DELIMITER: &str = "---";

/// Metadata block of a definition document.
#[derive(Debug, Deserialize)]
struct FrontMatter {
    name: String,
    description: String,
    #[serde(default)]
    tools: Option<ToolsField>,
    #[serde(default)]
    model: Option<String>,
}

/// The `tools` field accepts either a YAML list or a comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ToolsField {
    List(Vec<String>),
    Joined(String),
}

impl ToolsField {
    fn into_names(self) -> Vec<String> {
        match self {
            Self::List(names) => names,
            Self::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// One document that failed to load, with the error that rejected it.
#[derive(Debug)]
pub struct LoadFailure {
    path: PathBuf,
    error: AgentError,
}

impl LoadFailure {
    /// Returns the path of the offending document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the error that rejected the document.
    #[must_use]
    pub fn error(&self) -> &AgentError {
        &self.error
    }
}

/// Result of scanning a directory of definition documents.
///
/// Malformed documents never abort the rest of the scan; they are collected
/// here and reported per document.
#[derive(Debug, Default)]
pub struct DirectoryLoad {
    agents: BTreeMap<String, AgentDefinition>,
    failures: Vec<LoadFailure>,
}

impl DirectoryLoad {
    /// Returns the successfully loaded definitions keyed by agent name.
    #[must_use]
    pub fn agents(&self) -> &BTreeMap<String, AgentDefinition> {
        &self.agents
    }

    /// Consumes the load and returns the definitions.
    #[must_use]
    pub fn into_agents(self) -> BTreeMap<String, AgentDefinition> {
        self.agents
    }

    /// Returns the per-document failures.
    #[must_use]
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Returns true when every document loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses one definition document.
///
/// `source_name` identifies the document in error messages (typically the
/// file name).
///
/// # Errors
///
/// Returns [`AgentError::Document`] when the delimiter is missing, the
/// metadata block fails to parse, or required fields are absent.
pub fn parse_document(source_name: &str, content: &str) -> AgentResult<AgentDefinition> {
    let (metadata, body) = split_document(content).map_err(|reason| AgentError::Document {
        source_name: source_name.to_owned(),
        reason,
    })?;

    let front: FrontMatter =
        serde_yaml::from_str(&metadata).map_err(|err| AgentError::Document {
            source_name: source_name.to_owned(),
            reason: format!("metadata block is not valid: {err}"),
        })?;

    let model = front
        .model
        .as_deref()
        .map_or(ModelSelector::Unspecified, ModelSelector::parse);

    let mut builder = AgentDefinition::builder(front.name)
        .description(front.description)
        .map_err(|err| AgentError::Document {
            source_name: source_name.to_owned(),
            reason: err.to_string(),
        })?
        .instructions(body.trim())
        .model(model);
    if let Some(tools) = front.tools {
        builder = builder.allowed_tools(tools.into_names());
    }

    builder.build().map_err(|err| AgentError::Document {
        source_name: source_name.to_owned(),
        reason: err.to_string(),
    })
}

/// Loads every `.md` definition document in a directory.
///
/// Documents are visited in path order so repeated scans are deterministic.
/// A duplicate agent name across documents rejects the later document.
///
/// # Errors
///
/// Returns [`AgentError::Io`] only when the directory itself cannot be read;
/// individual document failures are collected in the returned
/// [`DirectoryLoad`].
pub fn load_from_dir(dir: &Path) -> AgentResult<DirectoryLoad> {
    let entries = fs::read_dir(dir).map_err(|source| AgentError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    let mut load = DirectoryLoad::default();
    for path in paths {
        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) => {
                load.failures.push(LoadFailure {
                    error: AgentError::Io {
                        path: path.clone(),
                        source,
                    },
                    path,
                });
                continue;
            }
        };

        match parse_document(&source_name, &content) {
            Ok(definition) => {
                if load.agents.contains_key(definition.name()) {
                    load.failures.push(LoadFailure {
                        error: AgentError::Document {
                            source_name,
                            reason: format!(
                                "agent `{}` is already defined by another document",
                                definition.name()
                            ),
                        },
                        path,
                    });
                } else {
                    debug!(agent = definition.name(), document = %source_name, "loaded agent document");
                    load.agents.insert(definition.name().to_owned(), definition);
                }
            }
            Err(error) => load.failures.push(LoadFailure { path, error }),
        }
    }

    Ok(load)
}

fn split_document(content: &str) -> Result<(String, String), String> {
    let mut lines = content.lines();
    match lines.next() {
        Some(first) if first.trim_end() == DOCUMENT_DELIMITER => {}
        _ => {
            return Err(format!(
                "document must begin with a `{DOCUMENT_DELIMITER}` metadata delimiter"
            ));
        }
    }

    let mut metadata = Vec::new();
    for line in lines.by_ref() {
        if line.trim_end() == DOCUMENT_DELIMITER {
            let body: Vec<&str> = lines.collect();
            return Ok((metadata.join("\n"), body.join("\n")));
        }
        metadata.push(line);
    }

    Err(format!(
        "metadata block is missing its closing `{DOCUMENT_DELIMITER}` delimiter"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const REVIEWER_DOC: &str = "---\n\
        name: code_reviewer\n\
        description: Expert code review specialist.\n\
        tools: Read, Grep\n\
        model: sonnet\n\
        ---\n\
        \n\
        You are a senior code reviewer.\n";

    #[test]
    fn parses_comma_separated_tools() {
        let definition = parse_document("code_reviewer.md", REVIEWER_DOC).unwrap();
        assert_eq!(definition.name(), "code_reviewer");
        let tools: Vec<&String> = definition.allowed_tools().iter().collect();
        assert_eq!(tools, ["Grep", "Read"]);
        assert_eq!(
            definition.instructions(),
            "You are a senior code reviewer."
        );
        assert_eq!(definition.model(), &ModelSelector::Named("sonnet".into()));
    }

    #[test]
    fn parses_list_valued_tools() {
        let doc = "---\n\
            name: researcher\n\
            description: Research specialist.\n\
            tools:\n\
            \x20 - Read\n\
            \x20 - Bash\n\
            model: inherit\n\
            ---\n\
            Explore the codebase.\n";
        let definition = parse_document("researcher.md", doc).unwrap();
        assert!(definition.allowed_tools().contains("Bash"));
        assert_eq!(definition.model(), &ModelSelector::Inherit);
    }

    #[test]
    fn missing_delimiter_is_rejected() {
        let err = parse_document("broken.md", "name: broken\n").expect_err("must fail");
        assert!(matches!(
            err,
            AgentError::Document { source_name, .. } if source_name == "broken.md"
        ));
    }

    #[test]
    fn missing_name_is_rejected() {
        let doc = "---\ndescription: No name here.\n---\nBody.\n";
        let err = parse_document("anon.md", doc).expect_err("must fail");
        assert!(matches!(err, AgentError::Document { .. }));
    }

    #[test]
    fn unspecified_model_round_trips() {
        let doc = "---\nname: plain\ndescription: No model field.\n---\nBody.\n";
        let definition = parse_document("plain.md", doc).unwrap();
        assert!(definition.model().is_unspecified());
    }

    #[test]
    fn malformed_document_does_not_abort_directory_scan() {
        let dir = tempfile::tempdir().expect("tempdir");

        let mut good = std::fs::File::create(dir.path().join("code_reviewer.md")).unwrap();
        good.write_all(REVIEWER_DOC.as_bytes()).unwrap();

        let mut bad = std::fs::File::create(dir.path().join("broken.md")).unwrap();
        bad.write_all(b"no delimiter at all\n").unwrap();

        let load = load_from_dir(dir.path()).unwrap();
        assert_eq!(load.agents().len(), 1);
        assert!(load.agents().contains_key("code_reviewer"));
        assert_eq!(load.failures().len(), 1);
        assert!(!load.is_clean());
        assert!(
            load.failures()[0]
                .path()
                .to_string_lossy()
                .ends_with("broken.md")
        );
    }

    #[test]
    fn duplicate_agent_name_rejects_later_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("a_reviewer.md"), REVIEWER_DOC).unwrap();
        let duplicate = REVIEWER_DOC.replace("Expert code review", "Second copy of the");
        std::fs::write(dir.path().join("b_reviewer.md"), duplicate).unwrap();

        let load = load_from_dir(dir.path()).unwrap();
        assert_eq!(load.agents().len(), 1);
        assert_eq!(load.failures().len(), 1);
        assert_eq!(
            load.agents()["code_reviewer"].description(),
            "Expert code review specialist."
        );
    }

    #[test]
    fn non_markdown_files_are_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("notes.txt"), "not an agent").unwrap();

        let load = load_from_dir(dir.path()).unwrap();
        assert!(load.agents().is_empty());
        assert!(load.is_clean());
    }
}
