//! Filesystem tools — read file, list files, edit file.
//!
//! Paths are interpreted relative to the process's current working directory
//! unless absolute. All I/O failures become `error` outcomes; `list_files`
//! deliberately treats an unreadable path as an empty listing.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::base::{optional_string, require_string, Tool};
use super::outcome::ToolOutcome;

// ─────────────────────────────────────────────
// ReadFileTool
// ─────────────────────────────────────────────

/// Returns the full text content of a file.
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a given file path. Use this when you want to see \
         what's inside a file. Do not use this with directory names."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The relative or absolute path of a file."
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<ToolOutcome> {
        let path_str = require_string(&params, "path")?;
        let path = Path::new(&path_str);

        if !path.exists() {
            return Ok(ToolOutcome::error(format!(
                "No such file or directory: '{path_str}'"
            )));
        }
        if path.is_dir() {
            return Ok(ToolOutcome::error(format!(
                "Path is a directory, not a file: '{path_str}'"
            )));
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Ok(ToolOutcome::success(&[("content", json!(content))])),
            Err(e) => Ok(ToolOutcome::error(format!(
                "Failed to read '{path_str}': {e}"
            ))),
        }
    }
}

// ─────────────────────────────────────────────
// ListFilesTool
// ─────────────────────────────────────────────

/// Lists immediate children of a directory, sorted, directories marked with a
/// trailing separator. Dot-prefixed entries are skipped.
pub struct ListFilesTool;

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List files and directories at a given path. If no path is provided, \
         lists files in the current working directory."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Optional relative or absolute path to list files from. \
                                    Defaults to current working directory if not provided or empty."
                }
            },
            "required": []
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<ToolOutcome> {
        let path_str = optional_string(&params, "path")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ".".to_string());

        // Lenient listing: an unreadable or nonexistent path is an empty
        // result, not an error. Hidden entries are omitted.
        let mut files: Vec<String> = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&path_str) {
            for entry in entries.flatten() {
                if entry.file_name().to_string_lossy().starts_with('.') {
                    continue;
                }
                let joined = Path::new(&path_str).join(entry.file_name());
                let mut shown = joined.to_string_lossy().to_string();
                let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
                if is_dir {
                    shown.push(std::path::MAIN_SEPARATOR);
                }
                files.push(shown);
            }
        }
        files.sort();

        Ok(ToolOutcome::success(&[("files", json!(files))]))
    }
}

// ─────────────────────────────────────────────
// EditFileTool
// ─────────────────────────────────────────────

/// Replaces the first occurrence of `old_str` with `new_str`, creating the
/// file when it doesn't exist.
pub struct EditFileTool;

#[async_trait]
impl Tool for EditFileTool {
    fn name(&self) -> &str {
        "edit_file"
    }

    fn description(&self) -> &str {
        "Make edits to a text file. Replaces 'old_str' with 'new_str' in the \
         given file. 'old_str' and 'new_str' MUST be different from each other. \
         If the file specified with path doesn't exist, it will be created."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path to the file"
                },
                "old_str": {
                    "type": "string",
                    "description": "Text to search for - must match exactly and must \
                                    only have one match exactly"
                },
                "new_str": {
                    "type": "string",
                    "description": "Text to replace old_str with"
                }
            },
            "required": ["path", "old_str", "new_str"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<ToolOutcome> {
        let path_str = require_string(&params, "path")?;
        let old_str = require_string(&params, "old_str")?;
        let new_str = require_string(&params, "new_str")?;

        // A missing file reads as empty; any other read failure (e.g. the
        // target is a directory) is an error outcome.
        let content = match std::fs::read_to_string(&path_str) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Ok(ToolOutcome::error(format!(
                    "Failed to read '{path_str}': {e}"
                )))
            }
        };

        let updated = if old_str.is_empty() {
            // Empty old_str: create the file with new_str, or prepend to
            // existing content.
            format!("{new_str}{content}")
        } else {
            // First exact occurrence only; no occurrence leaves the content
            // unchanged.
            content.replacen(&old_str, &new_str, 1)
        };

        match std::fs::write(&path_str, updated) {
            Ok(()) => Ok(ToolOutcome::success(&[("path", json!(path_str))])),
            Err(e) => Ok(ToolOutcome::error(format!(
                "Failed to write '{path_str}': {e}"
            ))),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    // ── read_file ──

    #[tokio::test]
    async fn read_file_round_trips_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, "Hello, Quill!\nsecond line\n").unwrap();

        let outcome = ReadFileTool
            .execute(params(&[("path", file.to_str().unwrap())]))
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(
            outcome.field("content"),
            Some(&json!("Hello, Quill!\nsecond line\n"))
        );
    }

    #[tokio::test]
    async fn read_file_missing_path_is_error_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let outcome = ReadFileTool
            .execute(params(&[("path", missing.to_str().unwrap())]))
            .await
            .unwrap();

        assert_eq!(outcome.status(), "error");
        assert!(outcome.to_content().contains("No such file or directory"));
    }

    #[tokio::test]
    async fn read_file_directory_is_error_outcome() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = ReadFileTool
            .execute(params(&[("path", dir.path().to_str().unwrap())]))
            .await
            .unwrap();

        assert_eq!(outcome.status(), "error");
        assert!(outcome.to_content().contains("directory"));
    }

    // ── list_files ──

    #[tokio::test]
    async fn list_files_sorted_with_dir_markers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let outcome = ListFilesTool
            .execute(params(&[("path", dir.path().to_str().unwrap())]))
            .await
            .unwrap();

        let files: Vec<String> =
            serde_json::from_value(outcome.field("files").unwrap().clone()).unwrap();
        let sep = std::path::MAIN_SEPARATOR;

        assert_eq!(files.len(), 3);
        // Lexicographic order
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
        // Directory entries end with the separator, file entries don't
        assert!(files.iter().any(|f| f.ends_with(&format!("sub{sep}"))));
        assert!(files
            .iter()
            .filter(|f| f.contains("a.txt") || f.contains("b.txt"))
            .all(|f| !f.ends_with(sep)));
    }

    #[tokio::test]
    async fn list_files_skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".hidden"), "").unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join("visible.txt"), "").unwrap();

        let outcome = ListFilesTool
            .execute(params(&[("path", dir.path().to_str().unwrap())]))
            .await
            .unwrap();

        let files: Vec<String> =
            serde_json::from_value(outcome.field("files").unwrap().clone()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.txt"));
    }

    #[tokio::test]
    async fn list_files_nonexistent_path_is_empty_success() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("ghost");

        let outcome = ListFilesTool
            .execute(params(&[("path", missing.to_str().unwrap())]))
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.field("files"), Some(&json!([])));
    }

    #[tokio::test]
    async fn list_files_empty_path_means_cwd() {
        let outcome = ListFilesTool
            .execute(params(&[("path", "")]))
            .await
            .unwrap();
        // cwd always lists successfully
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn list_files_defaults_to_cwd() {
        let outcome = ListFilesTool.execute(HashMap::new()).await.unwrap();
        assert!(outcome.is_success());
    }

    // ── edit_file ──

    #[tokio::test]
    async fn edit_file_creates_when_absent_and_old_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("new.txt");

        let outcome = EditFileTool
            .execute(params(&[
                ("path", file.to_str().unwrap()),
                ("old_str", ""),
                ("new_str", "fresh content"),
            ]))
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "fresh content");
    }

    #[tokio::test]
    async fn edit_file_prepends_when_present_and_old_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("log.txt");
        std::fs::write(&file, "existing").unwrap();

        EditFileTool
            .execute(params(&[
                ("path", file.to_str().unwrap()),
                ("old_str", ""),
                ("new_str", "header\n"),
            ]))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "header\nexisting");
    }

    #[tokio::test]
    async fn edit_file_replaces_first_occurrence_only() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("multi.txt");
        std::fs::write(&file, "aaa bbb aaa").unwrap();

        EditFileTool
            .execute(params(&[
                ("path", file.to_str().unwrap()),
                ("old_str", "aaa"),
                ("new_str", "ccc"),
            ]))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "ccc bbb aaa");
    }

    #[tokio::test]
    async fn edit_file_no_match_leaves_content_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("same.txt");
        std::fs::write(&file, "untouched").unwrap();

        let outcome = EditFileTool
            .execute(params(&[
                ("path", file.to_str().unwrap()),
                ("old_str", "missing"),
                ("new_str", "replacement"),
            ]))
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "untouched");
    }

    #[tokio::test]
    async fn edit_file_directory_target_is_error_outcome() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = EditFileTool
            .execute(params(&[
                ("path", dir.path().to_str().unwrap()),
                ("old_str", "a"),
                ("new_str", "b"),
            ]))
            .await
            .unwrap();

        assert_eq!(outcome.status(), "error");
    }

    #[tokio::test]
    async fn edit_file_reports_path_in_success() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.txt");

        let outcome = EditFileTool
            .execute(params(&[
                ("path", file.to_str().unwrap()),
                ("old_str", ""),
                ("new_str", "x"),
            ]))
            .await
            .unwrap();

        assert_eq!(
            outcome.field("path"),
            Some(&json!(file.to_str().unwrap()))
        );
    }
}
