use crate::domain::PlannerDocument;
use crate::persistence::{atomic_write, backup_file, read_file};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

/// Load the planner document.
///
/// A missing or empty file gives the default document. A file that cannot be
/// parsed is backed up and replaced by the defaults; that is logged, never fatal.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<PlannerDocument> {
    let path = path.as_ref();
    let content = read_file(path)?;

    if content.trim().is_empty() {
        tracing::info!(path = %path.display(), "no planner data yet, starting from defaults");
        return Ok(PlannerDocument::default());
    }

    match serde_json::from_str::<PlannerDocument>(&content) {
        Ok(mut document) => {
            document.normalize();
            tracing::debug!(path = %path.display(), modules = document.modules.len(), "planner data loaded");
            Ok(document)
        }
        Err(e) => {
            let backup = backup_file(path)?;
            tracing::warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %e,
                "planner data unreadable, starting from defaults"
            );
            Ok(PlannerDocument::default())
        }
    }
}

/// Render the document as 4-space indented JSON, keeping emoji unescaped
pub fn serialize_document(document: &PlannerDocument) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut serializer)
        .context("Failed to serialize planner data")?;
    String::from_utf8(buf).context("Planner data is not valid UTF-8")
}

/// Rewrite the whole document
pub fn save_document<P: AsRef<Path>>(path: P, document: &PlannerDocument) -> Result<()> {
    let path = path.as_ref();
    let json = serialize_document(document)?;
    atomic_write(path, &json)?;
    tracing::debug!(path = %path.display(), "planner data saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RagStatus;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_document() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.json");

        let document = load_document(&path).unwrap();
        assert_eq!(document, PlannerDocument::default());
    }

    #[test]
    fn test_save_and_load_document() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.json");

        let mut document = PlannerDocument::default();
        document.set_priority("Revise for finals");
        document.cycle_priority_rag();
        document.add_module("History").unwrap();
        document.set_timetable_slot(9, "Lecture");
        let now = chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        document.add_task("History", "Essay plan", now).unwrap();

        save_document(&path, &document).unwrap();
        let loaded = load_document(&path).unwrap();

        assert_eq!(loaded, document);
        assert_eq!(loaded.priority_rag, RagStatus::Amber);
    }

    #[test]
    fn test_saved_json_format() {
        let document = PlannerDocument::default();
        let json = serialize_document(&document).unwrap();

        assert!(json.starts_with("{\n    \"target_date\""));
        assert!(json.contains("\"priority_rag\": \"🔴\""));
    }

    #[test]
    fn test_corrupt_document_is_backed_up() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document, PlannerDocument::default());

        let backups = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bak."))
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn test_null_fields_keep_rest_of_document() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{ "priority": "Revise", "priority_rag": null, "modules": { "Home": [["Read notes", "🟡"]] } }"#,
        )
        .unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document.priority, "Revise");
        assert_eq!(document.priority_rag, RagStatus::Red);
        assert_eq!(document.modules[0].tasks[0].text, "Read notes");

        let backups = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bak."))
            .count();
        assert_eq!(backups, 0);
    }
}
