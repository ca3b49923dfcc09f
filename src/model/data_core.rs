//! 核心流程：读取 -> 内存中变换 -> 覆盖写回

use std::path::Path;

use thiserror::Error;

use crate::model::devotional_merge::{DevotionalCollection, MergeReport};
use crate::model::encoding_repair::{RepairReport, ReplacementTable};
use crate::utils::fs::{read_json_file, read_text_file, write_json_file, write_text_file};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("顶层JSON必须是对象，实际为 {0}")]
    NotAnObject(&'static str),
}

/// 是否真正写回文件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Overwrite,
    DryRun,
}

/// 修复HTML文件中的乱码并覆盖原文件（不做备份）
pub fn repair_file(
    path: &Path,
    table: &ReplacementTable,
    mode: WriteMode,
) -> Result<RepairReport, AppError> {
    let content = read_text_file(path)?;
    let (fixed, report) = table.apply(&content);

    tracing::info!(
        "{}: {} 条规则命中，共替换 {} 处",
        path.display(),
        report.hits.len(),
        report.total_replacements()
    );

    if mode == WriteMode::Overwrite {
        write_text_file(path, &fixed)?;
    }
    Ok(report)
}

/// 将 backup 合并进 current（current 优先），结果写回 current_path
pub fn merge_files(
    current_path: &Path,
    backup_path: &Path,
    mode: WriteMode,
) -> Result<MergeReport, AppError> {
    // 两个输入都解析成功后才写入
    let current = DevotionalCollection::from_value(read_json_file(current_path)?)?;
    let backup = DevotionalCollection::from_value(read_json_file(backup_path)?)?;
    tracing::info!(
        "current {} 条, backup {} 条",
        current.len(),
        backup.len()
    );

    let (merged, report) = DevotionalCollection::merge(backup, current);

    if report.has_conflicts() {
        tracing::warn!(
            "{} 个键两侧都存在，已保留 current 的版本",
            report.collided.len()
        );
        for key in &report.collided {
            tracing::debug!("冲突键: {}", key);
        }
    }

    if mode == WriteMode::Overwrite {
        write_json_file(current_path, &merged.into_value())?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("创建临时文件失败");
        temp_file.write_all(content.as_bytes()).expect("写入临时文件失败");
        temp_file
    }

    #[test]
    fn test_repair_file_overwrites_in_place() {
        let temp_file = create_test_file("<title>Panel de administraci├│n</title>\n<b>\u{ad}ƒæÑ Usuarios</b>");

        let report = repair_file(temp_file.path(), &ReplacementTable::default_table(), WriteMode::Overwrite)
            .expect("修复失败");

        assert_eq!(report.total_replacements(), 2);
        let fixed = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(fixed, "<title>Panel de administración</title>\n<b>👤 Usuarios</b>");
    }

    #[test]
    fn test_repair_file_twice_changes_nothing() {
        let temp_file = create_test_file("Ô£à Guardado ├║nico");
        let table = ReplacementTable::default_table();

        repair_file(temp_file.path(), &table, WriteMode::Overwrite).unwrap();
        let once = std::fs::read_to_string(temp_file.path()).unwrap();
        let second = repair_file(temp_file.path(), &table, WriteMode::Overwrite).unwrap();
        let twice = std::fs::read_to_string(temp_file.path()).unwrap();

        assert!(second.is_unchanged());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_repair_dry_run_leaves_file() {
        let original = "Ma├▒ana";
        let temp_file = create_test_file(original);

        let report = repair_file(temp_file.path(), &ReplacementTable::default_table(), WriteMode::DryRun).unwrap();

        assert_eq!(report.total_replacements(), 1);
        assert_eq!(std::fs::read_to_string(temp_file.path()).unwrap(), original);
    }

    #[test]
    fn test_repair_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = repair_file(&dir.path().join("admin-panel.html"), &ReplacementTable::default_table(), WriteMode::Overwrite);
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_merge_files_writes_current_path() {
        let current = create_test_file(r#"{"a": 1, "b": 2}"#);
        let backup = create_test_file(r#"{"b": 9, "c": 3}"#);

        let report = merge_files(current.path(), backup.path(), WriteMode::Overwrite).expect("合并失败");

        assert_eq!(report.total, 3);
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(current.path()).unwrap()).unwrap();
        assert_eq!(written, json!({"a": 1, "b": 2, "c": 3}));

        // backup 不应被修改
        let backup_after = std::fs::read_to_string(backup.path()).unwrap();
        assert_eq!(backup_after, r#"{"b": 9, "c": 3}"#);
    }

    #[test]
    fn test_merge_output_reparses_to_merged_object() {
        let current = create_test_file(r#"{"d2": {"titulo": "Oración", "versos": ["Salmo 23"]}, "d3": 3.5}"#);
        let backup = create_test_file(r#"{"d1": {"titulo": "Fe"}, "d2": {"titulo": "viejo"}}"#);

        merge_files(current.path(), backup.path(), WriteMode::Overwrite).unwrap();

        let raw = std::fs::read_to_string(current.path()).unwrap();
        assert!(raw.contains("Oración"), "非ASCII字符应原样写出");
        let reparsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            reparsed,
            json!({
                "d1": {"titulo": "Fe"},
                "d2": {"titulo": "Oración", "versos": ["Salmo 23"]},
                "d3": 3.5
            })
        );
        // backup 的键在前
        assert!(raw.find("\"d1\"").unwrap() < raw.find("\"d3\"").unwrap());
    }

    #[test]
    fn test_merge_keeps_big_integers_exact() {
        let current = create_test_file(r#"{"a": 1}"#);
        let backup = create_test_file(r#"{"c": {"id": 123456789012345678901234567890, "peso": 0.1}}"#);

        merge_files(current.path(), backup.path(), WriteMode::Overwrite).unwrap();

        let raw = std::fs::read_to_string(current.path()).unwrap();
        assert!(raw.contains("\"id\": 123456789012345678901234567890"), "大整数应原样写出: {}", raw);
        assert!(raw.contains("\"peso\": 0.1"));
    }

    #[test]
    fn test_repair_file_normalizes_crlf() {
        let temp_file = create_test_file("<p>Canci├│n</p>\r\n<p>Fin</p>\r\n");

        repair_file(temp_file.path(), &ReplacementTable::default_table(), WriteMode::Overwrite).unwrap();

        let fixed = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(fixed, "<p>Canción</p>\n<p>Fin</p>\n");
    }

    #[test]
    fn test_merge_dry_run_leaves_file() {
        let original = r#"{"a": 1}"#;
        let current = create_test_file(original);
        let backup = create_test_file(r#"{"b": 2}"#);

        let report = merge_files(current.path(), backup.path(), WriteMode::DryRun).unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(std::fs::read_to_string(current.path()).unwrap(), original);
    }

    #[test]
    fn test_merge_rejects_bad_input_without_writing() {
        let original = r#"{"a": 1}"#;
        let current = create_test_file(original);

        let array_backup = create_test_file("[1, 2]");
        let result = merge_files(current.path(), array_backup.path(), WriteMode::Overwrite);
        assert!(matches!(result, Err(AppError::NotAnObject("array"))));

        let broken_backup = create_test_file(r#"{"b": }"#);
        let result = merge_files(current.path(), broken_backup.path(), WriteMode::Overwrite);
        assert!(matches!(result, Err(AppError::Parse(_))));

        assert_eq!(std::fs::read_to_string(current.path()).unwrap(), original);
    }

    #[test]
    fn test_merge_missing_backup() {
        let current = create_test_file(r#"{"a": 1}"#);
        let dir = tempfile::tempdir().unwrap();
        let result = merge_files(current.path(), &dir.path().join("backup1.json"), WriteMode::Overwrite);
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
