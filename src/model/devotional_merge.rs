//! 灵修内容合并：两个JSON对象按顶层键做浅合并，current 优先

use serde_json::{Map, Value};

use crate::model::data_core::AppError;

/// 以灵修ID为键的JSON对象，值对合并逻辑不透明
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevotionalCollection {
    entries: Map<String, Value>,
}

/// 合并统计，collided 为两侧都存在、backup 值被丢弃的键
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub total: usize,
    pub from_backup_only: usize,
    pub from_current_only: usize,
    pub collided: Vec<String>,
}

impl MergeReport {
    pub fn has_conflicts(&self) -> bool {
        !self.collided.is_empty()
    }
}

impl DevotionalCollection {
    /// 顶层必须是JSON对象
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(AppError::NotAnObject(json_kind(&other))),
        }
    }

    /// 等价于 `{**backup, **current}`：
    /// backup 的键先按原顺序排列，冲突键保留 backup 中的位置但取 current 的值，
    /// 仅在 current 中出现的键依次追加在后面
    pub fn merge(backup: Self, current: Self) -> (Self, MergeReport) {
        let mut report = MergeReport::default();
        let backup_len = backup.entries.len();
        let mut merged = backup.entries;

        for (key, value) in current.entries {
            // preserve_order 下 insert 对已存在的键保持原位置
            if merged.insert(key.clone(), value).is_some() {
                report.collided.push(key);
            } else {
                report.from_current_only += 1;
            }
        }

        report.from_backup_only = backup_len - report.collided.len();
        report.total = merged.len();
        (Self { entries: merged }, report)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
