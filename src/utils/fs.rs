//! IO helper: whole-file read/write for HTML text and JSON

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde_json::Value;
use crate::model::data_core::AppError;

/// 读取整个文本文件（要求UTF-8），换行统一为 `\n`
pub fn read_text_file(p: &Path) -> Result<String, AppError> {
    let raw = fs::read_to_string(p)?;
    Ok(normalize_newlines(&raw))
}

fn normalize_newlines(s: &str) -> String {
    if !s.contains('\r') {
        return s.to_string();
    }
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// 覆盖写入文本文件，不保留原文件备份
pub fn write_text_file(p: &Path, content: &str) -> Result<(), AppError> {
    fs::write(p, content)?;
    Ok(())
}

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, AppError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 将JSON数据保存到文件（两空格缩进，非ASCII字符原样写出）
pub fn write_json_file(p: &Path, value: &Value) -> Result<(), AppError> {
    let f = File::create(p)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.flush()?;
    Ok(())
}
