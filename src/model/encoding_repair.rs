//! 编码修复：把CP850误解码的UTF-8序列替换回正确字符
//!
//! 每条规则的键是某个UTF-8字符在CP850代码页下显示出的文本，
//! 值沿用管理面板原先使用的字符。按表顺序逐条做整串替换（非正则）。

/// 默认替换表（顺序即应用顺序）
const DEFAULT_RULES: &[(&str, &str)] = &[
    // 西班牙语字符
    ("├│", "ó"),
    ("├▒", "ñ"),
    ("├¡", "í"),
    ("├║", "ú"),
    ("├í", "á"),
    ("├®", "é"),
    ("├¿", "¿"),
    // 常用emoji
    ("\u{ad}ƒøí´©Å", "🛠\u{fe0f}"),
    ("\u{ad}ƒôï", "📋"),
    ("\u{ad}ƒæü´©Å", "👁\u{fe0f}"),
    ("\u{ad}ƒæÑ", "👤"),
    ("\u{ad}ƒöæ", "🔑"),
    ("\u{ad}ƒô▒", "📱"),
    ("\u{ad}ƒöì", "🔍"),
    ("\u{ad}ƒöÉ", "🔒"),
    ("\u{ad}ƒÜ¬", "🚪"),
    ("\u{ad}ƒæñ", "👑"),
    ("\u{ad}ƒùæ´©Å", "🖊\u{fe0f}"),
    ("\u{ad}ƒÄÁ", "🎵"),
    ("\u{ad}ƒÄë", "🎉"),
    ("\u{ad}ƒöù", "🔙"),
    ("\u{ad}ƒöÄ", "🔄"),
    // 其他符号
    ("ÔåÉ", "⬅\u{fe0f}"),
    ("ÔÅ▒´©Å", "⏱\u{fe0f}"),
    ("Ô£û", "🗑\u{fe0f}"),
    ("Ô£à", "✅"),
    ("ÔØî", "❌"),
    ("Ô£Å´©Å", "✏\u{fe0f}"),
    ("ÔØô", "❔"),
    ("ÔûÂ´©Å", "▶\u{fe0f}"),
    ("ÔÜá", "⚠\u{fe0f}"),
    ("Ô£ö", "✔\u{fe0f}"),
];

/// 单条替换规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub garbled: String,
    pub correct: String,
}

/// 有序替换表
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    rules: Vec<Replacement>,
}

/// 单条规则的命中统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHits {
    pub index: usize,
    pub garbled: String,
    pub correct: String,
    pub count: usize,
}

/// 一次修复的结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// 只记录命中次数大于0的规则，按表顺序
    pub hits: Vec<RuleHits>,
}

impl RepairReport {
    pub fn total_replacements(&self) -> usize {
        self.hits.iter().map(|h| h.count).sum()
    }

    pub fn is_unchanged(&self) -> bool {
        self.hits.is_empty()
    }
}

impl ReplacementTable {
    pub fn new<I, K, V>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(k, v)| Replacement { garbled: k.into(), correct: v.into() })
                .collect(),
        }
    }

    /// 内置的西语字符与emoji修复表
    pub fn default_table() -> Self {
        Self::new(DEFAULT_RULES.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replacement> {
        self.rules.iter()
    }

    /// 按顺序对整个缓冲区应用所有规则
    pub fn apply(&self, text: &str) -> (String, RepairReport) {
        let mut content = text.to_string();
        let mut report = RepairReport::default();

        for (index, rule) in self.rules.iter().enumerate() {
            // 空键会在每个字符间插入，直接跳过
            if rule.garbled.is_empty() {
                continue;
            }
            let count = content.matches(rule.garbled.as_str()).count();
            if count == 0 {
                continue;
            }
            content = content.replace(rule.garbled.as_str(), &rule.correct);
            tracing::debug!("规则 #{} {:?} -> {:?}: {} 处", index, rule.garbled, rule.correct, count);
            report.hits.push(RuleHits {
                index,
                garbled: rule.garbled.clone(),
                correct: rule.correct.clone(),
                count,
            });
        }

        (content, report)
    }

    /// 找出 (i, j)：规则 i 的替换值中包含规则 j 的键。
    /// 结果为空时重复修复不会产生新的变化。
    pub fn self_collisions(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (i, a) in self.rules.iter().enumerate() {
            for (j, b) in self.rules.iter().enumerate() {
                if !b.garbled.is_empty() && a.correct.contains(b.garbled.as_str()) {
                    out.push((i, j));
                }
            }
        }
        out
    }
}
