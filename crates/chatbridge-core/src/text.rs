//! 文本处理
//!
//! 替换词典、语言占比统计与翻译方向路由。

use serde::{Deserialize, Serialize};

use crate::config::ReplacementRule;

/// 原文与译文之间的分隔符；正文已含此串视为「已带翻译」
pub const TRANSLATION_SEPARATOR: &str = "\n---\n";

/// 翻译目标语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLang {
    Zh,
    En,
}

impl TargetLang {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLang::Zh => "zh",
            TargetLang::En => "en",
        }
    }
}

impl std::fmt::Display for TargetLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 中英文字符占比
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanguageStats {
    pub chinese: f32,
    pub english: f32,
}

/// 按插入顺序对所有规则做字面全量替换，无正则语义
pub fn apply_replacements(text: &str, rules: &[ReplacementRule]) -> String {
    let mut out = text.to_string();
    for rule in rules {
        if rule.pattern.is_empty() {
            continue;
        }
        out = out.replace(&rule.pattern, &rule.replacement);
    }
    out
}

/// 统计 CJK 与拉丁字母在全部字母字符中的占比
///
/// 两类字符都不存在时返回 (0, 0)，表示「无语言信号」。
pub fn language_stats(text: &str) -> LanguageStats {
    let mut cjk = 0usize;
    let mut latin = 0usize;
    for c in text.chars() {
        if is_cjk(c) {
            cjk += 1;
        } else if is_latin_letter(c) {
            latin += 1;
        }
    }
    let total = cjk + latin;
    if total == 0 {
        return LanguageStats {
            chinese: 0.0,
            english: 0.0,
        };
    }
    LanguageStats {
        chinese: cjk as f32 / total as f32,
        english: latin as f32 / total as f32,
    }
}

/// 翻译方向决策
///
/// - 中文占比 > 0.5：不翻译
/// - 英文占比 ≥ 0.5：译为中文
/// - 两者皆零：不翻译
/// - 混合且中文居多：译为英文
/// - 混合且英文居多：译为中文
/// - 恰好持平：不翻译
pub fn choose_translate_target(text: &str) -> Option<TargetLang> {
    let stats = language_stats(text);
    if stats.chinese > 0.5 {
        return None;
    }
    if stats.english >= 0.5 {
        return Some(TargetLang::Zh);
    }
    if stats.chinese == 0.0 && stats.english == 0.0 {
        return None;
    }
    if stats.chinese > stats.english {
        return Some(TargetLang::En);
    }
    if stats.english > stats.chinese {
        return Some(TargetLang::Zh);
    }
    None
}

/// CJK 字符（汉字、假名、谚文统一按中文计）
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'   // CJK 统一表意文字
        | '\u{3400}'..='\u{4DBF}' // 扩展 A
        | '\u{F900}'..='\u{FAFF}' // 兼容表意文字
        | '\u{3040}'..='\u{309F}' // 平假名
        | '\u{30A0}'..='\u{30FF}' // 片假名
        | '\u{AC00}'..='\u{D7AF}' // 谚文音节
        | '\u{1100}'..='\u{11FF}' // 谚文字母
    )
}

/// 拉丁字母（含扩展拉丁）
fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (matches!(c, '\u{00C0}'..='\u{024F}') && c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, replacement: &str) -> ReplacementRule {
        ReplacementRule {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_apply_replacements_all_occurrences() {
        let rules = vec![rule("foo", "bar")];
        assert_eq!(apply_replacements("foo x foo", &rules), "bar x bar");
    }

    #[test]
    fn test_apply_replacements_insertion_order() {
        let rules = vec![rule("a", "b"), rule("b", "c")];
        assert_eq!(apply_replacements("a", &rules), "c");
    }

    #[test]
    fn test_apply_replacements_literal_not_regex() {
        let rules = vec![rule(".*", "X")];
        assert_eq!(apply_replacements("a.*b", &rules), "aXb");
    }

    #[test]
    fn test_latin_only_ratios() {
        let stats = language_stats("Hello World");
        assert_eq!(stats.english, 1.0);
        assert_eq!(stats.chinese, 0.0);
    }

    #[test]
    fn test_no_signal_ratios() {
        let stats = language_stats("123 !?");
        assert_eq!(stats.chinese, 0.0);
        assert_eq!(stats.english, 0.0);
        assert_eq!(language_stats("").chinese, 0.0);
    }

    #[test]
    fn test_mixed_ratios() {
        // 2 个汉字 + 2 个字母
        let stats = language_stats("你好ab");
        assert_eq!(stats.chinese, 0.5);
        assert_eq!(stats.english, 0.5);
    }

    #[test]
    fn test_choose_target_mostly_chinese() {
        assert_eq!(choose_translate_target("你好世界a"), None);
    }

    #[test]
    fn test_choose_target_english_to_chinese() {
        assert_eq!(
            choose_translate_target("hello world"),
            Some(TargetLang::Zh)
        );
        // 英文恰好占半也译为中文
        assert_eq!(choose_translate_target("你好ab"), None); // 持平时不翻译
        assert_eq!(choose_translate_target("你好abc"), Some(TargetLang::Zh));
    }

    #[test]
    fn test_choose_target_no_signal() {
        assert_eq!(choose_translate_target("12345 !!!"), None);
        assert_eq!(choose_translate_target(""), None);
    }

    #[test]
    fn test_choose_target_mixed_chinese_majority() {
        // 汉字 3 个、字母 2 个：中文 0.6 > 0.5，不翻译
        assert_eq!(choose_translate_target("你好吗ab"), None);
        // 汉字 2 个、字母 3 个加数字干扰：英文 0.6，译为中文
        assert_eq!(choose_translate_target("你好abc123"), Some(TargetLang::Zh));
    }

    #[test]
    fn test_choose_target_deterministic() {
        let text = "mixed 文本 sample";
        let first = choose_translate_target(text);
        for _ in 0..10 {
            assert_eq!(choose_translate_target(text), first);
        }
    }

    #[test]
    fn test_kana_and_hangul_count_as_chinese() {
        let stats = language_stats("カタカナ한글");
        assert_eq!(stats.chinese, 1.0);
        assert_eq!(stats.english, 0.0);
    }
}
