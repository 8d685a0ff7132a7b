//! 用例关键词提取 - 资源查询词的来源

use regex::Regex;
use std::sync::LazyLock;

/// 单个用例派生的关键词数量上限
pub const MAX_KEYWORDS: usize = 8;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9-]+").expect("valid token pattern"));

/// 通用停用词与业务填充词，不具备检索区分度
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "into", "that", "this", "are", "was", "will", "can",
    "has", "have", "its", "their", "them", "than", "then", "also", "such", "each", "per",
    "across", "through", "over", "under", "between", "using", "use", "used", "uses", "case",
    "cases", "based", "improve", "improving", "enhance", "enhanced", "enable", "enabling",
    "reduce", "reducing", "increase", "increasing", "better", "faster", "more", "less", "new",
    "key", "core", "main", "business", "company", "companies", "system", "systems", "solution",
    "solutions", "platform", "platforms", "process", "processes", "data", "driven",
];

/// 从用例标题与描述派生检索关键词
///
/// 标题词优先，其次描述词；小写归一、过滤停用词与短词、按首次出现去重，
/// 最终裁剪到上限以约束外部查询规模。
pub fn derive_keywords(title: &str, description: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for source in [title, description] {
        for token in TOKEN_PATTERN.find_iter(source) {
            let word = token.as_str().to_lowercase();
            if word.len() < 3 || STOP_WORDS.contains(&word.as_str()) {
                continue;
            }
            if !keywords.contains(&word) {
                keywords.push(word);
            }
            if keywords.len() >= MAX_KEYWORDS {
                return keywords;
            }
        }
    }

    keywords
}

// Include tests
#[cfg(test)]
mod tests;
