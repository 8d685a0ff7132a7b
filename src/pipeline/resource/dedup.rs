//! 候选资源的URL规范化、相关性评分与去重

use std::collections::HashMap;
use url::Url;

use crate::pipeline::types::ResourceCandidate;
use crate::providers::ResourcePlatform;

/// 归一化时剔除的跟踪类查询参数
const TRACKING_PARAMS: &[&str] = &[
    "ref", "source", "fbclid", "gclid", "igshid", "mc_cid", "mc_eid", "ck_subscriber_id",
];

/// URL规范化 - 纯函数，去重的唯一依据
///
/// 小写scheme与host、去除fragment与跟踪参数、折叠路径尾部斜杠。
/// 无法解析的URL返回None，对应候选被丢弃。
pub fn canonicalize_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str()?;

    url.set_fragment(None);

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| {
            let key = key.to_lowercase();
            !key.starts_with("utm_") && !TRACKING_PARAMS.contains(&key.as_str())
        })
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if retained.is_empty() {
        url.set_query(None);
    } else {
        let query = retained
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    k.clone()
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query));
    }

    let path = url.path().trim_end_matches('/').to_string();
    if path.is_empty() {
        url.set_path("/");
    } else {
        url.set_path(&path);
    }

    Some(url.to_string())
}

/// 平台先验权重 - 体现数据集目录优先的检索偏好
fn platform_prior(platform: ResourcePlatform) -> f64 {
    match platform {
        ResourcePlatform::Kaggle => 0.20,
        ResourcePlatform::HuggingFace => 0.15,
        ResourcePlatform::GitHub => 0.10,
    }
}

/// 相关性评分，[0, 1]
///
/// 查询词与候选标题/描述的重合度占主导，平台先验作为固定加成。
pub fn relevance_score(
    keywords: &[String],
    title: &str,
    description: &str,
    platform: ResourcePlatform,
) -> f64 {
    let prior = platform_prior(platform);
    if keywords.is_empty() {
        return prior;
    }

    let haystack = format!("{} {}", title, description).to_lowercase();
    let matched = keywords
        .iter()
        .filter(|keyword| haystack.contains(keyword.as_str()))
        .count();
    let overlap = matched as f64 / keywords.len() as f64;

    (overlap * 0.8 + prior).min(1.0)
}

/// 按规范化URL去重，同一URL保留评分最高的候选
///
/// 幂等：对自身输出再执行一次不会产生任何变化。
pub fn dedup_candidates(candidates: Vec<ResourceCandidate>) -> Vec<ResourceCandidate> {
    let mut kept: Vec<ResourceCandidate> = Vec::with_capacity(candidates.len());
    let mut index_by_url: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        match index_by_url.get(&candidate.canonical_url) {
            Some(&index) => {
                if candidate.relevance_score > kept[index].relevance_score {
                    kept[index] = candidate;
                }
            }
            None => {
                index_by_url.insert(candidate.canonical_url.clone(), kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}

// Include tests
#[cfg(test)]
mod tests;
