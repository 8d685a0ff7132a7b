//! 平台混合比例执行器
//!
//! 在评分去重后的候选中，按配置的平台占比贪心填充配额选出最终资源子集。
//! 某平台候选不足时，缺口按占比再分配给其余平台，而不是缩减总量；
//! 只有所有平台都拿不出候选时才允许低于下限，该情况由上游显式上报。

use std::collections::BTreeMap;

use crate::config::ResourceConfig;
use crate::pipeline::types::ResourceCandidate;
use crate::providers::ResourcePlatform;

/// 平台的固定遍历顺序（与配置占比对齐）
const PLATFORMS: [ResourcePlatform; 3] = [
    ResourcePlatform::Kaggle,
    ResourcePlatform::HuggingFace,
    ResourcePlatform::GitHub,
];

/// 混合比例执行器
pub struct MixRatioEnforcer {
    ratios: [f64; 3],
    min_resources: usize,
    max_resources: usize,
}

impl MixRatioEnforcer {
    pub fn new(config: &ResourceConfig) -> Self {
        Self {
            ratios: [
                config.mix_ratio.kaggle,
                config.mix_ratio.huggingface,
                config.mix_ratio.github,
            ],
            min_resources: config.min_resources,
            max_resources: config.max_resources,
        }
    }

    /// 选集规模是否低于配置下限（仅当候选总量不足时发生，需要上报）
    pub fn below_minimum(&self, selection_len: usize) -> bool {
        selection_len < self.min_resources
    }

    /// 选出满足混合比例的最终资源子集，按相关性降序返回
    pub fn select(&self, candidates: Vec<ResourceCandidate>) -> Vec<ResourceCandidate> {
        // 按平台分组并按评分降序排列
        let mut pools: [Vec<ResourceCandidate>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for candidate in candidates {
            let index = PLATFORMS
                .iter()
                .position(|p| *p == candidate.platform)
                .unwrap_or(2);
            pools[index].push(candidate);
        }
        for pool in pools.iter_mut() {
            pool.sort_by(|a, b| {
                b.relevance_score
                    .partial_cmp(&a.relevance_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let total_available: usize = pools.iter().map(|p| p.len()).sum();
        if total_available == 0 {
            return Vec::new();
        }

        // 总量目标：不超过上限；候选总量不足下限时只能如实返回更少
        let target = total_available.min(self.max_resources);

        // 初始配额按占比分配
        let mut taken = [0usize; 3];
        let quotas = largest_remainder(target, &self.ratios);
        let mut shortfall = 0usize;
        for i in 0..3 {
            let take = quotas[i].min(pools[i].len());
            taken[i] = take;
            shortfall += quotas[i] - take;
        }

        // 缺口按其余平台的占比继续分配，直到补齐或无候选可取
        while shortfall > 0 {
            let spare: Vec<usize> = (0..3).filter(|&i| taken[i] < pools[i].len()).collect();
            if spare.is_empty() {
                break;
            }
            let spare_ratios: Vec<f64> = spare.iter().map(|&i| self.ratios[i]).collect();
            let redistribution = largest_remainder(shortfall, &spare_ratios);
            let mut progressed = false;
            for (slot, &i) in spare.iter().enumerate() {
                let capacity = pools[i].len() - taken[i];
                let take = redistribution[slot].min(capacity);
                if take > 0 {
                    taken[i] += take;
                    shortfall -= take;
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }

        let mut selection: Vec<ResourceCandidate> = Vec::with_capacity(target);
        for i in 0..3 {
            selection.extend(pools[i].drain(..taken[i]));
        }
        selection.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        selection
    }
}

/// 统计平台分布
pub fn platform_counts(selection: &[ResourceCandidate]) -> BTreeMap<ResourcePlatform, usize> {
    let mut counts = BTreeMap::new();
    for candidate in selection {
        *counts.entry(candidate.platform).or_insert(0) += 1;
    }
    counts
}

/// 最大余数法分配整数配额，总和等于total
fn largest_remainder(total: usize, weights: &[f64]) -> Vec<usize> {
    let weight_sum: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    if weight_sum <= f64::EPSILON || total == 0 {
        // 权重全为零时均匀分配
        let mut counts = vec![0usize; weights.len()];
        for i in 0..total {
            counts[i % weights.len().max(1)] += 1;
        }
        return counts;
    }

    let mut counts = vec![0usize; weights.len()];
    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(weights.len());
    let mut assigned = 0usize;

    for (i, weight) in weights.iter().enumerate() {
        let exact = weight.max(0.0) / weight_sum * total as f64;
        counts[i] = exact.floor() as usize;
        assigned += counts[i];
        remainders.push((i, exact - exact.floor()));
    }

    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let mut shortfall = total.saturating_sub(assigned);
    for (i, _) in remainders {
        if shortfall == 0 {
            break;
        }
        counts[i] += 1;
        shortfall -= 1;
    }

    counts
}

// Include tests
#[cfg(test)]
mod tests;
