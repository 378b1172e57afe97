//! # 选点策略
//!
//! 决定像素对的遍历顺序：顺序选点按扫描顺序取相邻像素对；
//! 自适应选点根据外部提供的兴趣分数筛选兴趣点 (POI)。

use crate::constants::POI_THRESHOLD_FACTOR;
use crate::error::StegoError;
use crate::grid::PixelGrid;

/// 一个像素对，两个成员都是网格中的扁平像素索引。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPair {
    pub first: usize,
    pub second: usize,
}

/// 选点策略。
#[derive(Debug, Clone, Copy)]
pub enum SiteSelector<'a> {
    /// 依次使用 `(0, 1)`, `(2, 3)`, ... 直到网格耗尽。
    Sequential,
    /// 使用兴趣分数严格高于 `均值 × 0.8` 的像素，按索引升序，
    /// 每个像素与其同一行右侧 (行尾回绕到行首) 的像素组成一对。
    Adaptive { scores: &'a [f64] },
}

impl SiteSelector<'_> {
    /// 为 `grid` 生成本轮遍历的像素对序列。
    ///
    /// # Errors
    ///
    /// * 分数数量少于像素数量时返回 [`StegoError::ScoreLengthMismatch`]。
    /// * 没有任何像素高于阈值时返回 [`StegoError::NoSelectableSites`]。
    pub fn sites(&self, grid: &PixelGrid) -> Result<Sites, StegoError> {
        match *self {
            SiteSelector::Sequential => Ok(Sites::Sequential {
                next: 0,
                pixel_count: grid.pixel_count(),
            }),
            SiteSelector::Adaptive { scores } => {
                adaptive_pairs(grid, scores).map(|pairs| Sites::Adaptive(pairs.into_iter()))
            }
        }
    }
}

/// 像素对迭代器。
#[derive(Debug)]
pub enum Sites {
    Sequential { next: usize, pixel_count: usize },
    Adaptive(std::vec::IntoIter<PixelPair>),
}

impl Iterator for Sites {
    type Item = PixelPair;

    fn next(&mut self) -> Option<PixelPair> {
        match self {
            Sites::Sequential { next, pixel_count } => {
                let first = *next;
                if first + 1 >= *pixel_count {
                    return None;
                }
                *next += 2;
                Some(PixelPair {
                    first,
                    second: first + 1,
                })
            }
            Sites::Adaptive(pairs) => pairs.next(),
        }
    }
}

/// 计算兴趣点阈值：所有分数的均值乘以 [`POI_THRESHOLD_FACTOR`]。
pub fn threshold(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return f64::INFINITY;
    }
    scores.iter().sum::<f64>() / scores.len() as f64 * POI_THRESHOLD_FACTOR
}

/// 按原始索引顺序返回分数严格高于阈值的像素索引。
pub fn points_of_interest(scores: &[f64], threshold: f64) -> Vec<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score > threshold)
        .map(|(index, _)| index)
        .collect()
}

fn adaptive_pairs(grid: &PixelGrid, scores: &[f64]) -> Result<Vec<PixelPair>, StegoError> {
    let pixel_count = grid.pixel_count();
    if scores.len() < pixel_count {
        return Err(StegoError::ScoreLengthMismatch {
            expected: pixel_count,
            actual: scores.len(),
        });
    }

    let poi = points_of_interest(scores, threshold(scores));
    tracing::debug!(
        selected = poi.len(),
        candidates = scores.len(),
        "points of interest selected"
    );

    let width = grid.width();
    let mut claimed = vec![false; pixel_count];
    let pairs: Vec<PixelPair> = poi
        .into_iter()
        .filter(|&index| index < pixel_count)
        .filter_map(|first| {
            let (row, col) = grid.coordinates(first);
            let second = row * width + (col + 1) % width;
            if first == second || claimed[first] || claimed[second] {
                return None;
            }
            claimed[first] = true;
            claimed[second] = true;
            Some(PixelPair { first, second })
        })
        .collect();

    if pairs.is_empty() {
        return Err(StegoError::NoSelectableSites);
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(first: usize, second: usize) -> PixelPair {
        PixelPair { first, second }
    }

    #[test]
    fn test_sequential_pairs_cover_grid() {
        let grid = PixelGrid::filled(1, 5, 1, 0).unwrap();
        let pairs: Vec<_> = SiteSelector::Sequential.sites(&grid).unwrap().collect();
        assert_eq!(pairs, vec![pair(0, 1), pair(2, 3)]);
    }

    #[test]
    fn test_threshold_is_scaled_mean() {
        let t = threshold(&[1.0, 2.0, 3.0, 6.0]);
        assert!((t - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_points_keep_index_order() {
        let scores = [9.0, 0.0, 3.0, 8.0, 1.0];
        assert_eq!(points_of_interest(&scores, 2.5), vec![0, 2, 3]);
    }

    #[test]
    fn test_adaptive_pairs_wrap_within_row() {
        let grid = PixelGrid::filled(2, 3, 1, 0).unwrap();
        let scores = [0.0, 0.0, 5.0, 0.0, 5.0, 0.0];
        let pairs: Vec<_> = SiteSelector::Adaptive { scores: &scores }
            .sites(&grid)
            .unwrap()
            .collect();
        assert_eq!(pairs, vec![pair(2, 0), pair(4, 5)]);
    }

    #[test]
    fn test_adaptive_pairs_never_overlap() {
        let grid = PixelGrid::filled(1, 5, 1, 0).unwrap();
        let scores = [1.0, 1.0, 1.0, 1.0, 1.0];
        let pairs: Vec<_> = SiteSelector::Adaptive { scores: &scores }
            .sites(&grid)
            .unwrap()
            .collect();
        assert_eq!(pairs, vec![pair(0, 1), pair(2, 3)]);
    }

    #[test]
    fn test_constant_zero_scores_select_nothing() {
        let grid = PixelGrid::filled(4, 4, 1, 0).unwrap();
        let scores = [0.0; 16];
        let result = SiteSelector::Adaptive { scores: &scores }.sites(&grid);
        assert!(matches!(result, Err(StegoError::NoSelectableSites)));
    }

    #[test]
    fn test_single_column_has_no_pairs() {
        let grid = PixelGrid::filled(3, 1, 1, 0).unwrap();
        let scores = [0.0, 4.0, 0.0];
        let result = SiteSelector::Adaptive { scores: &scores }.sites(&grid);
        assert!(matches!(result, Err(StegoError::NoSelectableSites)));
    }

    #[test]
    fn test_short_score_array_is_rejected() {
        let grid = PixelGrid::filled(2, 2, 1, 0).unwrap();
        let scores = [1.0, 2.0, 3.0];
        let result = SiteSelector::Adaptive { scores: &scores }.sites(&grid);
        assert!(matches!(
            result,
            Err(StegoError::ScoreLengthMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_extra_scores_beyond_grid_are_ignored() {
        let grid = PixelGrid::filled(1, 2, 1, 0).unwrap();
        let scores = [5.0, 0.0, 9.0, 9.0];
        let pairs: Vec<_> = SiteSelector::Adaptive { scores: &scores }
            .sites(&grid)
            .unwrap()
            .collect();
        assert_eq!(pairs, vec![pair(0, 1)]);
    }
}
