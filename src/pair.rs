//! # 像素对编解码
//!
//! 在一个像素对中嵌入一组比特，或从像素对中提取一组比特。
//! 所有的像素调整与钳制运算都在这里完成。

use crate::capacity::{capacity, pixel_difference};
use crate::constants::CHANNEL_MAX;

/// 嵌入时像素调整作用的通道范围。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// 只移动第一个通道，其余通道保持不变。
    FirstChannelOnly,
    /// 所有通道按相同的量一起移动。
    #[default]
    AllChannels,
}

/// 将 `group` 嵌入像素对 `(first, second)`，返回调整后的两个像素。
///
/// `group` 在右侧补 0 到恰好 `capacity(diff)` 位，按无符号整数 `v` 解释。
/// 若 `first[0] >= second[0]`，第一个像素加 `⌊v/2⌋`、第二个像素减 `⌈v/2⌉`；否则方向相反。
/// 结果的每个通道都会钳制到 `[0, 255]`。
///
/// 钳制会静默改变嵌入值，之后提取得到的比特可能与嵌入的不同。这里不检测这种情况。
pub fn embed(first: &[u8], second: &[u8], group: &[bool], mode: ChannelMode) -> (Vec<u8>, Vec<u8>) {
    let budget = capacity(pixel_difference(first, second));
    debug_assert!(group.len() <= budget, "bit-group wider than pair capacity");

    let value = group
        .iter()
        .chain(std::iter::repeat(&false))
        .take(budget)
        .fold(0i16, |acc, &bit| (acc << 1) | i16::from(bit));
    let floor_half = value / 2;
    let ceil_half = (value + 1) / 2;

    let (delta_first, delta_second) = if first[0] >= second[0] {
        (floor_half, -ceil_half)
    } else {
        (-ceil_half, floor_half)
    };

    (
        shift(first, delta_first, mode),
        shift(second, delta_second, mode),
    )
}

/// 从当前的像素对中提取 `capacity` 位比特。
///
/// 取第一个通道差值的二进制表示，左侧补 0；超出 `capacity` 位时只保留低位。
pub fn extract(first: &[u8], second: &[u8], capacity: usize) -> Vec<bool> {
    let diff = pixel_difference(first, second);
    (0..capacity)
        .rev()
        .map(|bit| bit < u32::BITS as usize && (diff >> bit) & 1 == 1)
        .collect()
}

fn shift(pixel: &[u8], delta: i16, mode: ChannelMode) -> Vec<u8> {
    pixel
        .iter()
        .enumerate()
        .map(|(channel, &value)| match mode {
            ChannelMode::FirstChannelOnly if channel > 0 => value,
            _ => (i16::from(value) + delta).clamp(0, CHANNEL_MAX) as u8,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_embed_descending_pair() {
        // 差值 0，容量 3，"101" = 5
        let (a, b) = embed(&[100], &[100], &bits("101"), ChannelMode::AllChannels);
        assert_eq!(a, vec![102]);
        assert_eq!(b, vec![97]);
    }

    #[test]
    fn test_embed_ascending_pair() {
        // 差值 2，容量 3，"011" = 3
        let (a, b) = embed(&[50], &[52], &bits("011"), ChannelMode::AllChannels);
        assert_eq!(a, vec![48]);
        assert_eq!(b, vec![53]);
    }

    #[test]
    fn test_short_group_is_right_padded() {
        // "1" 补齐为 "100" = 4
        let (a, b) = embed(&[10], &[10], &bits("1"), ChannelMode::AllChannels);
        assert_eq!((a[0], b[0]), (12, 8));
        assert_eq!(extract(&a, &b, 3), bits("100"));
    }

    #[test]
    fn test_channel_modes() {
        let p1 = [100, 20, 30];
        let p2 = [100, 40, 50];
        let (a, b) = embed(&p1, &p2, &bits("111"), ChannelMode::FirstChannelOnly);
        assert_eq!(a, vec![103, 20, 30]);
        assert_eq!(b, vec![96, 40, 50]);

        let (a, b) = embed(&p1, &p2, &bits("111"), ChannelMode::AllChannels);
        assert_eq!(a, vec![103, 23, 33]);
        assert_eq!(b, vec![96, 36, 46]);
    }

    #[test]
    fn test_round_trip_when_bracket_is_stable() {
        for value in 0u8..8 {
            let group: Vec<bool> = (0..3).rev().map(|i| (value >> i) & 1 == 1).collect();
            let (a, b) = embed(&[128], &[128], &group, ChannelMode::AllChannels);
            let budget = capacity(pixel_difference(&a, &b));
            assert_eq!(extract(&a, &b, budget), group);
        }
    }

    #[test]
    fn test_extract_left_pads() {
        assert_eq!(extract(&[9], &[7], 5), bits("00010"));
    }

    #[test]
    fn test_extract_truncates_high_bits() {
        // 200 = 0b11001000，只保留低 7 位
        assert_eq!(extract(&[200], &[0], 7), bits("1001000"));
    }

    #[test]
    fn test_clamping_corrupts_embedded_value() {
        // 嵌入 7 需要 254 + 3 = 257，被钳制到 255：差值变为 5 而不是 7
        let (a, b) = embed(&[254], &[254], &bits("111"), ChannelMode::AllChannels);
        assert_eq!((a[0], b[0]), (255, 250));
        assert_eq!(extract(&a, &b, 3), bits("101"));
    }

    #[test]
    fn test_bracket_crossing_changes_extracted_bits() {
        // 差值 10 (容量 4) 嵌入 15 后差值变为 25，读回时落入 5 位区间
        let (a, b) = embed(&[100], &[90], &bits("1111"), ChannelMode::AllChannels);
        assert_eq!((a[0], b[0]), (107, 82));
        let budget = capacity(pixel_difference(&a, &b));
        assert_eq!(budget, 5);
        assert_eq!(extract(&a, &b, budget), bits("11001"));
    }
}
