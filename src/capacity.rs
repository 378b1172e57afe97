//! # 容量模型
//!
//! 由像素对第一个通道的差值决定该像素对可承载的比特数。
//! 编码与解码必须使用完全相同的分档表，否则无法还原消息。

use crate::constants::{CAPACITY_BRACKETS, MAX_CAPACITY};

/// 返回差值 `diff` 对应的比特容量，取值范围为 3 到 7。
pub fn capacity(diff: u32) -> usize {
    CAPACITY_BRACKETS
        .iter()
        .find(|&&(upper, _)| diff < upper)
        .map_or(MAX_CAPACITY, |&(_, bits)| bits)
}

/// 两个像素第一个通道 (灰度图即唯一通道) 之差的绝对值。
pub fn pixel_difference(first: &[u8], second: &[u8]) -> u32 {
    u32::from(first[0].abs_diff(second[0]))
}
