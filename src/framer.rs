//! # 比特流分帧
//!
//! 负责消息文本与比特序列之间的转换：每个字符占 8 位 (大端序)，末尾追加 8 个 0 作为终止符。
//! 编码时由 [`BitCursor`] 按可变宽度切出比特组；解码时由 [`BitAccumulator`] 累积比特组并检测终止符。
//!
//! 已知限制：如果消息自身的比特流中恰好出现 8 个连续的 0，它与真正的终止符无法区分，
//! 解码会在此处提前截断。这是该方案本身的行为。
//!
//! 在 [`TerminationPolicy::TrailingWindow`] 下还有一种情况：最后一个字符的末尾若是若干个 0，
//! 这些 0 会和终止符连在一起，窗口可能在真正的终止符结束之前就已全为 0，
//! 于是最后一个字符被截掉 (例如 `"P0"` 解码为 `"P"`)。
//! [`TerminationPolicy::ByteAlignedScan`] 只检查按字节对齐的 8 位组，不受影响。

use crate::constants::{BITS_PER_CHAR, TERMINATOR_BITS};
use crate::error::StegoError;

/// 解码时判断终止符的策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminationPolicy {
    /// 每处理一个像素对后检查最后 8 位是否全为 0，是则丢弃这 8 位并结束。
    #[default]
    TrailingWindow,
    /// 每处理一个像素对后扫描新凑满的、按字节对齐的 8 位组，遇到第一个全 0 字节即在其起点截断。
    ByteAlignedScan,
}

/// 将消息转换为带终止符的比特序列。
///
/// # Errors
///
/// 码点超过 `U+00FF` 的字符无法用一个字节表示，返回 [`StegoError::UnencodableCharacter`]。
pub fn to_bits(message: &str) -> Result<Vec<bool>, StegoError> {
    let mut bits = Vec::with_capacity((message.chars().count() + 1) * BITS_PER_CHAR);

    for (index, character) in message.chars().enumerate() {
        let byte = u8::try_from(character)
            .map_err(|_| StegoError::UnencodableCharacter { character, index })?;
        bits.extend((0..BITS_PER_CHAR).rev().map(|i| (byte >> i) & 1 == 1));
    }

    bits.extend(std::iter::repeat_n(false, TERMINATOR_BITS));
    Ok(bits)
}

/// 将比特序列按 8 位一组还原为文本，末尾不足 8 位的部分被忽略。
pub fn from_bits(bits: &[bool]) -> String {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(|byte| char::from(byte.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))))
        .collect()
}

/// 编码端的比特游标，从比特流前端依次切出比特组。
#[derive(Debug)]
pub struct BitCursor {
    bits: Vec<bool>,
    position: usize,
}

impl BitCursor {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits, position: 0 }
    }

    /// 取出至多 `width` 位；流末尾不足时返回剩余的全部比特。
    pub fn take(&mut self, width: usize) -> &[bool] {
        let start = self.position;
        self.position = (start + width).min(self.bits.len());
        &self.bits[start..self.position]
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.bits.len()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn consumed(&self) -> usize {
        self.position
    }
}

/// 解码端的比特累加器。
#[derive(Debug, Default)]
pub struct BitAccumulator {
    bits: Vec<bool>,
    scanned_bytes: usize,
}

impl BitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: &[bool]) {
        self.bits.extend_from_slice(group);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// 按 `policy` 检查终止符。找到时截断终止符及其后的比特并返回 `true`。
    pub fn check_terminator(&mut self, policy: TerminationPolicy) -> bool {
        match policy {
            TerminationPolicy::TrailingWindow => {
                let len = self.bits.len();
                if len < TERMINATOR_BITS || self.bits[len - TERMINATOR_BITS..].iter().any(|&b| b) {
                    return false;
                }
                self.bits.truncate(len - TERMINATOR_BITS);
                true
            }
            TerminationPolicy::ByteAlignedScan => {
                let complete = self.bits.len() / BITS_PER_CHAR;
                let found = (self.scanned_bytes..complete).find(|&byte| {
                    let start = byte * BITS_PER_CHAR;
                    self.bits[start..start + BITS_PER_CHAR].iter().all(|&b| !b)
                });
                self.scanned_bytes = complete;
                match found {
                    Some(byte) => {
                        self.bits.truncate(byte * BITS_PER_CHAR);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// 将已累积的比特还原为文本。
    pub fn into_message(self) -> String {
        from_bits(&self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().filter(|c| !c.is_whitespace()).map(|c| c == '1').collect()
    }

    #[test]
    fn test_hi_bit_stream() {
        assert_eq!(to_bits("Hi").unwrap(), bits("01001000 01101001 00000000"));
    }

    #[test]
    fn test_empty_message_is_only_terminator() {
        assert_eq!(to_bits("").unwrap(), vec![false; TERMINATOR_BITS]);
    }

    #[test]
    fn test_latin1_is_one_byte() {
        assert_eq!(to_bits("é").unwrap(), bits("11101001 00000000"));
        assert_eq!(from_bits(&bits("11101001")), "é");
    }

    #[test]
    fn test_wide_characters_are_rejected() {
        assert_eq!(
            to_bits("ok✓"),
            Err(StegoError::UnencodableCharacter {
                character: '✓',
                index: 2
            })
        );
    }

    #[test]
    fn test_from_bits_ignores_partial_group() {
        assert_eq!(from_bits(&bits("01001000 0110")), "H");
        assert_eq!(from_bits(&[]), "");
    }

    #[test]
    fn test_cursor_slices_variable_groups() {
        let mut cursor = BitCursor::new(bits("1011001"));
        assert_eq!(cursor.take(3), bits("101").as_slice());
        assert_eq!(cursor.take(5), bits("1001").as_slice());
        assert!(cursor.is_exhausted());
        assert!(cursor.take(3).is_empty());
        assert_eq!(cursor.consumed(), 7);
    }

    #[test]
    fn test_trailing_window_terminator() {
        let mut acc = BitAccumulator::new();
        acc.push(&bits("0000000"));
        assert!(!acc.check_terminator(TerminationPolicy::TrailingWindow));
        acc.push(&bits("00"));
        assert!(acc.check_terminator(TerminationPolicy::TrailingWindow));
        assert_eq!(acc.len(), 1);
        assert_eq!(acc.into_message(), "");
    }

    #[test]
    fn test_trailing_window_ignores_unaligned_interior_runs() {
        // "@ " 中有跨越字节边界的 8 个连续 0
        let mut acc = BitAccumulator::new();
        acc.push(&bits("01000000 00100000"));
        assert!(!acc.check_terminator(TerminationPolicy::TrailingWindow));
    }

    #[test]
    fn test_trailing_window_truncates_early_on_coincidental_run() {
        let mut acc = BitAccumulator::new();
        acc.push(&bits("01000000 00"));
        assert!(acc.check_terminator(TerminationPolicy::TrailingWindow));
        assert_eq!(acc.into_message(), "");
    }

    #[test]
    fn test_byte_aligned_scan_truncates_at_first_zero_byte() {
        let mut acc = BitAccumulator::new();
        acc.push(&bits("01001000 0000"));
        assert!(!acc.check_terminator(TerminationPolicy::ByteAlignedScan));
        acc.push(&bits("0000 01101001 000"));
        assert!(acc.check_terminator(TerminationPolicy::ByteAlignedScan));
        assert_eq!(acc.len(), 8);
        assert_eq!(acc.into_message(), "H");
    }

    #[test]
    fn test_byte_aligned_scan_skips_unaligned_runs() {
        let mut acc = BitAccumulator::new();
        acc.push(&bits("01000000 00100000"));
        assert!(!acc.check_terminator(TerminationPolicy::ByteAlignedScan));
        acc.push(&bits("00000000 1"));
        assert!(acc.check_terminator(TerminationPolicy::ByteAlignedScan));
        assert_eq!(acc.into_message(), "@ ");
    }
}
