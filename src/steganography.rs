//! # 隐写核心流程
//!
//! 将选点策略、容量模型、像素对编解码与比特流分帧串联起来：
//! 编码在比特流耗尽时结束，解码在检测到终止符时结束。

use crate::capacity::{capacity, pixel_difference};
use crate::error::StegoError;
use crate::framer::{self, BitAccumulator, BitCursor, TerminationPolicy};
use crate::grid::PixelGrid;
use crate::pair::{self, ChannelMode};
use crate::sites::SiteSelector;

/// PVD 编解码器的配置。
///
/// 编码端与解码端必须使用相同的配置和相同的选点策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PvdCodec {
    pub channel_mode: ChannelMode,
    pub termination: TerminationPolicy,
}

impl PvdCodec {
    /// 顺序选点的默认配置：所有通道一起移动，检查末尾 8 位判断终止。
    pub fn sequential() -> Self {
        Self {
            channel_mode: ChannelMode::AllChannels,
            termination: TerminationPolicy::TrailingWindow,
        }
    }

    /// 自适应选点的默认配置：只移动第一个通道，按字节对齐扫描终止符。
    pub fn adaptive() -> Self {
        Self {
            channel_mode: ChannelMode::FirstChannelOnly,
            termination: TerminationPolicy::ByteAlignedScan,
        }
    }

    pub fn with_channel_mode(mut self, channel_mode: ChannelMode) -> Self {
        self.channel_mode = channel_mode;
        self
    }

    pub fn with_termination(mut self, termination: TerminationPolicy) -> Self {
        self.termination = termination;
        self
    }

    /// 将 `message` 隐藏到 `grid` 的副本中并返回该副本。
    ///
    /// 输入网格不会被修改，失败时调用方手中的图像保持原样。
    ///
    /// # Errors
    ///
    /// * 消息含有无法按单字节编码的字符：[`StegoError::UnencodableCharacter`]。
    /// * 选点失败：[`StegoError::NoSelectableSites`] 或 [`StegoError::ScoreLengthMismatch`]。
    /// * 像素对用尽而比特流尚未写完：[`StegoError::InsufficientCapacity`]。
    #[tracing::instrument(skip_all, fields(chars = message.chars().count()))]
    pub fn encode(
        &self,
        grid: &PixelGrid,
        message: &str,
        selector: SiteSelector<'_>,
    ) -> Result<PixelGrid, StegoError> {
        let mut cursor = BitCursor::new(framer::to_bits(message)?);
        let mut stego = grid.clone();

        for site in selector.sites(grid)? {
            if cursor.is_exhausted() {
                break;
            }

            let (first, second) = (stego.pixel(site.first), stego.pixel(site.second));
            let diff = pixel_difference(first, second);
            let budget = capacity(diff);
            let (row, col) = stego.coordinates(site.first);
            tracing::trace!(row, col, diff, capacity = budget, "embedding at site");

            let group = cursor.take(budget);
            let (new_first, new_second) = pair::embed(first, second, group, self.channel_mode);
            stego.set_pixel(site.first, &new_first);
            stego.set_pixel(site.second, &new_second);
        }

        if !cursor.is_exhausted() {
            return Err(StegoError::InsufficientCapacity {
                required: cursor.len(),
                embedded: cursor.consumed(),
            });
        }

        tracing::debug!(bits = cursor.len(), "message embedded");
        Ok(stego)
    }

    /// 从 `grid` 中恢复隐藏的消息。
    ///
    /// # Errors
    ///
    /// * 选点失败：[`StegoError::NoSelectableSites`] 或 [`StegoError::ScoreLengthMismatch`]。
    /// * 所有像素对都已读取仍未遇到终止符：[`StegoError::TerminatorNotFound`]。
    #[tracing::instrument(skip_all)]
    pub fn decode(
        &self,
        grid: &PixelGrid,
        selector: SiteSelector<'_>,
    ) -> Result<String, StegoError> {
        let mut accumulator = BitAccumulator::new();

        for site in selector.sites(grid)? {
            let (first, second) = (grid.pixel(site.first), grid.pixel(site.second));
            let diff = pixel_difference(first, second);
            let budget = capacity(diff);
            let (row, col) = grid.coordinates(site.first);
            tracing::trace!(row, col, diff, capacity = budget, "extracting at site");

            accumulator.push(&pair::extract(first, second, budget));
            if accumulator.check_terminator(self.termination) {
                tracing::debug!(bits = accumulator.len(), "terminator found");
                return Ok(accumulator.into_message());
            }
        }

        Err(StegoError::TerminatorNotFound)
    }

    /// 当前选点策略下整幅图像可承载的比特总数 (按原始像素值计算各像素对容量之和)。
    pub fn capacity_bits(
        &self,
        grid: &PixelGrid,
        selector: SiteSelector<'_>,
    ) -> Result<usize, StegoError> {
        Ok(selector
            .sites(grid)?
            .map(|site| {
                let diff = pixel_difference(grid.pixel(site.first), grid.pixel(site.second));
                capacity(diff)
            })
            .sum())
    }
}
