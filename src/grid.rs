//! # 像素网格模块
//!
//! 灰度图与彩色图统一由 [`PixelGrid`] 表示，通道数在边界处确定一次，
//! 之后的嵌入/提取逻辑不再区分图像形状。

use crate::constants::MAX_CHANNELS;
use crate::error::StegoError;

/// 按行优先顺序存储、通道交错排列的 8 位像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// 由形状和原始数据构造网格。
    ///
    /// `shape` 为 `[height, width]` (单通道) 或 `[height, width, channels]`。
    ///
    /// # Errors
    ///
    /// 形状维数不是 2 或 3、通道数为 0 或超过 4、或者 `data` 长度与形状不符时，
    /// 返回 [`StegoError::UnsupportedImageShape`]。
    pub fn from_shape(shape: &[usize], data: Vec<u8>) -> Result<Self, StegoError> {
        let unsupported = || StegoError::UnsupportedImageShape {
            shape: shape.to_vec(),
            len: data.len(),
        };

        let (height, width, channels) = match *shape {
            [height, width] => (height, width, 1),
            [height, width, channels] if (1..=MAX_CHANNELS).contains(&channels) => {
                (height, width, channels)
            }
            _ => return Err(unsupported()),
        };

        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(unsupported)?;
        if expected != data.len() {
            return Err(unsupported());
        }

        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    /// 创建所有通道值都为 `value` 的网格。
    pub fn filled(
        height: usize,
        width: usize,
        channels: usize,
        value: u8,
    ) -> Result<Self, StegoError> {
        let len = height * width * channels;
        Self::from_shape(&[height, width, channels], vec![value; len])
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 像素总数 (`height × width`)。
    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// 网格形状：单通道为二维，多通道为三维。
    pub fn shape(&self) -> Vec<usize> {
        match self.channels {
            1 => vec![self.height, self.width],
            c => vec![self.height, self.width, c],
        }
    }

    /// 按扁平索引读取一个像素的全部通道。
    pub fn pixel(&self, index: usize) -> &[u8] {
        let start = index * self.channels;
        &self.data[start..start + self.channels]
    }

    /// 按扁平索引覆盖一个像素。`values` 的长度必须等于通道数。
    pub fn set_pixel(&mut self, index: usize, values: &[u8]) {
        let start = index * self.channels;
        self.data[start..start + self.channels].copy_from_slice(values);
    }

    /// 将扁平索引换算为 `(row, col)`。
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
