//! # 错误类型模块
//!
//! [`StegoError`] 覆盖了隐写核心 (选点、嵌入、提取) 中所有可同步检测到的失败情况。
//! 上层的命令处理逻辑使用 `anyhow` 为这些错误附加文件路径等上下文。

use thiserror::Error;

/// 编码或解码过程中可能出现的错误。
///
/// 所有错误都不会在内部重试；是否换用更大的载体图像由调用方决定。
/// 通道钳制导致的静默数据损坏不属于错误，详见 [`crate::pair::embed`]。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 载体在当前选点策略下无法容纳整个比特流。
    #[error("image capacity insufficient for message length: {required} bits required, only {embedded} bits could be embedded")]
    InsufficientCapacity { required: usize, embedded: usize },

    /// 自适应选点没有找到任何高于阈值的兴趣点。
    #[error("no suitable points of interest found in the image")]
    NoSelectableSites,

    /// 解码遍历完所有像素对仍未遇到终止符。
    #[error("no terminator found: the image may not contain a hidden message")]
    TerminatorNotFound,

    /// 网格既不是二维也不是三维，或者数据长度与形状不符。
    #[error("unsupported image shape {shape:?} for {len} bytes of pixel data")]
    UnsupportedImageShape { shape: Vec<usize>, len: usize },

    /// 兴趣分数的数量少于像素数量。
    #[error("interest scores cover {actual} pixels, but the image has {expected}")]
    ScoreLengthMismatch { expected: usize, actual: usize },

    /// 字符的码点超出单字节范围，无法按 8 比特编码。
    #[error("character {character:?} at index {index} does not fit in a single byte")]
    UnencodableCharacter { character: char, index: usize },
}
