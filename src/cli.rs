//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::features::gradient_scores;
use crate::framer::TerminationPolicy;
use crate::grid::PixelGrid;
use crate::pair::ChannelMode;
use crate::sites::SiteSelector;
use crate::steganography::PvdCodec;
use clap::{ArgAction, ArgGroup, Args, Parser, ValueEnum};
use std::path::PathBuf;

/// 一款基于自适应像素值差分 (PVD) 的隐写工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于自适应像素值差分 (PVD) 的隐写工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本。\n每个像素对可承载的比特数由两像素的差值决定 (3 到 7 位)。"
)]
pub struct Cli {
    /// 提高日志详细程度，可重复使用 (-v, -vv, -vvv)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (隐藏) 和 decode (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文本隐藏到图像中。
    Encode(EncodeArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["message", "text"])))]
pub struct EncodeArgs {
    /// 用于隐写的输入图像文件路径。
    pub input_image: PathBuf,

    /// 要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 要隐藏的文本内容的文件路径 (与 --message 二选一)。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 隐写完成后，保存结果图像的输出路径。
    #[arg(short, long)]
    pub output: PathBuf,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已隐藏文本数据的图像文件路径。
    pub input_image: PathBuf,

    /// 恢复文本后，额外保存文本内容的输出路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 编码与解码共用的编解码器选项。解码时必须与编码时保持一致。
#[derive(Args, Debug, Clone)]
pub struct CodecArgs {
    /// 像素对选点策略。
    #[arg(short, long, value_enum, default_value_t = Strategy::Sequential)]
    pub strategy: Strategy,

    /// 覆盖嵌入时调整的通道范围 (默认：sequential 为 all，adaptive 为 first)。
    #[arg(long, value_enum)]
    pub channels: Option<ChannelScope>,

    /// 覆盖解码时的终止符判断策略 (默认：sequential 为 trailing，adaptive 为 scan)。
    #[arg(long, value_enum)]
    pub termination: Option<Termination>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// 按扫描顺序使用相邻像素对。
    Sequential,
    /// 按纹理强度选取兴趣点。
    Adaptive,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelScope {
    /// 只调整第一个通道。
    First,
    /// 调整所有通道。
    All,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// 检查最后 8 位。
    Trailing,
    /// 扫描按字节对齐的全 0 字节。
    Scan,
}

impl From<ChannelScope> for ChannelMode {
    fn from(scope: ChannelScope) -> Self {
        match scope {
            ChannelScope::First => ChannelMode::FirstChannelOnly,
            ChannelScope::All => ChannelMode::AllChannels,
        }
    }
}

impl From<Termination> for TerminationPolicy {
    fn from(termination: Termination) -> Self {
        match termination {
            Termination::Trailing => TerminationPolicy::TrailingWindow,
            Termination::Scan => TerminationPolicy::ByteAlignedScan,
        }
    }
}

impl CodecArgs {
    /// 按选点策略取默认配置，再应用命令行中的覆盖项。
    pub fn codec(&self) -> PvdCodec {
        let mut codec = match self.strategy {
            Strategy::Sequential => PvdCodec::sequential(),
            Strategy::Adaptive => PvdCodec::adaptive(),
        };
        if let Some(scope) = self.channels {
            codec = codec.with_channel_mode(scope.into());
        }
        if let Some(termination) = self.termination {
            codec = codec.with_termination(termination.into());
        }
        codec
    }

    /// 自适应策略需要的兴趣分数；顺序策略返回 `None`。
    pub fn scores(&self, grid: &PixelGrid) -> Option<Vec<f64>> {
        match self.strategy {
            Strategy::Sequential => None,
            Strategy::Adaptive => Some(gradient_scores(grid)),
        }
    }
}

/// 由 [`CodecArgs::scores`] 的结果构造选点策略。
pub fn selector(scores: Option<&[f64]>) -> SiteSelector<'_> {
    match scores {
        Some(scores) => SiteSelector::Adaptive { scores },
        None => SiteSelector::Sequential,
    }
}
