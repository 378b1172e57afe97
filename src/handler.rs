//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::carrier::{load_grid, output_format, save_grid};
use crate::cli::{DecodeArgs, EncodeArgs, selector};
use crate::error::StegoError;
use crate::grid::PixelGrid;
use crate::steganography::PvdCodec;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责读取图像和待隐藏的文本、调用隐写核心函数嵌入消息、
/// 对结果做一次自检解码，最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与编解码选项的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或文本文件，或消息为空。
/// * 图像没有足够的空间来隐藏消息，或者找不到可用的兴趣点。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    ensure_writable(&args.output, args.force)?;

    let message = match (&args.message, &args.text) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Encoding requires --message or --text."),
    };
    anyhow::ensure!(!message.is_empty(), "The message to hide is empty.");

    let (grid, source_format) = load_grid(&args.input_image)?;
    let codec = args.codec.codec();
    let scores = args.codec.scores(&grid);
    let sites = selector(scores.as_deref());

    let stego = match codec.encode(&grid, &message, sites) {
        Ok(stego) => stego,
        Err(err @ StegoError::InsufficientCapacity { required, .. }) => {
            let available = codec.capacity_bits(&grid, sites).unwrap_or(0);
            return Err(anyhow::Error::new(err).context(format!(
                "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
                required.to_string().red().bold(),
                available.to_string().green().bold()
            )));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err).context(format!(
                "Failed to hide the message in {}",
                args.input_image.to_string_lossy().red().bold()
            )));
        }
    };

    let stego_scores = args.codec.scores(&stego);
    if !round_trips(codec, &stego, &message, stego_scores.as_deref()) {
        tracing::warn!("encoded image does not decode back to the message");
        eprintln!(
            "{} the message will not decode back exactly from {} (pixel clamping, a capacity bracket change, or a shifted point-of-interest set).",
            "Warning:".yellow().bold(),
            args.output.to_string_lossy().yellow()
        );
    }

    save_grid(&stego, &args.output, output_format(&args.output, source_format))?;

    println!(
        "Message encoded successfully. Stego image saved as {}",
        args.output.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数得到消息并打印，
/// 指定了 `--text` 时同时将消息写入文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入路径、可选输出路径与编解码选项的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中找不到终止符或可用的兴趣点。
/// * 无法写入到目标文本文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    if let Some(path) = &args.text {
        ensure_writable(path, args.force)?;
    }

    let (grid, _) = load_grid(&args.input_image)?;
    let codec = args.codec.codec();
    let scores = args.codec.scores(&grid);

    let message = codec
        .decode(&grid, selector(scores.as_deref()))
        .with_context(|| {
            format!(
                "Failed to recover a message from '{}'. \nThe image may not contain a hidden message or was encoded with different options.",
                args.input_image.to_string_lossy().red().bold()
            )
        })?;

    if let Some(path) = &args.text {
        fs::write(path, &message).with_context(|| {
            format!(
                "Unable to write to target text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
        println!(
            "The text has been successfully recovered and saved: {}",
            path.to_string_lossy().green().bold()
        );
    }

    println!("Decoded message: {message}");
    Ok(())
}

/// 用与编码相同的配置解码 `stego`，检查能否得到原始消息。
///
/// `scores` 应当由 `stego` 本身计算，与之后解码时看到的兴趣分数一致。
pub fn round_trips(
    codec: PvdCodec,
    stego: &PixelGrid,
    message: &str,
    scores: Option<&[f64]>,
) -> bool {
    codec
        .decode(stego, selector(scores))
        .is_ok_and(|recovered| recovered == message)
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
