//! # 载体图像读写
//!
//! 负责图像文件与 [`PixelGrid`] 之间的转换：灰度图读为单通道网格，其余图像统一转换为 RGB。
//! 文件格式与色彩模式的处理全部集中在此，隐写核心只接触像素网格。

use crate::grid::PixelGrid;
use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageFormat, ImageReader, RgbImage, RgbaImage};
use std::path::Path;

/// 读取图像文件，返回像素网格以及原始文件格式 (若可识别)。
///
/// # Errors
///
/// 文件无法打开或无法解码时返回错误。
pub fn load_grid(path: &Path) -> Result<(PixelGrid, Option<ImageFormat>)> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
    let format = reader.format();

    let image = reader.decode().with_context(|| {
        format!(
            "Unable to decode image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    let grid = if image.color().has_color() {
        let rgb = image.to_rgb8();
        let shape = [rgb.height() as usize, rgb.width() as usize, 3];
        PixelGrid::from_shape(&shape, rgb.into_raw())?
    } else {
        let gray = image.to_luma8();
        let shape = [gray.height() as usize, gray.width() as usize];
        PixelGrid::from_shape(&shape, gray.into_raw())?
    };

    tracing::debug!(
        height = grid.height(),
        width = grid.width(),
        channels = grid.channels(),
        ?format,
        "carrier image loaded"
    );
    Ok((grid, format))
}

/// 选择输出格式：优先使用输出路径的扩展名，其次是输入图像的格式，最后回退到 PNG。
pub fn output_format(path: &Path, source: Option<ImageFormat>) -> ImageFormat {
    ImageFormat::from_path(path)
        .ok()
        .or(source)
        .unwrap_or(ImageFormat::Png)
}

/// 将像素网格按 `format` 写入 `path`。
///
/// # Errors
///
/// 网格尺寸超出图像格式的范围或写入失败时返回错误。
pub fn save_grid(grid: &PixelGrid, path: &Path, format: ImageFormat) -> Result<()> {
    let width = u32::try_from(grid.width()).context("Image width exceeds u32")?;
    let height = u32::try_from(grid.height()).context("Image height exceeds u32")?;
    let channels = grid.channels();
    let raw = grid.as_bytes().to_vec();

    let image = match channels {
        1 => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        _ => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
    }
    .with_context(|| format!("Pixel data does not match a {width}x{height}x{channels} image"))?;

    image.save_with_format(path, format).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}
