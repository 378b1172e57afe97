//! # 兴趣分数
//!
//! 为自适应选点提供每个像素的纹理强度分数。隐写核心只把它当作不透明的排序依据。

use crate::grid::PixelGrid;

/// 计算第一个通道的中心差分梯度幅值 `sqrt(gx² + gy²)`，每个像素一个分数。
///
/// 边界处复制最近的像素值。
pub fn gradient_scores(grid: &PixelGrid) -> Vec<f64> {
    let (height, width) = (grid.height(), grid.width());
    let value = |row: usize, col: usize| f64::from(grid.pixel(row * width + col)[0]);

    (0..grid.pixel_count())
        .map(|index| {
            let (row, col) = grid.coordinates(index);
            let gx = value(row, (col + 1).min(width - 1)) - value(row, col.saturating_sub(1));
            let gy = value((row + 1).min(height - 1), col) - value(row.saturating_sub(1), col);
            gx.hypot(gy)
        })
        .collect()
}
