//! # pvd_hide 库
//!
//! 本库包含自适应像素值差分 (PVD) 隐写工具的核心逻辑：
//! 容量模型、像素对编解码、比特流分帧、选点策略以及串联它们的编解码流程。

// 声明库包含的所有模块。

pub mod capacity;
pub mod carrier;
pub mod cli;
pub mod constants;
pub mod error;
pub mod features;
pub mod framer;
pub mod grid;
pub mod handler;
pub mod logging;
pub mod pair;
pub mod sites;
pub mod steganography;

pub use error::StegoError;
pub use grid::PixelGrid;
pub use sites::SiteSelector;
pub use steganography::PvdCodec;
