/// 容量分档表：`(差值上界, 可嵌入比特数)`。
/// 像素对差值小于某个上界时，使用对应的比特数；超出最后一档的差值统一使用 [`MAX_CAPACITY`]。
pub const CAPACITY_BRACKETS: [(u32, usize); 4] = [(8, 3), (16, 4), (32, 5), (64, 6)];

/// 差值不小于 64 时单个像素对可承载的比特数。
pub const MAX_CAPACITY: usize = 7;

/// 每个字符在比特流中占用的比特数 (一个字节，大端序)。
pub const BITS_PER_CHAR: usize = 8;

/// 终止符的长度：8 个连续的 0 比特。
pub const TERMINATOR_BITS: usize = 8;

/// 自适应选点的阈值系数：阈值 = 兴趣分数均值 × 该系数。
pub const POI_THRESHOLD_FACTOR: f64 = 0.8;

/// 单个通道允许的最大值，嵌入后的像素值会被钳制到 `[0, CHANNEL_MAX]`。
pub const CHANNEL_MAX: i16 = 255;

/// 像素网格支持的最大通道数 (RGBA)。
pub const MAX_CHANNELS: usize = 4;

/// 默认的日志过滤指令，按 `-v` 出现次数依次提升。
pub const LOG_LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];
