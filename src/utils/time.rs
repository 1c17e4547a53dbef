//! 时间工具

use std::time::{SystemTime, UNIX_EPOCH};

/// 获取当前 Unix 时间戳 (秒)
///
/// 系统时钟早于 Unix 纪元时返回 0
pub fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// 格式化时间戳为 MM:SS.ms (用于日志)
pub fn format_mmss_ms(seconds: f64) -> String {
    let mm = (seconds / 60.0) as u32;
    let ss = (seconds % 60.0) as u32;
    let ms = ((seconds % 1.0) * 1000.0) as u32;
    format!("{:02}:{:02}.{:03}", mm, ss, ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_positive() {
        assert!(now() > 0.0);
    }

    #[test]
    fn test_format_mmss_ms() {
        assert_eq!(format_mmss_ms(0.0), "00:00.000");
        assert_eq!(format_mmss_ms(65.25), "01:05.250");
    }
}
