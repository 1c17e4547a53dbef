//! 文字区域的空间匹配

use super::types::TextRegion;
use crate::utils::geometry::{contains, distance, intersects, Point, Rect};

/// 被指向的文字区域
///
/// 框包含该点，或者框中心在 `radius` 以内 (容忍检测抖动)
pub fn regions_at_point<'a>(regions: &'a [TextRegion], point: Point, radius: f64) -> Vec<&'a TextRegion> {
    regions
        .iter()
        .filter(|r| {
            contains(&r.bounding_box, point) || distance(r.bounding_box.center(), point) <= radius
        })
        .collect()
}

/// 与上下文区域相交的文字区域
pub fn regions_in_rect<'a>(regions: &'a [TextRegion], rect: &Rect) -> Vec<&'a TextRegion> {
    regions
        .iter()
        .filter(|r| intersects(&r.bounding_box, rect))
        .collect()
}
