//! 二维几何工具
//!
//! 所有坐标都是归一化的 `[0,1]×[0,1]`，y 轴向上 (原点在左下角)。

use serde::{Deserialize, Serialize};

/// 二维点
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 轴对齐矩形
///
/// `(x, y)` 是左下角；`width`/`height` 是有符号的，
/// 角点顺序与约定不一致时会出现负值。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// 有符号面积
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// 中心点
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// 标准化：宽高为非负
    pub fn standardized(&self) -> Rect {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Rect { x, y, width, height }
    }

    fn min_x(&self) -> f64 {
        self.x
    }

    fn max_x(&self) -> f64 {
        self.x + self.width
    }

    fn min_y(&self) -> f64 {
        self.y
    }

    fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// 欧氏距离
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// 中点
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// 由左上角和右下角构造矩形
///
/// y 轴向上，所以 `height = top_left.y - bottom_right.y`。
/// 结果保留符号，不取绝对值。
pub fn rect_from_corners(top_left: Point, bottom_right: Point) -> Rect {
    Rect {
        x: top_left.x,
        y: bottom_right.y,
        width: bottom_right.x - top_left.x,
        height: top_left.y - bottom_right.y,
    }
}

/// 两个矩形是否相交 (仅接触边界不算)
pub fn intersects(r1: &Rect, r2: &Rect) -> bool {
    let a = r1.standardized();
    let b = r2.standardized();

    a.min_x() < b.max_x() && b.min_x() < a.max_x() && a.min_y() < b.max_y() && b.min_y() < a.max_y()
}

/// 矩形是否包含点 (含边界)
pub fn contains(rect: &Rect, point: Point) -> bool {
    let r = rect.standardized();
    point.x >= r.min_x() && point.x <= r.max_x() && point.y >= r.min_y() && point.y <= r.max_y()
}
