//! 単位変換モジュール
//!
//! 入力寸法（Cm / Feet / Inch）をcmへ正規化する。
//! 完全一致判定には浮動小数点ではなく固定小数点の `Length` を使う。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 1cmあたりの内部単位数（内部単位 = 1/100 mm）
pub const UNITS_PER_CM: i64 = 1_000;
/// 1インチあたりの内部単位数
pub const UNITS_PER_INCH: i64 = 2_540;
/// 1フィートあたりの内部単位数
pub const UNITS_PER_FOOT: i64 = 30_480;

pub const CM_PER_INCH: f64 = 2.54;
pub const CM_PER_FOOT: f64 = 30.48;
pub const INCHES_PER_FOOT: f64 = 12.0;

/// 寸法の単位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Unit {
    #[default]
    Cm,
    Feet,
    Inch,
}

impl Unit {
    /// cmへの換算係数
    pub fn cm_factor(self) -> f64 {
        match self {
            Unit::Cm => 1.0,
            Unit::Feet => CM_PER_FOOT,
            Unit::Inch => CM_PER_INCH,
        }
    }

    /// 1単位あたりの内部単位数
    pub fn fixed_factor(self) -> i64 {
        match self {
            Unit::Cm => UNITS_PER_CM,
            Unit::Feet => UNITS_PER_FOOT,
            Unit::Inch => UNITS_PER_INCH,
        }
    }

    /// 表示用ラベル
    pub fn label(self) -> &'static str {
        match self {
            Unit::Cm => "Cm",
            Unit::Feet => "Feet",
            Unit::Inch => "Inch",
        }
    }

    /// 文字列から単位を解決する。未知の単位はCmとして扱う。
    pub fn parse_lenient(s: &str) -> Self {
        match s.parse() {
            Ok(unit) => unit,
            Err(_) => {
                tracing::warn!(unit = s, "unrecognized unit, treating as Cm");
                Unit::Cm
            }
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(Unit::Cm),
            "feet" | "foot" | "ft" => Ok(Unit::Feet),
            "inch" | "inches" | "in" => Ok(Unit::Inch),
            _ => Err(format!("Unknown unit: {}. Use Cm, Feet, or Inch", s)),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 固定小数点の長さ（1/100 mm単位）
///
/// cm・インチ・フィートの換算係数がすべて整数になるため、
/// 単位をまたいだ等価判定が厳密に行える。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length(i64);

impl Length {
    pub fn from_value(value: f64, unit: Unit) -> Self {
        Self((value * unit.fixed_factor() as f64).round() as i64)
    }

    pub fn from_cm(value: f64) -> Self {
        Self::from_value(value, Unit::Cm)
    }

    pub fn raw(self) -> i64 {
        self.0
    }

    pub fn as_cm(self) -> f64 {
        self.0 as f64 / UNITS_PER_CM as f64
    }

    pub fn as_feet(self) -> f64 {
        self.0 as f64 / UNITS_PER_FOOT as f64
    }
}

/// cm単位の高さ×幅
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CmSize {
    pub height: f64,
    pub width: f64,
}

impl CmSize {
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }

    /// 高さと幅を入れ替える
    pub fn swapped(self) -> Self {
        Self::new(self.width, self.height)
    }

    /// 大きい方を高さ、小さい方を幅に揃える
    pub fn canonical(self) -> Self {
        Self::new(self.height.max(self.width), self.height.min(self.width))
    }

    pub fn rounded_to_half(self) -> Self {
        Self::new(round_to_nearest_half(self.height), round_to_nearest_half(self.width))
    }
}

impl fmt::Display for CmSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} cm", self.height, self.width)
    }
}

/// 正規化済みサイズ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSize {
    pub height_cm: f64,
    pub width_cm: f64,
    /// Feet/Inch入力のときのみ
    pub height_feet: Option<f64>,
    pub width_feet: Option<f64>,
}

impl NormalizedSize {
    pub fn cm(&self) -> CmSize {
        CmSize::new(self.height_cm, self.width_cm)
    }
}

/// (高さ, 幅, 単位) をcmへ正規化
pub fn normalize(height: f64, width: f64, unit: Unit) -> NormalizedSize {
    let factor = unit.cm_factor();
    let (height_feet, width_feet) = match unit {
        Unit::Feet => (Some(height), Some(width)),
        Unit::Inch => (Some(height / INCHES_PER_FOOT), Some(width / INCHES_PER_FOOT)),
        Unit::Cm => (None, None),
    };

    NormalizedSize {
        height_cm: height * factor,
        width_cm: width * factor,
        height_feet,
        width_feet,
    }
}

/// 0.5刻みに丸める
pub fn round_to_nearest_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}
