//! 製品ライン設定
//!
//! 上限寸法・採点方式・色・価格の出所など、製品ライン（ドア用/窓用）で
//! 異なる部分をまとめる。組み込みプリセットとJSONファイルの両方に対応。

use crate::catalog::ColorCode;
use crate::closest::ScoringPolicy;
use crate::error::{Error, Result};
use crate::invoice::PriceTable;
use crate::limit::Envelope;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 色コードと表示名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorOption {
    pub code: ColorCode,
    pub name: String,
}

impl ColorOption {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: ColorCode::new(code),
            name: name.to_string(),
        }
    }
}

/// 請求時の単価の出所
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PriceSource {
    /// 製品ライン共通の固定価格表
    Fixed { table: PriceTable },
    /// カタログ行ごとの価格列
    PerRecord,
}

/// 注文明細に載せるサイズ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSize {
    /// カタログ行のサイズ（ラベル、近似一致は "H x W Cm"）
    #[default]
    Record,
    /// 利用者が入力したサイズ
    Request,
}

/// 製品ラインごとの文面の違い
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wording {
    /// 上限超過の見出し（"SIZE LIMIT EXCEEDED: " の後）
    pub limit_exceeded: String,
    /// 請求書・管理者向け文面に数量行を出す
    pub quantity_lines: bool,
}

impl Default for Wording {
    fn default() -> Self {
        Self {
            limit_exceeded: "CONTACT Team".into(),
            quantity_lines: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    pub name: String,
    /// 開口部の呼び方（"Door" / "Window"）
    pub opening_label: String,
    pub envelope: Envelope,
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    pub pricing: PriceSource,
    #[serde(default)]
    pub order_size: OrderSize,
    #[serde(default)]
    pub wording: Wording,
}

impl ProductLine {
    pub const PRESETS: [&'static str; 2] = ["door", "window"];

    /// 組み込みプリセットを取得
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "door" | "doors" => Some(Self::door()),
            "window" | "windows" => Some(Self::window()),
            _ => None,
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let line: Self = serde_json::from_str(json)?;
        line.validate()?;
        Ok(line)
    }

    /// ドア用（マグネット式）
    pub fn door() -> Self {
        Self {
            name: "door".into(),
            opening_label: "Door".into(),
            envelope: Envelope::new(117.0, 217.0),
            scoring: ScoringPolicy::tolerance_window(),
            colors: vec![
                ColorOption::new("BLACK", "Black"),
                ColorOption::new("GREY", "Grey"),
                ColorOption::new("BROWN", "Brown"),
            ],
            pricing: PriceSource::Fixed {
                table: PriceTable::new(880.0, 826.0, 799.0),
            },
            order_size: OrderSize::Record,
            wording: Wording::default(),
        }
    }

    /// 窓用
    pub fn window() -> Self {
        Self {
            name: "window".into(),
            opening_label: "Window".into(),
            envelope: Envelope::new(183.0, 338.0),
            scoring: ScoringPolicy::undersize_penalty(),
            colors: vec![
                ColorOption::new("BK", "Black"),
                ColorOption::new("GR", "Grey"),
                ColorOption::new("CR", "Cream"),
                ColorOption::new("WH", "White"),
            ],
            pricing: PriceSource::PerRecord,
            order_size: OrderSize::Request,
            wording: Wording {
                limit_exceeded: "FREE Customization Available".into(),
                quantity_lines: true,
            },
        }
    }

    /// 色コードの表示名（未登録は "Unknown"）
    pub fn color_name(&self, code: &ColorCode) -> &str {
        self.colors
            .iter()
            .find(|option| &option.code == code)
            .map(|option| option.name.as_str())
            .unwrap_or("Unknown")
    }

    fn validate(&self) -> Result<()> {
        let envelope = &self.envelope;
        if !(envelope.max_width_cm > 0.0 && envelope.max_height_cm > 0.0) {
            return Err(Error::Config(format!(
                "product line {}: envelope must be positive",
                self.name
            )));
        }
        if self.opening_label.trim().is_empty() {
            return Err(Error::Config(format!(
                "product line {}: opening_label is empty",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::PriceTier;

    #[test]
    fn test_from_preset() {
        assert_eq!(ProductLine::from_preset("door").unwrap().opening_label, "Door");
        assert_eq!(ProductLine::from_preset("Windows").unwrap().name, "window");
        assert!(ProductLine::from_preset("gate").is_none());
    }

    #[test]
    fn test_presets_differ_in_policy_and_envelope() {
        let door = ProductLine::door();
        let window = ProductLine::window();
        assert_eq!(door.envelope, Envelope::new(117.0, 217.0));
        assert_eq!(window.envelope, Envelope::new(183.0, 338.0));
        assert_eq!(door.scoring.name(), "tolerance_window");
        assert_eq!(window.scoring.name(), "undersize_penalty");
        assert_eq!(window.pricing, PriceSource::PerRecord);
        assert_eq!(door.order_size, OrderSize::Record);
        assert_eq!(window.order_size, OrderSize::Request);
        assert!(window.wording.quantity_lines);
        assert!(!door.wording.quantity_lines);
    }

    #[test]
    fn test_door_fixed_prices() {
        match ProductLine::door().pricing {
            PriceSource::Fixed { table } => {
                assert_eq!(table.get(PriceTier::Selling), Some(880.0));
                assert_eq!(table.get(PriceTier::Deal), Some(826.0));
                assert_eq!(table.get(PriceTier::Event), Some(799.0));
            }
            PriceSource::PerRecord => panic!("door uses fixed prices"),
        }
    }

    #[test]
    fn test_color_name() {
        let window = ProductLine::window();
        assert_eq!(window.color_name(&ColorCode::new("cr")), "Cream");
        assert_eq!(window.color_name(&ColorCode::new("BLACK")), "Unknown");
        assert_eq!(ProductLine::door().color_name(&ColorCode::new("BLACK")), "Black");
    }

    #[test]
    fn test_from_json_custom_line() {
        let json = r#"{
            "name": "sliding",
            "opening_label": "Sliding Door",
            "envelope": {"max_width_cm": 150, "max_height_cm": 217},
            "scoring": {"kind": "tolerance_window", "tolerance_cm": 3},
            "colors": [{"code": "black", "name": "Black"}],
            "pricing": {"source": "fixed", "table": {"Selling Price": 999, "Deal Price": 949, "Event Price": 899}}
        }"#;
        let line = ProductLine::from_json(json).unwrap();
        assert_eq!(line.envelope, Envelope::new(150.0, 217.0));
        assert_eq!(line.color_name(&ColorCode::new("BLACK")), "Black");
        // 省略時はカタログ行のサイズ・既定の文面
        assert_eq!(line.order_size, OrderSize::Record);
        assert_eq!(line.wording, Wording::default());
        match line.scoring {
            ScoringPolicy::ToleranceWindow(p) => {
                assert_eq!(p.tolerance_cm, 3.0);
                assert_eq!(p.width_undersize_cm, 1.0);
            }
            other => panic!("unexpected policy {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_bad_envelope() {
        let json = r#"{
            "name": "broken",
            "opening_label": "Door",
            "envelope": {"max_width_cm": 0, "max_height_cm": 217},
            "scoring": {"kind": "undersize_penalty"},
            "pricing": {"source": "per_record"}
        }"#;
        assert!(matches!(ProductLine::from_json(json), Err(Error::Config(_))));
    }
}
