//! サイズカタログモジュール
//!
//! 規格サイズの一覧をJSONから読み込み、単位・色で絞り込んで走査する。
//! 読み込み後は変更しない。

use crate::error::Result;
use crate::invoice::PriceTable;
use crate::units::{Length, Unit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// 色コード（大文字に正規化して保持）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ColorCode(String);

impl ColorCode {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ColorCode {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for ColorCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<ColorCode> for String {
    fn from(value: ColorCode) -> Self {
        value.0
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// カタログの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRecord {
    #[serde(rename = "Height(H)")]
    pub height: f64,
    #[serde(rename = "Width(W)")]
    pub width: f64,
    #[serde(rename = "Unit")]
    pub unit: Unit,
    #[serde(rename = "Color")]
    pub color: ColorCode,
    /// 表示用サイズ（例: "120x180"）
    #[serde(rename = "Size(HxW)", default, skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,
    #[serde(rename = "Amazon Link", default)]
    pub purchase_link: String,
    /// 行ごとの価格列（窓用カタログのみ）
    #[serde(flatten)]
    pub prices: PriceTable,
}

impl SizeRecord {
    pub fn new(height: f64, width: f64, unit: Unit, color: &str) -> Self {
        Self {
            height,
            width,
            unit,
            color: ColorCode::new(color),
            size_label: None,
            purchase_link: String::new(),
            prices: PriceTable::default(),
        }
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.purchase_link = link.to_string();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.size_label = Some(label.to_string());
        self
    }

    pub fn with_prices(mut self, prices: PriceTable) -> Self {
        self.prices = prices;
        self
    }

    /// 固定小数点の (高さ, 幅)
    pub fn lengths(&self) -> (Length, Length) {
        (
            Length::from_value(self.height, self.unit),
            Length::from_value(self.width, self.unit),
        )
    }

    /// 向きを問わず寸法が一致するか
    pub fn dimensions_equal(&self, height: Length, width: Length) -> bool {
        let (h, w) = self.lengths();
        (h == height && w == width) || (h == width && w == height)
    }

    /// 注文用のサイズ表記（ラベルがなければ "H x W 単位"）
    pub fn size_description(&self) -> String {
        match &self.size_label {
            Some(label) if !label.trim().is_empty() => format!("{} {}", label.trim(), self.unit),
            _ => self.dimensions_text(),
        }
    }

    pub fn dimensions_text(&self) -> String {
        format!("{} x {} {}", self.height, self.width, self.unit)
    }

    fn is_valid(&self) -> bool {
        self.height.is_finite() && self.width.is_finite() && self.height > 0.0 && self.width > 0.0
    }
}

/// 単位・色ごとの件数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSummary {
    pub total: usize,
    pub by_unit: BTreeMap<Unit, usize>,
    pub by_color: BTreeMap<ColorCode, usize>,
}

/// 読み込み済みのサイズカタログ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeCatalog {
    records: Vec<SizeRecord>,
}

impl SizeCatalog {
    pub fn new(records: Vec<SizeRecord>) -> Self {
        Self { records }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON配列から読み込み
    ///
    /// 寸法が正でない行は読み飛ばす。
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<SizeRecord> = serde_json::from_str(json)?;
        let total = rows.len();

        let records: Vec<SizeRecord> = rows.into_iter().filter(SizeRecord::is_valid).collect();
        if records.len() < total {
            tracing::warn!(
                skipped = total - records.len(),
                "catalog rows with non-positive dimensions skipped"
            );
        }

        tracing::debug!(records = records.len(), "size catalog loaded");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SizeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 指定単位・色の行を読み込み順に走査
    pub fn scan<'a>(
        &'a self,
        unit: Unit,
        color: &ColorCode,
    ) -> impl Iterator<Item = &'a SizeRecord> + 'a {
        let color = color.clone();
        self.records
            .iter()
            .filter(move |record| record.unit == unit && record.color == color)
    }

    pub fn has_color(&self, color: &ColorCode) -> bool {
        self.records.iter().any(|record| &record.color == color)
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            *summary.by_unit.entry(record.unit).or_default() += 1;
            *summary.by_color.entry(record.color.clone()).or_default() += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::PriceTier;

    const SAMPLE: &str = r#"[
        {"Height(H)": 120, "Width(W)": 180, "Unit": "cm", "Color": "Black",
         "Amazon Link": "https://example.com/120x180", "Size(HxW)": "120x180"},
        {"Height(H)": 7.5, "Width(W)": 7.5, "Unit": "Feet", "Color": "BLACK",
         "Amazon Link": "https://example.com/7.5ft"},
        {"Height(H)": 100, "Width(W)": 150, "Unit": "Cm", "Color": "gr",
         "Amazon Link": "https://example.com/100x150",
         "Selling Price": 1299, "Deal Price": "1199", "Event Price": 1099},
        {"Height(H)": 0, "Width(W)": 150, "Unit": "Cm", "Color": "GR",
         "Amazon Link": "https://example.com/broken"}
    ]"#;

    #[test]
    fn test_from_json_normalizes_unit_and_color() {
        let catalog = SizeCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let first = &catalog.records()[0];
        assert_eq!(first.unit, Unit::Cm);
        assert_eq!(first.color.as_str(), "BLACK");
        assert_eq!(first.size_label.as_deref(), Some("120x180"));
        assert!(first.prices.is_empty());
    }

    #[test]
    fn test_from_json_reads_record_prices() {
        let catalog = SizeCatalog::from_json(SAMPLE).unwrap();
        let window = &catalog.records()[2];
        assert_eq!(window.prices.get(PriceTier::Selling), Some(1299.0));
        assert_eq!(window.prices.get(PriceTier::Deal), Some(1199.0));
        assert_eq!(window.prices.get(PriceTier::Event), Some(1099.0));
    }

    #[test]
    fn test_from_json_rejects_malformed_feed() {
        assert!(SizeCatalog::from_json("{ not json").is_err());
        assert!(SizeCatalog::from_json(r#"[{"Height(H)": 1}]"#).is_err());
        assert!(SizeCatalog::from_json(
            r#"[{"Height(H)": 1, "Width(W)": 2, "Unit": "Yard", "Color": "BK"}]"#
        )
        .is_err());
    }

    #[test]
    fn test_scan_filters_by_unit_and_color() {
        let catalog = SizeCatalog::from_json(SAMPLE).unwrap();
        let black = ColorCode::new("black");

        let cm: Vec<_> = catalog.scan(Unit::Cm, &black).collect();
        assert_eq!(cm.len(), 1);
        assert_eq!(cm[0].height, 120.0);

        let feet: Vec<_> = catalog.scan(Unit::Feet, &black).collect();
        assert_eq!(feet.len(), 1);

        assert_eq!(catalog.scan(Unit::Cm, &ColorCode::new("WH")).count(), 0);
    }

    #[test]
    fn test_dimensions_equal_either_orientation() {
        let record = SizeRecord::new(120.0, 180.0, Unit::Cm, "BLACK");
        assert!(record.dimensions_equal(Length::from_cm(120.0), Length::from_cm(180.0)));
        assert!(record.dimensions_equal(Length::from_cm(180.0), Length::from_cm(120.0)));
        assert!(!record.dimensions_equal(Length::from_cm(120.0), Length::from_cm(181.0)));
    }

    #[test]
    fn test_size_description() {
        let labelled = SizeRecord::new(120.0, 180.0, Unit::Cm, "BLACK").with_label("120x180");
        assert_eq!(labelled.size_description(), "120x180 Cm");

        let bare = SizeRecord::new(7.5, 7.0, Unit::Feet, "BLACK");
        assert_eq!(bare.size_description(), "7.5 x 7 Feet");
    }

    #[test]
    fn test_summary_counts() {
        let catalog = SizeCatalog::from_json(SAMPLE).unwrap();
        let summary = catalog.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_unit.get(&Unit::Cm), Some(&2));
        assert_eq!(summary.by_unit.get(&Unit::Feet), Some(&1));
        assert_eq!(summary.by_color.get(&ColorCode::new("BLACK")), Some(&2));
        assert!(catalog.has_color(&ColorCode::new("gr")));
    }

    #[test]
    fn test_scan_results_outlive_color_argument() {
        let catalog = SizeCatalog::from_json(SAMPLE).unwrap();
        // 色コードは一時値でも、結果はカタログの寿命で使える
        let found: Vec<&SizeRecord> = {
            let color = ColorCode::new("black");
            catalog.scan(Unit::Cm, &color).collect()
        };
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].height, 120.0);
    }

    #[test]
    fn test_color_code_serializes_uppercase() {
        let json = serde_json::to_string(&ColorCode::new(" grey ")).unwrap();
        assert_eq!(json, r#""GREY""#);
    }
}
