//! 完全一致検索
//!
//! 検索順（最初に見つかったものを採用）:
//! 1. Feet入力 → Feetカタログ
//! 2. Inch入力 → フィート換算してFeetカタログ（換算注記付き）
//! 3. 全単位 → cm換算してCmカタログ

use crate::catalog::{ColorCode, SizeCatalog, SizeRecord};
use crate::units::{Length, Unit};

/// 完全一致の結果
#[derive(Debug, Clone, PartialEq)]
pub struct ExactMatch<'a> {
    pub record: &'a SizeRecord,
    /// インチ入力をフィート表で照合したときの注記
    pub note: Option<String>,
}

pub fn find_exact<'a>(
    catalog: &'a SizeCatalog,
    height: f64,
    width: f64,
    color: &ColorCode,
    unit: Unit,
) -> Option<ExactMatch<'a>> {
    let h = Length::from_value(height, unit);
    let w = Length::from_value(width, unit);

    match unit {
        Unit::Feet => {
            if let Some(record) = find_in_table(catalog, Unit::Feet, h, w, color) {
                return Some(ExactMatch { record, note: None });
            }
        }
        Unit::Inch => {
            if let Some(record) = find_in_table(catalog, Unit::Feet, h, w, color) {
                return Some(ExactMatch {
                    record,
                    note: Some(inch_note(height, width)),
                });
            }
        }
        Unit::Cm => {}
    }

    find_in_table(catalog, Unit::Cm, h, w, color).map(|record| ExactMatch { record, note: None })
}

fn find_in_table<'a>(
    catalog: &'a SizeCatalog,
    table: Unit,
    height: Length,
    width: Length,
    color: &ColorCode,
) -> Option<&'a SizeRecord> {
    catalog
        .scan(table, color)
        .find(|record| record.dimensions_equal(height, width))
}

/// インチ入力の換算注記
pub fn inch_note(height: f64, width: f64) -> String {
    format!("(Original: {} x {} Inches, 12 Inches = 1 Foot)", height, width)
}
