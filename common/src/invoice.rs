//! 請求書計算モジュール
//!
//! 価格区分・数量・値引率から明細金額と合計を算出する。
//! 金額は内部では丸めず、表示時にのみ整数へ丸める。

use crate::error::{InvalidInput, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 価格区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "Selling Price")]
    Selling,
    #[serde(rename = "Deal Price")]
    Deal,
    #[serde(rename = "Event Price")]
    Event,
}

impl PriceTier {
    pub const ALL: [PriceTier; 3] = [PriceTier::Selling, PriceTier::Deal, PriceTier::Event];

    pub fn label(self) -> &'static str {
        match self {
            PriceTier::Selling => "Selling Price",
            PriceTier::Deal => "Deal Price",
            PriceTier::Event => "Event Price",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "selling" | "selling price" | "selling-price" => Ok(PriceTier::Selling),
            "deal" | "deal price" | "deal-price" => Ok(PriceTier::Deal),
            "event" | "event price" | "event-price" => Ok(PriceTier::Event),
            _ => Err(format!("Unknown price tier: {}. Use selling, deal, or event", s)),
        }
    }
}

/// 価格区分ごとの単価表
///
/// 製品ライン固定の価格表と、カタログ行ごとの価格列の両方に使う。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    #[serde(
        rename = "Selling Price",
        default,
        deserialize_with = "optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub selling: Option<f64>,
    #[serde(
        rename = "Deal Price",
        default,
        deserialize_with = "optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub deal: Option<f64>,
    #[serde(
        rename = "Event Price",
        default,
        deserialize_with = "optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub event: Option<f64>,
}

impl PriceTable {
    pub fn new(selling: f64, deal: f64, event: f64) -> Self {
        Self {
            selling: Some(selling),
            deal: Some(deal),
            event: Some(event),
        }
    }

    pub fn get(&self, tier: PriceTier) -> Option<f64> {
        match tier {
            PriceTier::Selling => self.selling,
            PriceTier::Deal => self.deal,
            PriceTier::Event => self.event,
        }
    }

    pub fn is_empty(&self) -> bool {
        PriceTier::ALL.iter().all(|tier| self.get(*tier).is_none())
    }
}

/// 数値または数値文字列（"880"）を受け付ける
fn optional_amount<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64()),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid amount: {}", s))),
        Some(other) => Err(D::Error::custom(format!("invalid amount: {}", other))),
    }
}

/// 請求対象の1明細（数量と単価）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// 請求書の計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub lines: Vec<InvoiceLine>,
    pub total: f64,
    pub discount_percent: f64,
    pub discount_amount: f64,
    pub final_total: f64,
}

/// 値引率の入力を解釈する
///
/// 未入力・数値でない場合は0%。0〜100の範囲外は入力エラー。
pub fn parse_discount(input: Option<&str>) -> std::result::Result<f64, InvalidInput> {
    let percent = input
        .map(str::trim)
        .and_then(|s| s.trim_end_matches('%').trim().parse::<f64>().ok())
        .filter(|p| !p.is_nan())
        .unwrap_or(0.0);
    validate_discount(percent)?;
    Ok(percent)
}

fn validate_discount(percent: f64) -> std::result::Result<(), InvalidInput> {
    if (0.0..=100.0).contains(&percent) {
        Ok(())
    } else {
        Err(InvalidInput::new(format!(
            "discount must be between 0 and 100 percent, got {}",
            percent
        )))
    }
}

/// 明細・合計・値引額・最終金額を計算
pub fn compute_invoice(items: &[InvoiceItem], discount_percent: f64) -> Result<Invoice> {
    validate_discount(discount_percent)?;

    let lines: Vec<InvoiceLine> = items
        .iter()
        .map(|item| InvoiceLine {
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.unit_price * item.quantity as f64,
        })
        .collect();

    let total: f64 = lines.iter().map(|line| line.line_total).sum();
    let discount_amount = total * discount_percent / 100.0;

    Ok(Invoice {
        lines,
        total,
        discount_percent,
        discount_amount,
        final_total: total - discount_amount,
    })
}

/// 表示用に整数へ丸める
pub fn round_amount(value: f64) -> i64 {
    value.round() as i64
}
