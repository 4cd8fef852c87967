//! 注文セッション
//!
//! 照合結果から注文明細を組み立て、数量の変更を受けてから請求書を作る。
//! 照合と請求の受け渡しはこの構造体を通して明示的に行う。

use crate::engine::{MatchResult, OpeningOutcome, OpeningRequest};
use crate::error::{Error, InvalidInput, Result};
use crate::invoice::{compute_invoice, Invoice, InvoiceItem, PriceTable, PriceTier};
use crate::product::{OrderSize, PriceSource, ProductLine};
use crate::units::Unit;
use serde::{Deserialize, Serialize};

/// 注文明細1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub opening_index: usize,
    pub size_description: String,
    /// 単価の参照先（行の価格列または製品ラインの固定価格表）
    pub prices: PriceTable,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSession {
    items: Vec<OrderLineItem>,
}

impl OrderSession {
    /// 完全一致・近似一致の開口部から明細を作る（数量は1）
    ///
    /// 明細のサイズ表記と単価の出所は製品ラインの設定に従う。
    pub fn from_outcomes(outcomes: &[OpeningOutcome], line: &ProductLine) -> Self {
        let items = outcomes
            .iter()
            .filter_map(|outcome| {
                let result = outcome.result.as_ref().ok()?;
                let record = result.record()?;
                let size_description = match line.order_size {
                    OrderSize::Record => record_size(result)?,
                    OrderSize::Request => requested_size(&outcome.request, result),
                };
                let prices = match &line.pricing {
                    PriceSource::Fixed { table } => *table,
                    PriceSource::PerRecord => record.prices,
                };
                Some(OrderLineItem {
                    opening_index: outcome.request.index,
                    size_description,
                    prices,
                    quantity: 1,
                })
            })
            .collect();

        Self { items }
    }

    /// 開口部番号の数量（明細がなければ None）
    pub fn quantity_of(&self, opening_index: usize) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.opening_index == opening_index)
            .map(|item| item.quantity)
    }

    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 開口部番号を指定して数量を変更（1以上）
    pub fn set_quantity(&mut self, opening_index: usize, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(InvalidInput::new(format!(
                "quantity for opening {} must be at least 1",
                opening_index
            ))
            .into());
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.opening_index == opening_index)
            .ok_or_else(|| {
                InvalidInput::new(format!("opening {} has no order line", opening_index))
            })?;
        item.quantity = quantity;
        Ok(())
    }

    /// 価格区分と値引率で請求書を計算
    ///
    /// 明細の並びは `items()` と同じ。
    pub fn invoice(&self, tier: PriceTier, discount_percent: f64) -> Result<Invoice> {
        if self.items.is_empty() {
            return Err(Error::EmptyOrder);
        }

        let items = self
            .items
            .iter()
            .map(|item| -> Result<InvoiceItem> {
                let unit_price = item.prices.get(tier).ok_or(Error::MissingPrice {
                    tier,
                    opening_index: item.opening_index,
                })?;
                Ok(InvoiceItem {
                    quantity: item.quantity,
                    unit_price,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        compute_invoice(&items, discount_percent)
    }
}

fn record_size(result: &MatchResult) -> Option<String> {
    match result {
        MatchResult::ExactMatch { record, .. } => Some(record.size_description()),
        MatchResult::ClosestMatch { record, .. } => {
            Some(format!("{} x {} Cm", record.height, record.width))
        }
        MatchResult::LimitExceeded { .. } | MatchResult::NoMatch { .. } => None,
    }
}

/// インチ入力の完全一致はフィート換算の注記を付ける
fn requested_size(request: &OpeningRequest, result: &MatchResult) -> String {
    match (result, request.unit) {
        (MatchResult::ExactMatch { .. }, Unit::Inch) => format!(
            "{} x {} Inches (12 Inches = 1 Foot)",
            request.height, request.width
        ),
        _ => format!("{} x {} {}", request.height, request.width, request.unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SizeRecord;
    use crate::engine::OpeningRequest;
    use crate::units::{CmSize, Unit};

    fn outcome(index: usize, result: MatchResult) -> OpeningOutcome {
        OpeningOutcome {
            request: OpeningRequest::new(index, 100.0, 100.0, Unit::Cm, "BLACK"),
            result: Ok(result),
        }
    }

    /// 行ごとの価格列を使うドア
    fn record_priced_door() -> ProductLine {
        ProductLine {
            pricing: PriceSource::PerRecord,
            ..ProductLine::door()
        }
    }

    fn outcomes() -> Vec<OpeningOutcome> {
        let exact = SizeRecord::new(120.0, 180.0, Unit::Cm, "BLACK")
            .with_label("120x180")
            .with_prices(PriceTable::new(800.0, 750.0, 700.0));
        let closest = SizeRecord::new(214.0, 100.0, Unit::Cm, "BLACK")
            .with_prices(PriceTable::new(500.0, 450.0, 400.0));
        vec![
            outcome(1, MatchResult::ExactMatch { record: exact, unit_note: None }),
            outcome(
                2,
                MatchResult::LimitExceeded {
                    converted_size_cm: CmSize::new(300.0, 200.0),
                },
            ),
            outcome(
                3,
                MatchResult::ClosestMatch {
                    record: closest,
                    converted_size_cm: CmSize::new(210.0, 97.0),
                },
            ),
            OpeningOutcome {
                request: OpeningRequest::new(4, 0.0, 100.0, Unit::Cm, "BLACK"),
                result: Err(InvalidInput::new("invalid")),
            },
        ]
    }

    #[test]
    fn test_from_outcomes_keeps_only_orderable_openings() {
        let session = OrderSession::from_outcomes(&outcomes(), &record_priced_door());
        let items = session.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].opening_index, 1);
        assert_eq!(items[0].size_description, "120x180 Cm");
        assert_eq!(items[1].opening_index, 3);
        assert_eq!(items[1].size_description, "214 x 100 Cm");
        assert!(items.iter().all(|item| item.quantity == 1));
    }

    #[test]
    fn test_window_lines_use_requested_size() {
        let closest = SizeRecord::new(100.0, 150.0, Unit::Cm, "BK")
            .with_prices(PriceTable::new(500.0, 450.0, 400.0));
        let exact = SizeRecord::new(7.5, 7.5, Unit::Feet, "BK")
            .with_label("7.5x7.5")
            .with_prices(PriceTable::new(1500.0, 1400.0, 1300.0));
        let outcomes = vec![
            OpeningOutcome {
                request: OpeningRequest::new(1, 99.0, 149.0, Unit::Cm, "BK"),
                result: Ok(MatchResult::ClosestMatch {
                    record: closest,
                    converted_size_cm: CmSize::new(99.0, 149.0),
                }),
            },
            OpeningOutcome {
                request: OpeningRequest::new(2, 90.0, 90.0, Unit::Inch, "BK"),
                result: Ok(MatchResult::ExactMatch {
                    record: exact,
                    unit_note: Some("(Original: 90 x 90 Inches, 12 Inches = 1 Foot)".into()),
                }),
            },
        ];

        let session = OrderSession::from_outcomes(&outcomes, &ProductLine::window());
        let items = session.items();
        assert_eq!(items[0].size_description, "99 x 149 Cm");
        assert_eq!(items[1].size_description, "90 x 90 Inches (12 Inches = 1 Foot)");
        // 単価はカタログ行から
        assert_eq!(items[1].prices.get(PriceTier::Selling), Some(1500.0));
    }

    #[test]
    fn test_quantity_of() {
        let mut session = OrderSession::from_outcomes(&outcomes(), &ProductLine::door());
        session.set_quantity(3, 2).unwrap();
        assert_eq!(session.quantity_of(1), Some(1));
        assert_eq!(session.quantity_of(3), Some(2));
        assert_eq!(session.quantity_of(2), None);
    }

    #[test]
    fn test_invoice_with_record_prices() {
        let mut session = OrderSession::from_outcomes(&outcomes(), &record_priced_door());
        session.set_quantity(1, 2).unwrap();

        let invoice = session.invoice(PriceTier::Selling, 10.0).unwrap();
        assert_eq!(invoice.total, 2100.0);
        assert_eq!(invoice.discount_amount, 210.0);
        assert_eq!(invoice.final_total, 1890.0);
    }

    #[test]
    fn test_invoice_with_fixed_prices() {
        let session = OrderSession::from_outcomes(&outcomes(), &ProductLine::door());
        let invoice = session.invoice(PriceTier::Event, 0.0).unwrap();
        assert_eq!(invoice.total, 1598.0);
        assert_eq!(invoice.final_total, invoice.total);
    }

    #[test]
    fn test_missing_price_is_config_error() {
        let bare = SizeRecord::new(120.0, 180.0, Unit::Cm, "BLACK");
        let session = OrderSession::from_outcomes(
            &[outcome(5, MatchResult::ExactMatch { record: bare, unit_note: None })],
            &record_priced_door(),
        );
        let err = session.invoice(PriceTier::Deal, 0.0).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingPrice {
                tier: PriceTier::Deal,
                opening_index: 5
            }
        ));
    }

    #[test]
    fn test_set_quantity_validation() {
        let mut session = OrderSession::from_outcomes(&outcomes(), &record_priced_door());
        assert!(session.set_quantity(1, 0).is_err());
        assert!(session.set_quantity(2, 3).is_err());
        assert!(session.set_quantity(3, 4).is_ok());
        assert_eq!(session.items()[1].quantity, 4);
    }

    #[test]
    fn test_empty_session_cannot_invoice() {
        let session = OrderSession::default();
        assert!(session.is_empty());
        assert!(matches!(
            session.invoice(PriceTier::Selling, 0.0),
            Err(Error::EmptyOrder)
        ));
    }
}
