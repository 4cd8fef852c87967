//! 照合結果・注文メッセージ・請求書のテキスト出力
//!
//! 顧客・販売店に渡す文面のため英語で出力する。

use net_sizer_common::{
    round_amount, CatalogSummary, CmSize, Invoice, MatchResult, OpeningOutcome, OpeningRequest,
    OrderSession, ProductLine, PriceTier,
};

/// 開口部1件の結果表示
pub fn opening_text(line: &ProductLine, outcome: &OpeningOutcome) -> String {
    let label = &line.opening_label;
    let index = outcome.request.index;
    match &outcome.result {
        Ok(result) => order_detail(line, outcome, result),
        Err(_) => format!(
            "Invalid dimensions for {} {}. Please enter valid values.",
            label, index
        ),
    }
}

fn order_detail(line: &ProductLine, outcome: &OpeningOutcome, result: &MatchResult) -> String {
    let request = &outcome.request;
    let label = &line.opening_label;
    let index = request.index;
    let color = line.color_name(&request.color);
    let custom_size = requested_text(request);

    match result {
        MatchResult::ExactMatch { record, unit_note } => {
            let mut text = format!(
                "{} {}: Exact Match Found: No Customization Needed\n- Size: {}\n- Color: {}\n- Link: {}",
                label,
                index,
                record.size_description(),
                color,
                record.purchase_link
            );
            if let Some(note) = unit_note {
                text.push('\n');
                text.push_str(note);
            }
            text
        }
        MatchResult::ClosestMatch {
            record,
            converted_size_cm,
        } => format!(
            "{} {}: Closest Match Found: Customization Needed\n- Custom Size Needed: {}\n- Custom Size in Cm: {}\n- Closest Size Ordered: {} x {} Cm\n- Color: {}\n- Link: {}",
            label,
            index,
            custom_size,
            cm_text(converted_size_cm),
            record.height,
            record.width,
            color,
            record.purchase_link
        ),
        MatchResult::LimitExceeded { converted_size_cm } => format!(
            "{} {}: SIZE LIMIT EXCEEDED: {}\n- Custom Size: {}\n- Custom Size in Cm: {}\n- Color: {}",
            label,
            index,
            line.wording.limit_exceeded,
            custom_size,
            cm_text(converted_size_cm),
            color
        ),
        MatchResult::NoMatch { .. } => format!(
            "No suitable match found for {} {}.\nSize needed: {}.\nPlease share your {} size for a free customization request.",
            label,
            index,
            custom_size,
            label.to_lowercase()
        ),
    }
}

fn requested_text(request: &OpeningRequest) -> String {
    format!("{} x {} {}", request.height, request.width, request.unit)
}

fn cm_text(size: &CmSize) -> String {
    format!("{} x {} Cm", size.height, size.width)
}

/// 管理者が購入手配に使う注文テキスト
///
/// 完全一致・近似一致の開口部のみ。数量は注文セッションから取る。
pub fn admin_message(
    line: &ProductLine,
    outcomes: &[OpeningOutcome],
    session: &OrderSession,
) -> String {
    let blocks: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| {
            let result = outcome.result.as_ref().ok()?;
            let request = &outcome.request;
            let header = format!("{} {}:", line.opening_label, request.index);
            let color = format!("- Color: {}", line.color_name(&request.color));

            let mut lines = match result {
                MatchResult::ExactMatch { record, unit_note } => {
                    let mut lines = vec![header];
                    lines.extend(unit_note.clone());
                    lines.push(format!("- Size: {}", record.size_description()));
                    lines.push(color);
                    lines.push("CLICK HERE: To Order *Exact Size* on Amazon:".into());
                    lines.push(format!("- Link: {}", record.purchase_link));
                    lines
                }
                MatchResult::ClosestMatch {
                    record,
                    converted_size_cm,
                } => vec![
                    header,
                    format!("- Custom Size Needed: {}", requested_text(request)),
                    format!("- Custom Size in Cm: {}", cm_text(converted_size_cm)),
                    format!(
                        "- Closest Size to Order: {} x {} Cm",
                        record.height, record.width
                    ),
                    color,
                    "CLICK HERE: To Order *Closest Size* on Amazon:".into(),
                    format!("- Link: {}", record.purchase_link),
                ],
                MatchResult::LimitExceeded { .. } | MatchResult::NoMatch { .. } => return None,
            };

            if line.wording.quantity_lines {
                let quantity = session.quantity_of(request.index).unwrap_or(1);
                lines.push(format!("Select Qty: *{} qty*", quantity));
            }
            Some(lines.join("\n"))
        })
        .collect();

    blocks.join("\n\n")
}

/// 販売店に送る注文メッセージ
///
/// 上限超過の開口部が1つでもあれば依頼文を切り替える。入力不正の開口部は含めない。
pub fn summary_message(line: &ProductLine, outcomes: &[OpeningOutcome]) -> String {
    let details: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| {
            let result = outcome.result.as_ref().ok()?;
            Some(order_detail(line, outcome, result))
        })
        .collect();

    let exceeded = outcomes
        .iter()
        .any(|outcome| matches!(&outcome.result, Ok(result) if result.is_exceeded()));

    let intro = if exceeded {
        format!(
            "My {} size exceeds the standard size limit. Please assist me with the following details:",
            line.opening_label
        )
    } else {
        "Please make note of my order:".to_string()
    };

    format!(
        "Hello Team,\n\n{}\n\n{}\n\nThank you.",
        intro,
        details.join("\n\n")
    )
}

/// 請求書テキスト
///
/// 値引額がある場合のみ値引行を出す。金額は整数に丸めて表示。
pub fn invoice_text(
    line: &ProductLine,
    session: &OrderSession,
    tier: PriceTier,
    invoice: &Invoice,
    currency: &str,
) -> String {
    let blocks: Vec<String> = session
        .items()
        .iter()
        .zip(&invoice.lines)
        .map(|(item, invoice_line)| {
            let size = if line.wording.quantity_lines {
                format!("Size: {}\nQuantity: {}", item.size_description, item.quantity)
            } else {
                format!("Size: {} - {} qty", item.size_description, item.quantity)
            };
            format!(
                "{} {}\n{}\nPrice: {} {}/- x {} = {} {}/-",
                line.opening_label,
                item.opening_index,
                size,
                currency,
                round_amount(invoice_line.unit_price),
                invoice_line.quantity,
                currency,
                round_amount(invoice_line.line_total)
            )
        })
        .collect();

    let mut text = format!(
        "Invoice ({}):\n{}\n\nTotal: {} {}/-",
        tier,
        blocks.join("\n\n"),
        currency,
        round_amount(invoice.total)
    );
    if invoice.discount_amount > 0.0 {
        text.push_str(&format!(
            "\nDiscount ({}%): - {} {}/-",
            invoice.discount_percent,
            currency,
            round_amount(invoice.discount_amount)
        ));
    }
    text.push_str(&format!(
        "\nFinal Total: {} {}/-",
        currency,
        round_amount(invoice.final_total)
    ));
    text
}

/// カタログの件数一覧
pub fn catalog_summary_text(line: &ProductLine, summary: &CatalogSummary) -> String {
    let mut text = format!("Records: {}\n\nBy unit:", summary.total);
    for (unit, count) in &summary.by_unit {
        text.push_str(&format!("\n  {:<6} {}", unit.label(), count));
    }
    text.push_str("\n\nBy color:");
    for (code, count) in &summary.by_color {
        text.push_str(&format!(
            "\n  {:<6} {:<8} {}",
            code.as_str(),
            line.color_name(code),
            count
        ));
    }
    text
}
