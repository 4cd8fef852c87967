//! 対話式の請求書入力
//!
//! 明細ごとの数量・価格区分・値引率を順に聞く。

use crate::error::{NetSizerError, Result};
use dialoguer::Input;
use net_sizer_common::{parse_discount, OrderSession, PriceTier};

/// 数量の入力を解釈（空欄は現在値のまま、0や数値以外は無効）
pub fn parse_quantity_answer(input: &str, current: u32) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(current);
    }
    trimmed.parse::<u32>().ok().filter(|q| *q >= 1)
}

/// 明細ごとに数量を入力
pub fn prompt_quantities(session: &mut OrderSession, opening_label: &str) -> Result<()> {
    let entries: Vec<(usize, String, u32)> = session
        .items()
        .iter()
        .map(|item| (item.opening_index, item.size_description.clone(), item.quantity))
        .collect();

    for (index, size, current) in entries {
        println!("  {} {}: {}", opening_label, index, size);
        let quantity = loop {
            let input: String = Input::new()
                .with_prompt(format!("  数量 [{}]", current))
                .allow_empty(true)
                .interact_text()
                .map_err(|e| NetSizerError::Prompt(e.to_string()))?;

            match parse_quantity_answer(&input, current) {
                Some(q) => break q,
                None => println!("  → 1以上の整数を入力してください"),
            }
        };
        session.set_quantity(index, quantity)?;
    }
    Ok(())
}

/// 価格区分を入力（空欄は既定値）
pub fn prompt_tier(default: PriceTier) -> Result<PriceTier> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("価格区分 (selling/deal/event) [{}]", default))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| NetSizerError::Prompt(e.to_string()))?;

        if input.trim().is_empty() {
            return Ok(default);
        }
        match input.parse::<PriceTier>() {
            Ok(tier) => return Ok(tier),
            Err(e) => println!("  → {}", e),
        }
    }
}

/// 値引率を入力（空欄は0%）
pub fn prompt_discount() -> Result<f64> {
    loop {
        let input: String = Input::new()
            .with_prompt("値引率 %")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| NetSizerError::Prompt(e.to_string()))?;

        match parse_discount(Some(&input)) {
            Ok(percent) => return Ok(percent),
            Err(e) => println!("  → {}", e),
        }
    }
}
