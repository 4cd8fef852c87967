//! 開口部指定の解析
//!
//! `120x180`、`7.5 X 7.5`、`120x180:black` のような指定を読み、
//! エンジンに渡す `OpeningRequest` を組み立てる。

use crate::error::NetSizerError;
use lazy_static::lazy_static;
use net_sizer_common::{OpeningRequest, Unit};
use regex::Regex;
use std::str::FromStr;

lazy_static! {
    /// 高さx幅[:色]
    static ref OPENING_PATTERN: Regex = Regex::new(
        r"^\s*([0-9]*\.?[0-9]+)\s*[xX×*]\s*([0-9]*\.?[0-9]+)\s*(?::\s*([A-Za-z]+)\s*)?$"
    ).unwrap();
}

/// コマンドラインで指定された開口部1件
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningSpec {
    pub height: f64,
    pub width: f64,
    /// 個別指定の色（なければ --color）
    pub color: Option<String>,
}

impl FromStr for OpeningSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = OPENING_PATTERN
            .captures(s)
            .ok_or_else(|| format!("Invalid opening: {}. Use HEIGHTxWIDTH[:COLOR]", s))?;

        let parse = |i: usize| -> Result<f64, String> {
            caps[i]
                .parse::<f64>()
                .map_err(|e| format!("Invalid number in {}: {}", s, e))
        };

        Ok(OpeningSpec {
            height: parse(1)?,
            width: parse(2)?,
            color: caps.get(3).map(|m| m.as_str().to_uppercase()),
        })
    }
}

/// 開口部番号（1始まり）を振って照合リクエストに変換
pub fn build_requests(
    specs: &[OpeningSpec],
    unit: Unit,
    default_color: &str,
) -> Result<Vec<OpeningRequest>, NetSizerError> {
    if specs.is_empty() {
        return Err(NetSizerError::InvalidOpening(
            "開口部を1つ以上指定してください".into(),
        ));
    }

    Ok(specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let color = spec
                .color
                .as_deref()
                .unwrap_or(default_color)
                .to_uppercase();
            OpeningRequest::new(i + 1, spec.height, spec.width, unit, &color)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let spec: OpeningSpec = "120x180".parse().unwrap();
        assert_eq!(spec.height, 120.0);
        assert_eq!(spec.width, 180.0);
        assert!(spec.color.is_none());
    }

    #[test]
    fn test_parse_with_spaces_and_color() {
        let spec: OpeningSpec = " 7.5 X 7.5 : black ".parse().unwrap();
        assert_eq!(spec.height, 7.5);
        assert_eq!(spec.width, 7.5);
        assert_eq!(spec.color.as_deref(), Some("BLACK"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("120".parse::<OpeningSpec>().is_err());
        assert!("axb".parse::<OpeningSpec>().is_err());
        assert!("120x180:".parse::<OpeningSpec>().is_err());
        // 負数はパターンで弾かれる
        assert!("-5x10".parse::<OpeningSpec>().is_err());
    }

    #[test]
    fn test_build_requests_numbers_from_one() {
        let specs: Vec<OpeningSpec> = vec![
            "120x180".parse().unwrap(),
            "90x90:gr".parse().unwrap(),
        ];
        let requests = build_requests(&specs, Unit::Inch, "bk").unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].index, 1);
        assert_eq!(requests[0].color.as_str(), "BK");
        assert_eq!(requests[1].index, 2);
        assert_eq!(requests[1].color.as_str(), "GR");
        assert!(requests.iter().all(|r| r.unit == Unit::Inch));
    }

    #[test]
    fn test_build_requests_empty() {
        assert!(build_requests(&[], Unit::Cm, "BLACK").is_err());
    }
}
