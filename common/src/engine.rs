//! サイズ照合エンジン
//!
//! 開口部ごとに 入力検証 → 正規化 → 完全一致 → 上限判定 → 近似検索 の順で処理し、
//! 1開口部につき1つの `MatchResult` を返す。カタログ読み込みが完了するまでは計算しない。

use crate::catalog::{ColorCode, SizeCatalog, SizeRecord};
use crate::closest::find_closest;
use crate::error::{Error, InvalidInput, Result};
use crate::exact::find_exact;
use crate::product::ProductLine;
use crate::units::{normalize, CmSize, Unit};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 開口部1件分の入力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningRequest {
    /// 1始まりの開口部番号
    pub index: usize,
    pub height: f64,
    pub width: f64,
    pub unit: Unit,
    /// 呼び出し側で大文字化済みの色コード
    pub color: ColorCode,
}

impl OpeningRequest {
    pub fn new(index: usize, height: f64, width: f64, unit: Unit, color: &str) -> Self {
        Self {
            index,
            height,
            width,
            unit,
            color: ColorCode::new(color),
        }
    }

    /// 高さ・幅が正の有限値か検証
    pub fn validate(&self) -> std::result::Result<(), InvalidInput> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.height) && valid(self.width) {
            Ok(())
        } else {
            Err(InvalidInput::new(format!(
                "invalid dimensions for opening {}: {} x {}",
                self.index, self.height, self.width
            )))
        }
    }
}

/// 照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    ExactMatch {
        record: SizeRecord,
        unit_note: Option<String>,
    },
    ClosestMatch {
        record: SizeRecord,
        converted_size_cm: CmSize,
    },
    /// 上限超過（近似検索は行っていない）
    LimitExceeded { converted_size_cm: CmSize },
    /// 許容内の候補なし（要問い合わせ）
    NoMatch { converted_size_cm: CmSize },
}

impl MatchResult {
    /// 注文に使えるカタログ行
    pub fn record(&self) -> Option<&SizeRecord> {
        match self {
            MatchResult::ExactMatch { record, .. } | MatchResult::ClosestMatch { record, .. } => {
                Some(record)
            }
            MatchResult::LimitExceeded { .. } | MatchResult::NoMatch { .. } => None,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        matches!(self, MatchResult::LimitExceeded { .. })
    }
}

/// 開口部ごとの結果（入力不正もここに載せる）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningOutcome {
    pub request: OpeningRequest,
    pub result: std::result::Result<MatchResult, InvalidInput>,
}

/// カタログの読み込み状態
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready(Arc<SizeCatalog>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FitEngine {
    product_line: ProductLine,
    catalog: CatalogState,
}

impl FitEngine {
    /// カタログ未読み込みの状態で作成
    pub fn new(product_line: ProductLine) -> Self {
        Self {
            product_line,
            catalog: CatalogState::Loading,
        }
    }

    pub fn with_catalog(product_line: ProductLine, catalog: SizeCatalog) -> Self {
        Self {
            product_line,
            catalog: CatalogState::Ready(Arc::new(catalog)),
        }
    }

    pub fn product_line(&self) -> &ProductLine {
        &self.product_line
    }

    pub fn set_catalog(&mut self, catalog: SizeCatalog) {
        self.catalog = CatalogState::Ready(Arc::new(catalog));
    }

    /// 読み込み失敗を記録（再読み込みまで計算不可）
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::error!(%reason, "failed to load size catalog");
        self.catalog = CatalogState::Failed(reason);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.catalog, CatalogState::Ready(_))
    }

    pub fn catalog(&self) -> Result<&SizeCatalog> {
        match &self.catalog {
            CatalogState::Ready(catalog) => Ok(catalog.as_ref()),
            CatalogState::Loading => Err(Error::CatalogUnavailable(
                "size catalog has not been loaded yet".into(),
            )),
            CatalogState::Failed(reason) => Err(Error::CatalogUnavailable(reason.clone())),
        }
    }

    /// 開口部1件を照合
    pub fn match_opening(&self, request: &OpeningRequest) -> Result<MatchResult> {
        let catalog = self.catalog()?;
        request.validate()?;

        let OpeningRequest {
            height,
            width,
            unit,
            ref color,
            ..
        } = *request;

        if let Some(exact) = find_exact(catalog, height, width, color, unit) {
            return Ok(MatchResult::ExactMatch {
                record: exact.record.clone(),
                unit_note: exact.note,
            });
        }

        let normalized = normalize(height, width, unit);
        let converted_size_cm = normalized.cm().rounded_to_half();

        if self
            .product_line
            .envelope
            .exceeds(normalized.height_cm, normalized.width_cm)
        {
            tracing::debug!(index = request.index, "opening exceeds envelope, skipping closest search");
            return Ok(MatchResult::LimitExceeded { converted_size_cm });
        }

        let scoring = &self.product_line.scoring;
        match find_closest(catalog, height, width, color, unit, scoring) {
            Some(closest) => Ok(MatchResult::ClosestMatch {
                record: closest.record.clone(),
                converted_size_cm: closest.converted_size_cm,
            }),
            None => Ok(MatchResult::NoMatch { converted_size_cm }),
        }
    }

    /// 複数の開口部を照合し、開口部番号順で返す
    ///
    /// 入力不正は該当開口部の結果に載せ、処理は続行する。
    /// カタログ未準備のときのみエラー。
    pub fn calculate(&self, requests: &[OpeningRequest]) -> Result<Vec<OpeningOutcome>> {
        self.catalog()?;

        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            let result = match self.match_opening(request) {
                Ok(result) => Ok(result),
                Err(Error::InvalidInput(invalid)) => {
                    tracing::warn!(index = request.index, reason = %invalid, "invalid opening input");
                    Err(invalid)
                }
                Err(other) => return Err(other),
            };
            outcomes.push(OpeningOutcome {
                request: request.clone(),
                result,
            });
        }

        outcomes.sort_by_key(|outcome| outcome.request.index);
        Ok(outcomes)
    }
}
