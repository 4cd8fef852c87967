//! 近似サイズ検索
//!
//! 完全一致がないとき、同色のCmカタログ行を採点して最良の1件を選ぶ。
//! 採点方式は製品ラインごとに `ScoringPolicy` で切り替える。
//!
//! - 許容幅方式: 各辺の差が許容幅以内の候補のみ採用し、差の合計が最小のもの
//! - 過小ペナルティ方式: 許容幅を超えて小さい辺に重いペナルティを課し、コスト最小のもの

use crate::catalog::{ColorCode, SizeCatalog, SizeRecord};
use crate::units::{normalize, CmSize, Unit};
use serde::{Deserialize, Serialize};

/// 候補（向き1つ分）の評価値
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// 優先候補かどうか（優先候補があれば非優先候補より常に上位）
    pub preferred: bool,
    pub cost: f64,
}

impl Score {
    /// `other` より厳密に良いか。同点は先着優先。
    pub fn beats(&self, other: &Score) -> bool {
        match (self.preferred, other.preferred) {
            (true, false) => true,
            (false, true) => false,
            _ => self.cost < other.cost,
        }
    }
}

/// 採点方式の共通契約
pub trait CandidateScorer {
    /// 比較に使う利用者側の寸法
    fn user_size(&self, input: CmSize) -> CmSize;

    /// 候補寸法を採点する。採用できない候補は `None`
    fn score(&self, candidate: CmSize, user: CmSize) -> Option<Score>;
}

/// 許容幅方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceWindow {
    /// 各辺の許容差（cm）
    pub tolerance_cm: f64,
    /// 幅が小さい候補を優先扱いにする上限（cm）
    pub width_undersize_cm: f64,
}

impl Default for ToleranceWindow {
    fn default() -> Self {
        Self {
            tolerance_cm: 4.0,
            width_undersize_cm: 1.0,
        }
    }
}

impl CandidateScorer for ToleranceWindow {
    /// 大きい辺同士・小さい辺同士を比べる
    fn user_size(&self, input: CmSize) -> CmSize {
        input.canonical()
    }

    fn score(&self, candidate: CmSize, user: CmSize) -> Option<Score> {
        let height_diff = (candidate.height - user.height).abs();
        let width_diff = (candidate.width - user.width).abs();
        if height_diff > self.tolerance_cm || width_diff > self.tolerance_cm {
            return None;
        }

        let preferred = candidate.width >= user.width
            || user.width - candidate.width <= self.width_undersize_cm;

        Some(Score {
            preferred,
            cost: height_diff + width_diff,
        })
    }
}

/// 過小ペナルティ方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UndersizePenalty {
    /// ペナルティなしで許す過小量（cm）
    pub tolerance_cm: f64,
    /// 許容を超えた過小量1cmあたりのコスト
    pub penalty: f64,
}

impl Default for UndersizePenalty {
    fn default() -> Self {
        Self {
            tolerance_cm: 2.5,
            penalty: 500.0,
        }
    }
}

impl UndersizePenalty {
    fn dimension_cost(&self, candidate: f64, user: f64) -> f64 {
        if candidate >= user || user - candidate <= self.tolerance_cm {
            (candidate - user).max(0.0)
        } else {
            (user - candidate) * self.penalty
        }
    }
}

impl CandidateScorer for UndersizePenalty {
    /// 入力の向きのまま比べる
    fn user_size(&self, input: CmSize) -> CmSize {
        input
    }

    fn score(&self, candidate: CmSize, user: CmSize) -> Option<Score> {
        Some(Score {
            preferred: true,
            cost: self.dimension_cost(candidate.height, user.height)
                + self.dimension_cost(candidate.width, user.width),
        })
    }
}

/// 製品ライン設定で選ぶ採点方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringPolicy {
    ToleranceWindow(ToleranceWindow),
    UndersizePenalty(UndersizePenalty),
}

impl ScoringPolicy {
    pub fn tolerance_window() -> Self {
        ScoringPolicy::ToleranceWindow(ToleranceWindow::default())
    }

    pub fn undersize_penalty() -> Self {
        ScoringPolicy::UndersizePenalty(UndersizePenalty::default())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoringPolicy::ToleranceWindow(_) => "tolerance_window",
            ScoringPolicy::UndersizePenalty(_) => "undersize_penalty",
        }
    }
}

impl CandidateScorer for ScoringPolicy {
    fn user_size(&self, input: CmSize) -> CmSize {
        match self {
            ScoringPolicy::ToleranceWindow(p) => p.user_size(input),
            ScoringPolicy::UndersizePenalty(p) => p.user_size(input),
        }
    }

    fn score(&self, candidate: CmSize, user: CmSize) -> Option<Score> {
        match self {
            ScoringPolicy::ToleranceWindow(p) => p.score(candidate, user),
            ScoringPolicy::UndersizePenalty(p) => p.score(candidate, user),
        }
    }
}

/// 近似一致の結果
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestMatch<'a> {
    pub record: &'a SizeRecord,
    /// 利用者寸法（cm、0.5刻み）
    pub converted_size_cm: CmSize,
    pub score: Score,
}

pub fn find_closest<'a, P: CandidateScorer + ?Sized>(
    catalog: &'a SizeCatalog,
    height: f64,
    width: f64,
    color: &ColorCode,
    unit: Unit,
    policy: &P,
) -> Option<ClosestMatch<'a>> {
    let user = policy.user_size(normalize(height, width, unit).cm());
    let mut best: Option<(&SizeRecord, Score)> = None;

    for record in catalog.scan(Unit::Cm, color) {
        let stored = CmSize::new(record.height, record.width);
        for candidate in [stored, stored.swapped()] {
            let Some(score) = policy.score(candidate, user) else {
                continue;
            };
            let better = match &best {
                Some((_, current)) => score.beats(current),
                None => true,
            };
            if better {
                best = Some((record, score));
            }
        }
    }

    best.map(|(record, score)| ClosestMatch {
        record,
        converted_size_cm: user.rounded_to_half(),
        score,
    })
}
