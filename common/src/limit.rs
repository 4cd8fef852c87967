//! 注文可能サイズの上限
//!
//! 上限を超える開口部は近似検索を行わず、個別対応（カスタマイズ依頼）に回す。

use serde::{Deserialize, Serialize};

/// 製品ラインごとの上限寸法（幅×高さ、向きは入れ替え可）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub max_width_cm: f64,
    pub max_height_cm: f64,
}

impl Envelope {
    pub const fn new(max_width_cm: f64, max_height_cm: f64) -> Self {
        Self {
            max_width_cm,
            max_height_cm,
        }
    }

    /// いずれかの向きで収まるか
    pub fn fits(&self, height_cm: f64, width_cm: f64) -> bool {
        (width_cm <= self.max_width_cm && height_cm <= self.max_height_cm)
            || (width_cm <= self.max_height_cm && height_cm <= self.max_width_cm)
    }

    pub fn exceeds(&self, height_cm: f64, width_cm: f64) -> bool {
        !self.fits(height_cm, width_cm)
    }
}

pub fn exceeds_limit(height_cm: f64, width_cm: f64, envelope: &Envelope) -> bool {
    envelope.exceeds(height_cm, width_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOOR: Envelope = Envelope::new(117.0, 217.0);

    #[test]
    fn test_fits_within_door_envelope() {
        assert!(!exceeds_limit(217.0, 117.0, &DOOR));
        assert!(!exceeds_limit(117.0, 217.0, &DOOR));
        assert!(!exceeds_limit(200.0, 90.0, &DOOR));
    }

    #[test]
    fn test_exceeds_door_envelope() {
        assert!(exceeds_limit(218.0, 100.0, &DOOR));
        assert!(exceeds_limit(200.0, 118.0, &DOOR));
        assert!(exceeds_limit(230.0, 120.0, &DOOR));
    }

    #[test]
    fn test_exceeds_limit_is_orientation_symmetric() {
        let envelopes = [DOOR, Envelope::new(150.0, 217.0), Envelope::new(183.0, 338.0)];
        for envelope in envelopes {
            for h in (50..400).step_by(7) {
                for w in (50..400).step_by(11) {
                    let (h, w) = (h as f64, w as f64);
                    assert_eq!(exceeds_limit(h, w, &envelope), exceeds_limit(w, h, &envelope));
                }
            }
        }
    }

    #[test]
    fn test_asymmetric_envelope() {
        let envelope = Envelope::new(150.0, 217.0);
        assert!(!envelope.exceeds(217.0, 150.0));
        assert!(envelope.exceeds(217.0, 151.0));
        assert!(envelope.exceeds(250.0, 117.0));
    }
}
