//! # Wheel Module
//!
//! Weighted prize selection for the promotional lucky wheel.
//!
//! ## How a Spin Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Lucky Wheel                                     │
//! │                                                                         │
//! │  Prize table (config):     weight                                       │
//! │    "10% de descuento"         3    ──┐                                  │
//! │    "Envío gratis"             2      │  total_weight = 10               │
//! │    "Seguí participando"       5    ──┘                                  │
//! │                                                                         │
//! │  App layer samples: roll ∈ [0, total_weight)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pick_prize(prizes, roll)   ← pure, deterministic                       │
//! │       │                                                                 │
//! │       ├── discount wedge ──► prize.grant(now) ──► PromotionGrant        │
//! │       │                                           (15 min window)       │
//! │       └── other wedge ─────► no grant, just the outcome                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Selection is a pure function of the roll so the distribution can be
//! verified exhaustively in tests. Sampling the roll (the only random part)
//! happens in the app layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::PromotionGrant;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Prize Types
// =============================================================================

/// What a wheel wedge awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrizeKind {
    /// An absolute discount, redeemable through a promotion code.
    Discount { code: String, amount: Money },
    /// Free shipping on the order, arranged over WhatsApp.
    FreeShipping,
    /// The consolation wedge.
    NoPrize,
}

/// One wedge of the promotional wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WheelPrize {
    /// Label painted on the wedge.
    pub label: String,

    /// Relative odds of landing on this wedge.
    pub weight: u32,

    /// What the wedge awards.
    pub kind: PrizeKind,
}

impl WheelPrize {
    /// Builds the session grant for this prize, if it awards a discount.
    ///
    /// Non-discount wedges produce no grant: free shipping is settled in
    /// the hand-off conversation and the consolation wedge awards nothing.
    pub fn grant(&self, now: DateTime<Utc>) -> Option<PromotionGrant> {
        match &self.kind {
            PrizeKind::Discount { code, amount } => {
                Some(PromotionGrant::new(code.clone(), *amount, now))
            }
            PrizeKind::FreeShipping | PrizeKind::NoPrize => None,
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Sum of all wedge weights. The roll domain for [`pick_prize`].
pub fn total_weight(prizes: &[WheelPrize]) -> u64 {
    prizes.iter().map(|p| p.weight as u64).sum()
}

/// Picks the wedge for a roll.
///
/// ## Behavior
/// - `roll` is reduced modulo [`total_weight`], then matched against the
///   cumulative weights in table order
/// - Zero-weight wedges can never be selected
/// - Returns `None` only for an empty table or an all-zero-weight table
///
/// ## Example
/// ```rust
/// use matera_core::wheel::{pick_prize, PrizeKind, WheelPrize};
///
/// let prizes = vec![
///     WheelPrize { label: "A".into(), weight: 1, kind: PrizeKind::NoPrize },
///     WheelPrize { label: "B".into(), weight: 3, kind: PrizeKind::NoPrize },
/// ];
///
/// assert_eq!(pick_prize(&prizes, 0).unwrap().label, "A");
/// assert_eq!(pick_prize(&prizes, 1).unwrap().label, "B");
/// assert_eq!(pick_prize(&prizes, 3).unwrap().label, "B");
/// ```
pub fn pick_prize(prizes: &[WheelPrize], roll: u64) -> Option<&WheelPrize> {
    let total = total_weight(prizes);
    if total == 0 {
        return None;
    }

    let mut roll = roll % total;
    for prize in prizes {
        let weight = prize.weight as u64;
        if roll < weight {
            return Some(prize);
        }
        roll -= weight;
    }

    // Unreachable: roll % total always lands inside a wedge
    None
}

/// Validates a configured prize table.
///
/// ## Rules
/// - Must not be empty
/// - Every wedge needs a label and a positive weight
/// - Discount wedges need a non-empty code and a positive amount
pub fn validate_prizes(prizes: &[WheelPrize]) -> CoreResult<()> {
    if prizes.is_empty() {
        return Err(CoreError::InvalidPrizeTable {
            reason: "prize table is empty".to_string(),
        });
    }

    for prize in prizes {
        if prize.label.trim().is_empty() {
            return Err(CoreError::InvalidPrizeTable {
                reason: "wedge label is empty".to_string(),
            });
        }
        if prize.weight == 0 {
            return Err(CoreError::InvalidPrizeTable {
                reason: format!("wedge '{}' has zero weight", prize.label),
            });
        }
        if let PrizeKind::Discount { code, amount } = &prize.kind {
            if code.trim().is_empty() {
                return Err(CoreError::InvalidPrizeTable {
                    reason: format!("wedge '{}' has an empty code", prize.label),
                });
            }
            if !amount.is_positive() {
                return Err(CoreError::InvalidPrizeTable {
                    reason: format!("wedge '{}' has a non-positive amount", prize.label),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<WheelPrize> {
        vec![
            WheelPrize {
                label: "10% de descuento".to_string(),
                weight: 1,
                kind: PrizeKind::Discount {
                    code: "RUEDA10".to_string(),
                    amount: Money::from_pesos(4_500),
                },
            },
            WheelPrize {
                label: "Envío gratis".to_string(),
                weight: 2,
                kind: PrizeKind::FreeShipping,
            },
            WheelPrize {
                label: "Seguí participando".to_string(),
                weight: 3,
                kind: PrizeKind::NoPrize,
            },
        ]
    }

    #[test]
    fn pick_respects_cumulative_weights() {
        let prizes = table();
        assert_eq!(total_weight(&prizes), 6);

        assert_eq!(pick_prize(&prizes, 0).unwrap().label, "10% de descuento");
        assert_eq!(pick_prize(&prizes, 1).unwrap().label, "Envío gratis");
        assert_eq!(pick_prize(&prizes, 2).unwrap().label, "Envío gratis");
        assert_eq!(pick_prize(&prizes, 3).unwrap().label, "Seguí participando");
        assert_eq!(pick_prize(&prizes, 5).unwrap().label, "Seguí participando");

        // Out-of-range rolls wrap instead of failing
        assert_eq!(pick_prize(&prizes, 6).unwrap().label, "10% de descuento");
    }

    #[test]
    fn selection_counts_match_weights_exactly() {
        let prizes = table();
        let total = total_weight(&prizes);

        let mut counts = vec![0u64; prizes.len()];
        for roll in 0..total {
            let picked = pick_prize(&prizes, roll).unwrap();
            let idx = prizes.iter().position(|p| p.label == picked.label).unwrap();
            counts[idx] += 1;
        }

        // One roll per unit of weight: the distribution IS the weight table
        assert_eq!(counts, vec![1, 2, 3]);
    }

    #[test]
    fn zero_weight_wedge_is_never_selected() {
        let prizes = vec![
            WheelPrize {
                label: "Nunca".to_string(),
                weight: 0,
                kind: PrizeKind::NoPrize,
            },
            WheelPrize {
                label: "Siempre".to_string(),
                weight: 2,
                kind: PrizeKind::NoPrize,
            },
        ];

        for roll in 0..total_weight(&prizes) {
            assert_eq!(pick_prize(&prizes, roll).unwrap().label, "Siempre");
        }
    }

    #[test]
    fn empty_table_picks_nothing() {
        assert!(pick_prize(&[], 0).is_none());
    }

    #[test]
    fn grant_only_for_discount_wedges() {
        let now = Utc::now();
        let prizes = table();

        let grant = prizes[0].grant(now).unwrap();
        assert_eq!(grant.code, "RUEDA10");
        assert_eq!(grant.amount, Money::from_pesos(4_500));
        assert_eq!(grant.granted_at, now);

        assert!(prizes[1].grant(now).is_none());
        assert!(prizes[2].grant(now).is_none());
    }

    #[test]
    fn validate_rejects_bad_tables() {
        assert!(validate_prizes(&[]).is_err());

        let zero_weight = vec![WheelPrize {
            label: "X".to_string(),
            weight: 0,
            kind: PrizeKind::NoPrize,
        }];
        assert!(validate_prizes(&zero_weight).is_err());

        let empty_code = vec![WheelPrize {
            label: "X".to_string(),
            weight: 1,
            kind: PrizeKind::Discount {
                code: "  ".to_string(),
                amount: Money::from_pesos(1_000),
            },
        }];
        assert!(validate_prizes(&empty_code).is_err());

        let zero_amount = vec![WheelPrize {
            label: "X".to_string(),
            weight: 1,
            kind: PrizeKind::Discount {
                code: "RUEDA0".to_string(),
                amount: Money::zero(),
            },
        }];
        assert!(validate_prizes(&zero_amount).is_err());

        assert!(validate_prizes(&table()).is_ok());
    }
}
