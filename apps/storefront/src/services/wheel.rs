//! The promotional wheel: one spin, one prize, one active grant.
//!
//! The wedge is sampled here with a real RNG; the weighted table walk
//! itself lives in `matera_core::wheel` where it stays deterministic and
//! testable. An active grant blocks further spins until it expires, which
//! is what makes the wheel a promotion instead of a reroll button.

use chrono::Utc;
use rand::Rng;
use tracing::{error, info};

use matera_core::{pick_prize, total_weight, PrizeKind, PromotionGrant};

use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;

/// What a spin produced.
#[derive(Debug)]
pub struct SpinOutcome {
    /// Label of the wedge the pointer landed on.
    pub label: String,

    /// What the wedge awards.
    pub kind: PrizeKind,

    /// The persisted grant, for discount wedges.
    pub grant: Option<PromotionGrant>,
}

/// Spins the wheel for this session.
///
/// Rejected while a discount grant is still active. A grant that fails to
/// persist is logged and the outcome returned anyway; the shopper keeps
/// the prize for as long as the process remembers it.
pub fn spin(state: &AppState) -> Result<SpinOutcome, ApiError> {
    let now = Utc::now();

    if state.grants.active(now).is_some() {
        return Err(ApiError::new(
            ErrorCode::WheelAlreadySpun,
            "A prize from a previous spin is still active",
        ));
    }

    let total = total_weight(&state.prizes);
    if total == 0 {
        // gen_range panics on an empty range, so a zero-weight table is
        // rejected before sampling
        error!("Prize table has zero total weight");
        return Err(ApiError::internal("Prize table misconfigured"));
    }

    let roll = rand::thread_rng().gen_range(0..total);
    let prize = pick_prize(&state.prizes, roll).ok_or_else(|| {
        error!(roll, total, "Prize table produced no wedge");
        ApiError::internal("Prize table misconfigured")
    })?;

    let grant = prize.grant(now);
    if let Some(ref grant) = grant {
        if let Err(e) = state.grants.save(grant) {
            error!(code = %grant.code, "Failed to persist wheel grant: {}", e);
        }
    }

    info!(label = %prize.label, "Wheel spun");

    Ok(SpinOutcome {
        label: prize.label.clone(),
        kind: prize.kind.clone(),
        grant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use matera_core::{Money, WheelPrize};
    use matera_session::{GrantStore, KeyValueStore, SessionError, SessionResult};
    use std::sync::Arc;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> SessionResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> SessionResult<()> {
            Err(SessionError::write_failed(key, "read-only store"))
        }

        fn remove(&self, _key: &str) -> SessionResult<()> {
            Ok(())
        }
    }

    fn discount_wedge() -> WheelPrize {
        WheelPrize {
            label: "$ 2.000 de descuento".to_string(),
            weight: 1,
            kind: PrizeKind::Discount {
                code: "RULETA2000".to_string(),
                amount: Money::from_pesos(2_000),
            },
        }
    }

    fn no_prize_wedge() -> WheelPrize {
        WheelPrize {
            label: "Seguí participando".to_string(),
            weight: 1,
            kind: PrizeKind::NoPrize,
        }
    }

    #[test]
    fn test_spin_lands_on_a_configured_wedge() {
        let state = AppState::in_memory();

        let outcome = spin(&state).unwrap();
        assert!(state.prizes.iter().any(|p| p.label == outcome.label));
    }

    #[test]
    fn test_spin_blocked_while_grant_active() {
        let state = AppState::in_memory();

        let grant = PromotionGrant::new("RULETA4500", Money::from_pesos(4_500), Utc::now());
        state.grants.save(&grant).unwrap();

        let err = spin(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::WheelAlreadySpun);
    }

    #[test]
    fn test_discount_spin_persists_grant() {
        let mut state = AppState::in_memory();
        state.prizes = Arc::new(vec![discount_wedge()]);

        let outcome = spin(&state).unwrap();

        assert_eq!(outcome.label, "$ 2.000 de descuento");
        assert!(outcome.grant.is_some());

        let active = state.grants.active(Utc::now()).unwrap();
        assert_eq!(active.code, "RULETA2000");
        assert_eq!(active.amount, Money::from_pesos(2_000));
    }

    #[test]
    fn test_no_prize_leaves_session_spinnable() {
        let mut state = AppState::in_memory();
        state.prizes = Arc::new(vec![no_prize_wedge()]);

        let outcome = spin(&state).unwrap();
        assert!(outcome.grant.is_none());
        assert!(state.grants.active(Utc::now()).is_none());

        // Nothing persisted, so a consolation wedge allows another spin
        assert!(spin(&state).is_ok());
    }

    #[test]
    fn test_free_shipping_spin_has_no_grant() {
        let mut state = AppState::in_memory();
        state.prizes = Arc::new(vec![WheelPrize {
            label: "Envío gratis".to_string(),
            weight: 1,
            kind: PrizeKind::FreeShipping,
        }]);

        let outcome = spin(&state).unwrap();
        assert_eq!(outcome.kind, PrizeKind::FreeShipping);
        assert!(outcome.grant.is_none());
    }

    #[test]
    fn test_grant_persist_failure_still_returns_prize() {
        let mut state = AppState::in_memory();
        state.prizes = Arc::new(vec![discount_wedge()]);
        state.grants = GrantStore::new(Arc::new(FailingStore));

        let outcome = spin(&state).unwrap();
        assert!(outcome.grant.is_some());
    }

    #[test]
    fn test_spin_with_zero_weight_table_is_an_error() {
        // Config validation rules these tables out at startup; a spin on
        // one must still fail cleanly rather than panic
        let mut state = AppState::in_memory();
        state.prizes = Arc::new(Vec::new());

        let err = spin(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);

        let mut weightless = discount_wedge();
        weightless.weight = 0;
        state.prizes = Arc::new(vec![weightless]);

        let err = spin(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_spin_allowed_after_grant_expires() {
        let state = AppState::in_memory();

        // A grant issued 16 minutes ago is past the 15-minute window
        let old = Utc::now() - chrono::Duration::minutes(16);
        let grant = PromotionGrant::new("RULETA2000", Money::from_pesos(2_000), old);
        state.grants.save(&grant).unwrap();

        assert!(spin(&state).is_ok());
    }
}
