//! Property-based tests for the prediction form record
//!
//! Tests invariants:
//! - `None` catalyst implies a zero rate, whatever came before
//! - Any other catalyst choice preserves the rate
//! - `bind` returns a new record and leaves its receiver untouched
//! - Non-numeric input binds as NaN and is rejected by `validate`
//! - A selected catalyst needs a whole, non-negative rate

use proptest::prelude::*;

use crate::core::error::ValidationError;
use crate::core::params::{
    AgentType, CatalystType, NumericField, PredictionParameters, SampleType,
};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_catalyst() -> impl Strategy<Value = CatalystType> {
    prop::sample::select(CatalystType::ALL.to_vec())
}

fn arb_field() -> impl Strategy<Value = NumericField> {
    prop::sample::select(NumericField::ALL.to_vec())
}

/// Finite, plausible process values.
fn arb_value() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn arb_params() -> impl Strategy<Value = PredictionParameters> {
    (
        arb_value(),
        arb_value(),
        arb_value(),
        prop::sample::select(AgentType::ALL.to_vec()),
        arb_value(),
        prop::sample::select(SampleType::ALL.to_vec()),
        arb_catalyst(),
        (0u32..100).prop_map(f64::from),
    )
        .prop_map(
            |(time, t_in, t_pr, agent_type, q_agent, sample_type, catalyst_type, rate)| {
                PredictionParameters {
                    time,
                    t_in,
                    t_pr,
                    agent_type,
                    q_agent,
                    sample_type,
                    catalyst_type,
                    catalyst_rate: if catalyst_type == CatalystType::None {
                        0.0
                    } else {
                        rate
                    },
                }
            },
        )
}

/// Strings that never parse as a float. `i` and `n` are left out so
/// `inf` and `nan` cannot appear.
fn arb_garbage() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-df-hj-mo-zA-DF-HJ-MO-Z]{1,12}",
        "[0-9]{1,3}[a-df-z]{1,3}",
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_none_catalyst_zeroes_rate(params in arb_params()) {
        let next = params.with_catalyst_type(CatalystType::None);
        prop_assert_eq!(next.catalyst_rate, 0.0);
        prop_assert!(!next.catalyst_rate_editable());
    }

    #[test]
    fn prop_catalyst_choice_preserves_rate(
        params in arb_params(),
        choice in prop::sample::select(vec![CatalystType::AlNi, CatalystType::MarbleDust]),
    ) {
        let next = params.with_catalyst_type(choice);
        prop_assert_eq!(next.catalyst_rate, params.catalyst_rate);
        prop_assert_eq!(next.catalyst_type, choice);
    }

    #[test]
    fn prop_no_catalyst_rate_cannot_be_bound(params in arb_params(), value in arb_value()) {
        let locked = params.with_catalyst_type(CatalystType::None);
        let next = locked.bind(NumericField::CatalystRate, &value.to_string());
        prop_assert_eq!(next, locked);
    }

    #[test]
    fn prop_bind_leaves_receiver_untouched(
        params in arb_params(),
        field in arb_field(),
        value in arb_value(),
    ) {
        let before = params;
        let _next = params.bind(field, &value.to_string());
        prop_assert_eq!(params, before);
    }

    #[test]
    fn prop_bind_parses_display_output(
        params in arb_params().prop_filter("rate editable", |p| p.catalyst_rate_editable()),
        field in arb_field(),
        value in arb_value(),
    ) {
        let next = params.bind(field, &value.to_string());
        prop_assert_eq!(next.get(field), value);
        if field != NumericField::CatalystRate {
            prop_assert!(next.validate().is_ok());
        }
    }

    #[test]
    fn prop_rate_must_be_whole_and_non_negative(
        params in arb_params().prop_filter("rate editable", |p| p.catalyst_rate_editable()),
        value in arb_value(),
    ) {
        let next = params.bind(NumericField::CatalystRate, &value.to_string());
        let acceptable = value >= 0.0 && value.fract() == 0.0;
        prop_assert_eq!(next.validate().is_ok(), acceptable);
        if !acceptable {
            prop_assert_eq!(
                next.validate(),
                Err(ValidationError::OutOfRange { field: "catalyst_rate" })
            );
        }
    }

    #[test]
    fn prop_garbage_fails_validation(
        params in arb_params().prop_filter("rate editable", |p| p.catalyst_rate_editable()),
        field in arb_field(),
        raw in arb_garbage(),
    ) {
        let next = params.bind(field, &raw);
        prop_assert!(next.get(field).is_nan());
        prop_assert_eq!(
            next.validate(),
            Err(ValidationError::InvalidNumber { field: field.key() })
        );
    }
}
