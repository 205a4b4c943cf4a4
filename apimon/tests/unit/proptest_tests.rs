//! Property-based tests using proptest

use proptest::prelude::*;
use serde_json::{json, Value};

use apimon::probe::aggregate;
use apimon::schema::{resolve_value, should_include, ParameterDecl, ParameterLocation};
use apimon_common::types::ProbeOutcome;

fn outcome(index: usize, failed: bool) -> ProbeOutcome {
    let request_url = format!("http://api.test/op/{}", index);
    if failed {
        ProbeOutcome::Failed {
            request_url,
            reason: "HTTP 500 Internal Server Error".to_string(),
        }
    } else {
        ProbeOutcome::Succeeded {
            request_url,
            status: 200,
        }
    }
}

fn non_null_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        "[a-z0-9]{0,12}".prop_map(|s| json!(s)),
    ]
}

// ---------------------------------------------------------------------------
// aggregate
// ---------------------------------------------------------------------------

proptest! {
    /// 失敗が0件のときだけ健全
    #[test]
    fn healthy_iff_no_failures(flags in prop::collection::vec(any::<bool>(), 0..40)) {
        let outcomes: Vec<ProbeOutcome> =
            flags.iter().enumerate().map(|(i, f)| outcome(i, *f)).collect();
        let result = aggregate(&outcomes);
        prop_assert_eq!(result.healthy, !flags.contains(&true));
    }

    /// メッセージの行数は失敗件数と一致
    #[test]
    fn message_has_one_line_per_failure(flags in prop::collection::vec(any::<bool>(), 0..40)) {
        let outcomes: Vec<ProbeOutcome> =
            flags.iter().enumerate().map(|(i, f)| outcome(i, *f)).collect();
        let failures = flags.iter().filter(|f| **f).count();
        let result = aggregate(&outcomes);
        prop_assert_eq!(result.message.lines().count(), failures);
        prop_assert_eq!(result.message.is_empty(), failures == 0);
    }
}

// ---------------------------------------------------------------------------
// should_include / resolve_value
// ---------------------------------------------------------------------------

proptest! {
    /// 必須パラメータは常に含まれ、任意パラメータはフラグに従う
    #[test]
    fn inclusion_follows_required_or_flag(required in any::<bool>(), include in any::<bool>()) {
        let mut param = ParameterDecl::new("p", ParameterLocation::Query);
        if required {
            param = param.required();
        }
        prop_assert_eq!(should_include(&param, include), required || include);
    }

    /// schema.example → examples先頭 → default の優先順位
    #[test]
    fn value_precedence(
        schema_example in prop::option::of(non_null_value()),
        named in prop::option::of(non_null_value()),
        default in prop::option::of(non_null_value()),
    ) {
        let mut param = ParameterDecl::new("p", ParameterLocation::Query);
        if let Some(v) = &schema_example {
            param = param.with_schema_example(v.clone());
        }
        if let Some(v) = &named {
            param = param.with_named_example("first", v.clone());
        }
        if let Some(v) = &default {
            param = param.with_default(v.clone());
        }

        let expected = schema_example.or(named).or(default);
        match expected {
            Some(value) => prop_assert_eq!(resolve_value(&param).unwrap(), value),
            None => prop_assert!(resolve_value(&param).is_err()),
        }
    }
}
