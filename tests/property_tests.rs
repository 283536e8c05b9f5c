//! Property-based tests: the counting invariant and record ordering hold
//! for arbitrary pass/fail scripts.

use proptest::prelude::*;

use quipu::{Context, Harness, TimingMode};

fn context_from_script(script: &[bool]) -> Context {
    let mut cx = Context::new();
    for (i, pass) in script.iter().copied().enumerate() {
        cx.bind(format!("testCase{:03}", i), move |_| {
            if pass { Ok(()) } else { Err("scripted failure".into()) }
        });
    }
    cx
}

proptest! {
    #[test]
    fn attempted_equals_passed_plus_failed(script in proptest::collection::vec(any::<bool>(), 0..64)) {
        let mut cx = context_from_script(&script);
        let summary = Harness::new()
            .timing(TimingMode::Disabled)
            .run(&mut cx)
            .unwrap();

        prop_assert_eq!(summary.attempted, script.len());
        prop_assert_eq!(summary.attempted, summary.passed + summary.failed);
        prop_assert_eq!(summary.passed, script.iter().filter(|p| **p).count());
        prop_assert_eq!(summary.records.len(), script.len());
    }

    #[test]
    fn records_follow_binding_order_and_outcomes(script in proptest::collection::vec(any::<bool>(), 1..32)) {
        let mut cx = context_from_script(&script);
        let summary = Harness::new().run(&mut cx).unwrap();

        for (i, (record, pass)) in summary.records.iter().zip(script.iter()).enumerate() {
            let expected = format!("testCase{:03}", i);
            prop_assert_eq!(record.name.as_str(), expected.as_str());
            prop_assert_eq!(record.passed(), *pass);
        }
    }

    #[test]
    fn every_record_has_wall_elapsed_in_timing_mode(script in proptest::collection::vec(any::<bool>(), 0..16)) {
        let mut cx = context_from_script(&script);
        let summary = Harness::new().run(&mut cx).unwrap();
        for record in &summary.records {
            prop_assert!(record.elapsed.is_some());
        }
    }
}
