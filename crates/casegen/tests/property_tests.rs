//! Property-based tests for casegen.
//!
//! Uses proptest to check that emission is deterministic, keeps step order,
//! honors explicit action types, and never drops a step.

use casegen::prelude::*;
use proptest::prelude::*;

const KINDS: [ActionKind; 11] = [
    ActionKind::Navigate,
    ActionKind::Click,
    ActionKind::Fill,
    ActionKind::Check,
    ActionKind::Uncheck,
    ActionKind::Select,
    ActionKind::Upload,
    ActionKind::Wait,
    ActionKind::Verify,
    ActionKind::Hover,
    ActionKind::Press,
];

fn step_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{1,24}",
        "(Click|Tap|Press) the \"[A-Za-z ]{1,12}\" button",
        "(Navigate to|Open|Go to) /[a-z]{1,8}",
        "(Enter|Type) \"[a-z0-9@.]{1,12}\" into the [A-Za-z]{1,10} field",
        "Wait [1-9] seconds",
        "Verify the \"[A-Za-z ]{1,12}\" text is visible",
        "(GET|POST|DELETE) /api/[a-z]{1,8}",
        "[A-Za-z '\"#./:-]{1,30}",
    ]
}

/// Text whose keywords point at a different kind than the one set explicitly
fn conflicting_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "(Press|Hit) (Enter|Tab|Escape|Space)( key)?",
        "(Click|Tap) then press (Enter|Escape)",
        "Uncheck the [A-Za-z ]{1,12} (box|checkbox)",
        "(Check|Tick) and uncheck \"[A-Za-z]{1,10}\"",
        "(Navigate to|Open|Visit) https://example\\.com/[a-z]{1,8}",
        "(Fill|Enter|Type) \"[a-z]{1,8}\" into the [A-Za-z]{1,10} field",
        "Wait [1-9] seconds then verify \"[A-Za-z]{1,8}\" is visible",
    ]
}

fn test_case() -> impl Strategy<Value = TestCase> {
    (
        "[A-Za-z][A-Za-z0-9 '\"]{0,20}",
        prop::collection::vec(step_text(), 1..6),
    )
        .prop_map(|(title, steps)| {
            steps
                .into_iter()
                .enumerate()
                .fold(TestCase::new(title), |case, (i, text)| {
                    case.with_step(Step::new(u32::try_from(i + 1).unwrap(), text))
                })
        })
}

fn emit_at(target: EmissionTarget, cases: &[TestCase], ms: u64) -> CasegenResult<EmittedArtifact> {
    let clock = FixedClock::at_ms(ms);
    let options = EmitOptions::default();
    let ctx = EmitContext::new(cases, "Property suite", &clock, &options);
    emit(target, &ctx)
}

fn any_target() -> impl Strategy<Value = EmissionTarget> {
    let all = targets();
    (0..all.len()).prop_map(move |i| all[i])
}

// === Determinism ===

proptest! {
    /// Same cases and same instant give byte-identical artifacts.
    #[test]
    fn prop_emission_is_deterministic(
        cases in prop::collection::vec(test_case(), 1..4),
        target in any_target(),
        ms in 1_000_000_000_000u64..2_000_000_000_000u64,
    ) {
        let a = emit_at(target, &cases, ms).unwrap();
        let b = emit_at(target, &cases, ms).unwrap();
        prop_assert_eq!(a, b);
    }
}

// === Step order and omission ===

proptest! {
    /// Script formats write one `Step N:` comment per input step, in order.
    #[test]
    fn prop_no_step_omitted(
        cases in prop::collection::vec(test_case(), 1..4),
        target in any_target(),
    ) {
        prop_assume!(target.format.kind() == ArtifactKind::Script);
        let artifact = emit_at(target, &cases, 1_700_000_000_000).unwrap();
        let expected: usize = cases.iter().map(|c| c.steps.len()).sum();
        prop_assert_eq!(
            extract_metadata(&artifact.content).step_count,
            expected,
            "{}:\n{}",
            target,
            artifact.content
        );
    }

    /// Navigation targets appear in step order.
    #[test]
    fn prop_step_order_preserved(paths in prop::collection::vec("[a-z]{3,8}", 1..8)) {
        let case = paths.iter().enumerate().fold(TestCase::new("Order"), |case, (i, p)| {
            case.with_step(Step::new(u32::try_from(i + 1).unwrap(), format!("Navigate to /{p}/{i}")))
        });
        let target = EmissionTarget::new(Platform::Web, Format::Playwright);
        let artifact = emit_at(target, &[case], 1_700_000_000_000).unwrap();
        let mut last = 0;
        for (i, p) in paths.iter().enumerate() {
            let needle = format!("await page.goto(BASE_URL + '/{p}/{i}');");
            let pos = artifact.content.find(&needle);
            prop_assert!(pos.is_some(), "missing {}", needle);
            let pos = pos.unwrap_or_default();
            prop_assert!(pos >= last);
            last = pos;
        }
    }
}

// === Classification ===

proptest! {
    /// An explicit action type always wins over the step text.
    #[test]
    fn prop_explicit_type_passes_through(
        text in prop_oneof![step_text(), conflicting_text()],
        idx in 0..KINDS.len(),
    ) {
        let kind = KINDS[idx];
        let step = Step::new(1, text).with_type(kind);
        let action = classify(&step);
        prop_assert_eq!(action.kind, kind);
        prop_assert_eq!(action.origin, Origin::Explicit);
    }

    /// Classification never panics and is stable.
    #[test]
    fn prop_classify_is_pure(text in "\\PC{0,60}") {
        let step = Step::new(1, text);
        prop_assert_eq!(classify(&step), classify(&step));
    }
}
