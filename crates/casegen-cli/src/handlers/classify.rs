//! Classify command handler

use crate::error::CliResult;
use crate::ClassifyArgs;
use casegen::{classify, InferredAction, Step};

/// Classify one step built from the command arguments
#[must_use]
pub fn classify_args(args: &ClassifyArgs) -> InferredAction {
    let mut step = Step::new(1, args.text.as_str());
    if let Some(selector) = &args.selector {
        step = step.with_selector(selector.as_str());
    }
    if let Some(value) = &args.value {
        step = step.with_input(value.as_str());
    }
    classify(&step)
}

/// Execute the classify command
pub fn execute_classify(args: &ClassifyArgs) -> CliResult<()> {
    let action = classify_args(args);
    println!("{}", serde_json::to_string_pretty(&action)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use casegen::ActionKind;

    fn args(text: &str) -> ClassifyArgs {
        ClassifyArgs {
            text: text.to_string(),
            selector: None,
            value: None,
        }
    }

    #[test]
    fn test_navigate() {
        let action = classify_args(&args("Navigate to /login"));
        assert_eq!(action.kind, ActionKind::Navigate);
        assert_eq!(action.url(), Some("/login"));
    }

    #[test]
    fn test_wait() {
        let action = classify_args(&args("Wait 2 seconds"));
        assert_eq!(action.kind, ActionKind::Wait);
        assert_eq!(action.wait_ms, Some(2000));
    }

    #[test]
    fn test_unknown_is_unresolved() {
        let action = classify_args(&args("Something vague happens"));
        assert!(action.is_unresolved());
    }
}
