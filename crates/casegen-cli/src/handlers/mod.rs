//! Command handlers - one module per subcommand
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod classify;
pub mod export;
pub mod lint;
pub mod targets;

pub use classify::{classify_args, execute_classify};
pub use export::{execute_export, export_with, output_path, parse_cases, suite_name, CaseFile};
pub use lint::{execute_lint, render_lint_report};
pub use targets::{execute_targets, render_targets, target_rows, TargetRow};
