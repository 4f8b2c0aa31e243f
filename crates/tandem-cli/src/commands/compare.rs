use anyhow::Context;
use tandem_compare::compare_roots;

use crate::bootstrap::{self, ConfigOverrides};
use crate::cli::GlobalFlags;
use crate::cli::root_commands::CompareArgs;
use crate::commands::Outcome;
use crate::output::output;

/// Handle `tandem compare`.
pub fn handle(args: &CompareArgs, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let config = bootstrap::load_config(flags, &ConfigOverrides::from_compare(args))?;

    tracing::info!(
        baseline = %args.baseline.display(),
        candidate = %args.candidate.display(),
        mode = %config.compare.mode,
        "comparing capture corpora"
    );

    let report = compare_roots(
        &args.baseline,
        &args.candidate,
        &config.compare,
        &config.capture,
    )
    .with_context(|| {
        format!(
            "cannot compare {} with {}",
            args.baseline.display(),
            args.candidate.display()
        )
    })?;

    output(&report, flags.format)?;

    Ok(if report.is_match() {
        Outcome::Success
    } else {
        Outcome::Mismatch
    })
}
