use anyhow::Context;
use tandem_capture::CaptureLoader;
use tandem_core::summary::CorpusSummary;

use crate::bootstrap::{self, ConfigOverrides};
use crate::cli::GlobalFlags;
use crate::cli::root_commands::InspectArgs;
use crate::commands::Outcome;
use crate::output::output;

/// Handle `tandem inspect`.
pub fn handle(args: &InspectArgs, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let config = bootstrap::load_config(flags, &ConfigOverrides::from_load(&args.load))?;

    let corpus = CaptureLoader::new(config.capture)
        .load(&args.root)
        .with_context(|| format!("cannot inspect {}", args.root.display()))?;

    output(&CorpusSummary::from(&corpus), flags.format)?;
    Ok(Outcome::Success)
}
