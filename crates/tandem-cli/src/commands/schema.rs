use schemars::schema_for;
use tandem_core::record::InteractionRecord;
use tandem_core::report::Report;
use tandem_core::summary::CorpusSummary;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::commands::Outcome;
use crate::output::output;

/// Handle `tandem schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let schema = match args.target {
        SchemaTarget::Report => schema_for!(Report),
        SchemaTarget::Record => schema_for!(InteractionRecord),
        SchemaTarget::Summary => schema_for!(CorpusSummary),
    };

    output(&serde_json::to_value(schema)?, flags.format)?;
    Ok(Outcome::Success)
}
