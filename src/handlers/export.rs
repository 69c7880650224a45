use colored::Colorize;
use std::path::Path;

use crate::metadata::snapshot::write_snapshot;
use crate::metadata::Metadata;

pub fn handle_export(metadata: &Metadata, output: &Path) -> crate::Result<()> {
    write_snapshot(output, metadata)?;
    println!(
        "{} {} ({} Kubernetes versions)",
        "✅ Metadata written to".green(),
        output.display(),
        metadata.k8s_versions().len()
    );
    Ok(())
}
