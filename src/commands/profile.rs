use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::artifacts::{profile_path, slugify};
use crate::cli::ProfileArgs;
use crate::model::FieldBag;
use crate::profile::{assemble_profile, weight_summary};
use crate::util::{read_input, to_json_pretty, write_bytes};

pub fn run(args: ProfileArgs) -> Result<()> {
    let fields = load_field_bag(&args.fields)?;
    let profile = assemble_profile(&fields);
    log_weights(&fields);

    let data = to_json_pretty(&profile)?;
    if args.stdout {
        io::stdout()
            .write_all(&data)
            .context("failed to write profile to stdout")?;
        return Ok(());
    }

    let path = args
        .out
        .unwrap_or_else(|| profile_path(&args.output_root, &slugify(&args.profile_name)));
    write_profile(&path, &profile)?;

    Ok(())
}

pub fn load_field_bag(path: &Path) -> Result<FieldBag> {
    let raw = read_input(path)?;
    let fields = serde_json::from_slice::<FieldBag>(&raw)
        .with_context(|| format!("failed to parse field bag {}", path.display()))?;
    debug!(path = %path.display(), "loaded field bag");
    Ok(fields)
}

pub fn write_profile(path: &Path, profile: &Value) -> Result<()> {
    let data = to_json_pretty(profile)?;
    let sha256 = write_bytes(path, &data)?;
    let sections = profile.as_object().map(|entries| entries.len()).unwrap_or(0);

    info!(path = %path.display(), sections, sha256 = %sha256, "wrote profile");
    Ok(())
}

pub fn log_weights(fields: &FieldBag) {
    let summary = weight_summary(fields);
    for (priority, weight) in &summary.weights {
        debug!(priority = *priority, weight = %format!("{weight:.2}"), "priority weight");
    }
    info!(total = %format!("{:.2}", summary.total), "priority weight total");
}
