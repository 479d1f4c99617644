use anyhow::Result;
use tracing::{info, warn};

use crate::artifacts::runner_script;
use crate::cli::BuildArgs;
use crate::commands::plan::filter_plan;
use crate::commands::profile::{load_field_bag, log_weights, write_profile};
use crate::profile::assemble_profile;
use crate::util::{sha256_hex, to_json_pretty, write_bytes};

pub fn run(args: BuildArgs) -> Result<()> {
    let fields = load_field_bag(&args.fields)?;
    let profile = assemble_profile(&fields);
    let plan = filter_plan(&args.plan);
    let command = plan.command(&args.plan.tool);
    let runner = runner_script(&command);

    log_weights(&fields);
    info!(slug = %plan.slug, "building artifacts");

    if args.dry_run {
        let data = to_json_pretty(&profile)?;
        info!(
            profile = %plan.profile_path.display(),
            sha256 = %sha256_hex(&data),
            runner = %args.runner_path.display(),
            "build dry-run complete"
        );
        println!("{command}");
        return Ok(());
    }

    write_profile(&plan.profile_path, &profile)?;

    match runner {
        Some(script) => {
            let sha256 = write_bytes(&args.runner_path, script.as_bytes())?;
            info!(path = %args.runner_path.display(), sha256 = %sha256, "wrote runner script");
        }
        None => warn!("filter command is empty; runner script skipped"),
    }

    println!("{command}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::artifacts::DEFAULT_TOOL;
    use crate::cli::PlanArgs;

    fn build_args(root: &std::path::Path, dry_run: bool) -> BuildArgs {
        BuildArgs {
            fields: root.join("fields.json"),
            plan: PlanArgs {
                profile_name: "Family".to_string(),
                input_path: String::new(),
                tool: DEFAULT_TOOL.to_string(),
                output_root: root.join("outputs"),
            },
            runner_path: root.join("run_filter.bat"),
            dry_run,
        }
    }

    #[test]
    fn dry_run_writes_nothing() {
        let root = std::env::temp_dir().join(format!("school-profile-dry-{}", std::process::id()));
        write_bytes(&root.join("fields.json"), br#"{"student_name": "Sara"}"#).expect("fixture write");

        run(build_args(&root, true)).expect("dry run should succeed");

        assert!(!root.join("outputs").exists());
        assert!(!root.join("run_filter.bat").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn build_writes_profile_and_runner() {
        let root = std::env::temp_dir().join(format!("school-profile-build-{}", std::process::id()));
        write_bytes(&root.join("fields.json"), br#"{"student_name": "Sara"}"#).expect("fixture write");

        run(build_args(&root, false)).expect("build should succeed");

        let profile = fs::read_to_string(root.join("outputs").join("profiles").join("family.json"))
            .expect("profile written");
        assert!(profile.contains("\"name\": \"Sara\""));
        let runner = fs::read_to_string(root.join("run_filter.bat")).expect("runner written");
        assert!(runner.contains("--input data/raw/khda_schools_YYYYMMDD_HHMMSS.jsonl"));

        let _ = fs::remove_dir_all(&root);
    }
}
