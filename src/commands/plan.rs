use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::artifacts::{FilterPlan, runner_script};
use crate::cli::{PlanArgs, RunnerArgs};
use crate::util::write_bytes;

pub fn run_command(args: PlanArgs) -> Result<()> {
    let plan = filter_plan(&args);
    info!(slug = %plan.slug, profile = %plan.profile_path.display(), "filter command");
    println!("{}", plan.command(&args.tool));
    Ok(())
}

pub fn run_runner(args: RunnerArgs) -> Result<()> {
    let plan = filter_plan(&args.plan);
    let Some(script) = runner_script(&plan.command(&args.plan.tool)) else {
        bail!("filter command is empty; nothing to wrap in a runner");
    };

    if args.stdout {
        io::stdout()
            .write_all(script.as_bytes())
            .context("failed to write runner to stdout")?;
        return Ok(());
    }

    let sha256 = write_bytes(&args.out, script.as_bytes())?;
    info!(path = %args.out.display(), sha256 = %sha256, "wrote runner script");
    Ok(())
}

pub fn filter_plan(args: &PlanArgs) -> FilterPlan {
    FilterPlan::new(&args.profile_name, &args.input_path, &args.output_root)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::artifacts::DEFAULT_TOOL;

    fn plan_args(output_root: PathBuf) -> PlanArgs {
        PlanArgs {
            profile_name: "Year 7 Shortlist".to_string(),
            input_path: "data/raw/latest.jsonl".to_string(),
            tool: DEFAULT_TOOL.to_string(),
            output_root,
        }
    }

    #[test]
    fn runner_is_written_with_crlf_line_endings() {
        let root = std::env::temp_dir().join(format!("school-profile-runner-{}", std::process::id()));
        let out = root.join("run_filter.bat");

        run_runner(RunnerArgs {
            plan: plan_args(PathBuf::from("outputs")),
            out: out.clone(),
            stdout: false,
        })
        .expect("runner should be written");

        let script = fs::read_to_string(&out).expect("runner exists");
        assert!(script.starts_with("@echo off\r\nsetlocal\r\n"));
        assert!(script.contains(
            "\r\n%PYTHON% filter_schools.py --input data/raw/latest.jsonl \
             --profile outputs/profiles/year_7_shortlist.json "
        ));
        assert_eq!(script.lines().count(), 11);
        assert!(!script.replace("\r\n", "").contains('\n'));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn filter_plan_reads_plan_args() {
        let plan = filter_plan(&plan_args(PathBuf::from("out")));
        assert_eq!(plan.slug, "year_7_shortlist");
        assert_eq!(plan.profile_path, PathBuf::from("out").join("profiles").join("year_7_shortlist.json"));
    }
}
