//! Names, paths and the filter command derived from a profile name.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_TOOL: &str = "python filter_schools.py";
pub const DEFAULT_INPUT_PATH: &str = "data/raw/khda_schools_YYYYMMDD_HHMMSS.jsonl";
pub const FALLBACK_SLUG: &str = "profile";
const MAX_SLUG_CHARS: usize = 40;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));
static PYTHON_LAUNCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^python(?:\.exe)?\s+").expect("launcher pattern is valid"));

/// Filesystem-safe token for a profile name. Never empty.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let collapsed = NON_SLUG_RUN.replace_all(&lowered, "_");
    let slug = collapsed
        .trim_matches('_')
        .chars()
        .take(MAX_SLUG_CHARS)
        .collect::<String>();

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Every path the filter run reads or writes for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPlan {
    pub slug: String,
    pub input_path: String,
    pub profile_path: PathBuf,
    pub output_json: PathBuf,
    pub output_jsonl: PathBuf,
    pub output_csv: PathBuf,
    pub explain_path: PathBuf,
}

impl FilterPlan {
    pub fn new(profile_name: &str, input_path: &str, output_root: &Path) -> Self {
        let slug = slugify(profile_name);
        let input_path = match input_path.trim() {
            "" => DEFAULT_INPUT_PATH.to_string(),
            trimmed => trimmed.to_string(),
        };
        let filtered = output_root.join("filtered");

        Self {
            profile_path: profile_path(output_root, &slug),
            output_json: filtered.join(format!("{slug}.json")),
            output_jsonl: filtered.join(format!("{slug}.filtered.jsonl")),
            output_csv: filtered.join(format!("{slug}.filtered.csv")),
            explain_path: output_root.join("reports").join(format!("{slug}.md")),
            input_path,
            slug,
        }
    }

    /// The command line handed to the external filter tool. A blank tool
    /// falls back to [`DEFAULT_TOOL`].
    pub fn command(&self, tool: &str) -> String {
        let tool = match tool.trim() {
            "" => DEFAULT_TOOL,
            trimmed => trimmed,
        };
        format!(
            "{} --input {} --profile {} --output {} --output-jsonl {} --output-csv {} --explain {}",
            tool,
            self.input_path,
            slash_path(&self.profile_path),
            slash_path(&self.output_json),
            slash_path(&self.output_jsonl),
            slash_path(&self.output_csv),
            slash_path(&self.explain_path),
        )
    }
}

pub fn profile_path(output_root: &Path, slug: &str) -> PathBuf {
    output_root.join("profiles").join(format!("{slug}.json"))
}

/// Windows batch file that runs `command` from its own directory,
/// preferring a local `.venv` interpreter. `None` for a blank command.
pub fn runner_script(command: &str) -> Option<String> {
    let command = command.trim();
    if command.is_empty() {
        return None;
    }

    let run_line = PYTHON_LAUNCHER.replace(command, "%PYTHON% ");
    let lines: [&str; 11] = [
        "@echo off",
        "setlocal",
        "set SCRIPT_DIR=%~dp0",
        "pushd %SCRIPT_DIR%",
        "set PYTHON=",
        "if exist .venv\\Scripts\\python.exe set PYTHON=.venv\\Scripts\\python.exe",
        "if \"%PYTHON%\"==\"\" set PYTHON=python",
        &*run_line,
        "echo.",
        "echo Done. Press any key to exit.",
        "pause",
    ];

    Some(lines.join("\r\n"))
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("My School Plan!"), "my_school_plan");
        assert_eq!(slugify("  --Year 7 / IB--  "), "year_7_ib");
        assert_eq!(slugify("Über Schule"), "ber_schule");
    }

    #[test]
    fn slugify_falls_back_when_nothing_survives() {
        assert_eq!(slugify(""), "profile");
        assert_eq!(slugify("   "), "profile");
        assert_eq!(slugify("!!!"), "profile");
    }

    #[test]
    fn slugify_truncates_to_forty_chars() {
        let slug = slugify(&"ab".repeat(30));
        assert_eq!(slug.len(), 40);
        assert_eq!(slugify(&format!("{}!!tail", "a".repeat(39))), format!("{}_", "a".repeat(39)));
    }

    #[test]
    fn command_uses_slug_paths() {
        let plan = FilterPlan::new("Family Shortlist", "  data/raw/latest.jsonl ", Path::new("outputs"));
        assert_eq!(
            plan.command(DEFAULT_TOOL),
            "python filter_schools.py --input data/raw/latest.jsonl \
             --profile outputs/profiles/family_shortlist.json \
             --output outputs/filtered/family_shortlist.json \
             --output-jsonl outputs/filtered/family_shortlist.filtered.jsonl \
             --output-csv outputs/filtered/family_shortlist.filtered.csv \
             --explain outputs/reports/family_shortlist.md"
        );
    }

    #[test]
    fn blank_input_path_uses_placeholder() {
        let plan = FilterPlan::new("", " ", Path::new("outputs"));
        assert_eq!(plan.input_path, DEFAULT_INPUT_PATH);
        assert_eq!(plan.profile_path, Path::new("outputs/profiles/profile.json"));
    }

    #[test]
    fn blank_tool_uses_default_tool() {
        let plan = FilterPlan::new("x", "in.jsonl", Path::new("outputs"));
        let command = plan.command("   ");

        assert!(command.starts_with("python filter_schools.py --input in.jsonl "));
        assert_eq!(command, plan.command(DEFAULT_TOOL));
    }

    #[test]
    fn runner_script_swaps_interpreter_and_uses_crlf() {
        let script = runner_script("Python.exe  filter_schools.py --input x").expect("script");
        let lines = script.split("\r\n").collect::<Vec<&str>>();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "@echo off");
        assert_eq!(lines[7], "%PYTHON% filter_schools.py --input x");
        assert_eq!(lines[10], "pause");
        assert!(!script.ends_with("\r\n"));
    }

    #[test]
    fn runner_script_keeps_other_tools_verbatim() {
        let script = runner_script("uv run filter_schools.py").expect("script");
        assert!(script.contains("\r\nuv run filter_schools.py\r\n"));
    }

    #[test]
    fn runner_script_needs_a_command() {
        assert!(runner_script("  ").is_none());
    }
}
