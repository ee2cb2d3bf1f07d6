use owo_colors::OwoColorize;
use std::path::Path;

use crate::cli::display_path;
use crate::split::{Plan, Summary};
use crate::types::TrackJob;

pub(crate) fn print_plan(plan: &Plan) {
    let base = plan.display_base_abs();
    let (encoding, autodetected) = plan.encoding();

    println!("{}", "Plan".bold());
    println!("  {} {}", "Input:".cyan(), display_path(base, plan.input()).display());
    println!(
        "  {} {}",
        "Track list:".cyan(),
        display_path(base, plan.track_list()).display()
    );
    let encoding_label = if autodetected {
        format!("{} {}", encoding.name(), "(autodetected)".dimmed())
    } else {
        encoding.name().to_string()
    };
    println!("  {} {}", "Encoding:".cyan(), encoding_label.green());
    println!("  {} {}", "Format:".cyan(), plan.line_format().yellow());
    println!(
        "  {} {}",
        "Output:".cyan(),
        display_path(base, plan.output_dir()).display()
    );
    if plan.overwrite() {
        println!(
            "  {} {}",
            "Existing files:".cyan(),
            "will be overwritten".red().bold()
        );
    }
    println!("  {} {}", "Tracks:".cyan(), plan.jobs().len());

    for job in plan.jobs() {
        println!(
            "{} {}",
            format_output_target(&display_path(base, &job.output_path)),
            format_range(job).dimmed()
        );
    }
}

pub(crate) fn print_track_success(base: Option<&Path>, job: &TrackJob) {
    println!(
        "{} {} {}",
        "ok".green().bold(),
        format_output_target(&display_path(base, &job.output_path)),
        format_range(job).dimmed()
    );
}

pub(crate) fn print_track_failure(base: Option<&Path>, job: &TrackJob, reason: &str) {
    eprintln!(
        "{} {} {}",
        "failed".red().bold(),
        format_output_target(&display_path(base, &job.output_path)),
        format_range(job).dimmed()
    );
    for line in reason.lines() {
        eprintln!("  {}", line.red());
    }
}

pub(crate) fn print_summary(base: Option<&Path>, summary: &Summary) {
    if summary.failed.is_empty() {
        return;
    }
    let total = summary.succeeded + summary.failed.len();
    eprintln!(
        "{}",
        format!("{} of {} tracks failed:", summary.failed.len(), total)
            .yellow()
            .bold()
    );
    for failure in &summary.failed {
        let reason = failure.reason.lines().next().unwrap_or_default();
        eprintln!(
            "  {} {} {}",
            failure.seq.yellow(),
            display_path(base, &failure.output_path).display(),
            reason.dimmed()
        );
    }
}

pub(crate) fn format_range(job: &TrackJob) -> String {
    match &job.to {
        Some(to) => format!("({}-{})", job.from, to),
        None => format!("({}-end)", job.from),
    }
}

fn format_output_target(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent
        && parent != Path::new(".")
    {
        let separator = if parent == Path::new(std::path::MAIN_SEPARATOR_STR) {
            ""
        } else {
            std::path::MAIN_SEPARATOR_STR
        };
        return format!(
            "{}{}{}",
            parent.display().to_string().blue(),
            separator,
            file_name.bold()
        );
    }
    file_name.bold().to_string()
}
