use encoding_rs::Encoding;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};

use crate::Result;
use crate::config::Config;
use crate::error::Error;
use crate::naming::build_file_name;
use crate::output::{print_track_failure, print_track_success};
use crate::time::normalize_time;
use crate::tracklist::LoadedTrackList;
use crate::types::{TrackJob, TrackRecord};

const STDERR_TAIL_LINES: usize = 5;

pub(crate) struct Plan {
    jobs: Vec<TrackJob>,
    input: PathBuf,
    track_list: PathBuf,
    line_format: String,
    output_dir: PathBuf,
    display_base_abs: Option<PathBuf>,
    overwrite: bool,
    encoding_used: &'static Encoding,
    encoding_autodetected: bool,
}

impl Plan {
    pub(crate) fn jobs(&self) -> &[TrackJob] {
        &self.jobs
    }

    pub(crate) fn input(&self) -> &Path {
        &self.input
    }

    pub(crate) fn track_list(&self) -> &Path {
        &self.track_list
    }

    pub(crate) fn line_format(&self) -> &str {
        &self.line_format
    }

    pub(crate) fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub(crate) fn display_base_abs(&self) -> Option<&Path> {
        self.display_base_abs.as_deref()
    }

    pub(crate) fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub(crate) fn encoding(&self) -> (&'static Encoding, bool) {
        (self.encoding_used, self.encoding_autodetected)
    }

    /// Runs one `ffmpeg` cut per job, in order. A failing cut is reported and
    /// the remaining jobs still run.
    pub(crate) fn execute(&self, ffmpeg: &Path) -> Summary {
        let mut summary = Summary::default();
        for job in &self.jobs {
            let args = extraction_args(job, &self.input, self.overwrite);
            match run_ffmpeg(ffmpeg, &args) {
                Ok(()) => {
                    print_track_success(self.display_base_abs(), job);
                    summary.succeeded += 1;
                }
                Err(reason) => {
                    tracing::warn!(seq = %job.seq, output = %job.output_path.display(), %reason, "track extraction failed");
                    print_track_failure(self.display_base_abs(), job, &reason);
                    summary.failed.push(TrackFailure {
                        seq: job.seq.clone(),
                        output_path: job.output_path.clone(),
                        reason,
                    });
                }
            }
        }
        summary
    }
}

#[derive(Debug, Default)]
pub(crate) struct Summary {
    pub(crate) succeeded: usize,
    pub(crate) failed: Vec<TrackFailure>,
}

#[derive(Debug)]
pub(crate) struct TrackFailure {
    pub(crate) seq: String,
    pub(crate) output_path: PathBuf,
    pub(crate) reason: String,
}

/// Normalizes every time and builds every output path up front, so a bad
/// value stops the run before anything is written.
pub(crate) fn prepare(
    config: &Config,
    loaded: LoadedTrackList,
    display_base_abs: Option<PathBuf>,
) -> Result<Plan> {
    let jobs = build_jobs(
        &loaded.records,
        &config.output_dir,
        &config.output_format,
        config.time_separator,
    )?;
    if !config.overwrite {
        ensure_output_paths_available(&jobs)?;
    }

    Ok(Plan {
        jobs,
        input: config.file.clone(),
        track_list: config.track_list.clone(),
        line_format: config.line_format.template().to_string(),
        output_dir: config.output_dir.clone(),
        display_base_abs,
        overwrite: config.overwrite,
        encoding_used: loaded.encoding,
        encoding_autodetected: loaded.autodetected,
    })
}

pub(crate) fn build_jobs(
    records: &[TrackRecord],
    output_dir: &Path,
    output_format: &str,
    separator: char,
) -> Result<Vec<TrackJob>> {
    let mut seen: HashMap<PathBuf, String> = HashMap::new();
    let mut jobs = Vec::with_capacity(records.len());
    for record in records {
        let from = normalize_time(record.start(), separator)?;
        let to = record
            .end()
            .map(|end| normalize_time(end, separator))
            .transpose()?;
        let file_name = build_file_name(output_format, record);
        let output_path = output_dir.join(relative_file_name(&file_name));

        if let Some(first) = seen.insert(output_path.clone(), record.seq().to_string()) {
            return Err(Error::DuplicateOutput {
                first,
                second: record.seq().to_string(),
                path: output_path,
            });
        }

        jobs.push(TrackJob {
            seq: record.seq().to_string(),
            from,
            to,
            output_path,
        });
    }
    Ok(jobs)
}

/// Drops any root or drive prefix so the name always lands inside the
/// output directory.
fn relative_file_name(name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .collect()
}

fn ensure_output_paths_available(jobs: &[TrackJob]) -> Result<()> {
    for job in jobs {
        if job.output_path.exists() {
            return Err(Error::OutputExists {
                path: job.output_path.clone(),
            });
        }
    }
    Ok(())
}

pub(crate) fn extraction_args(job: &TrackJob, input: &Path, overwrite: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-hide_banner".into(),
        if overwrite { "-y" } else { "-n" }.into(),
        "-i".into(),
        input.into(),
        "-c".into(),
        "copy".into(),
        "-ss".into(),
        job.from.as_str().into(),
    ];
    if let Some(to) = &job.to {
        args.push("-to".into());
        args.push(to.as_str().into());
    }
    args.push(job.output_path.as_os_str().to_owned());
    args
}

fn run_ffmpeg(ffmpeg: &Path, args: &[OsString]) -> std::result::Result<(), String> {
    let mut command = Command::new(ffmpeg);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    tracing::debug!(?command, "running ffmpeg");

    let output = command
        .output()
        .map_err(|err| format!("failed to start {}: {}", ffmpeg.display(), err))?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    tracing::debug!(status = %output.status, stderr = %stderr, "ffmpeg finished");

    if output.status.success() {
        return Ok(());
    }

    let mut reason = format!("ffmpeg exited with {}", output.status);
    let tail = stderr_tail(&stderr, STDERR_TAIL_LINES);
    if !tail.is_empty() {
        reason.push('\n');
        reason.push_str(&tail);
    }
    Err(reason)
}

fn stderr_tail(stderr: &str, lines: usize) -> String {
    let kept: Vec<&str> = stderr
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    let start = kept.len().saturating_sub(lines);
    kept[start..]
        .iter()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
