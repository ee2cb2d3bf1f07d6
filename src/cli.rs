use clap::Parser;
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_OUTPUT_FORMAT: &str = "%seq%.mp3";
pub(crate) const DEFAULT_TIME_SEPARATOR: char = ':';

const AFTER_HELP: &str = "\
Placeholders are names made of a-z, A-Z and 0-9 surrounded by '%'. Use as many as you like in
--track-list-format and reuse them in --output-format. %from% is required and marks the start of each
track. %to% is optional; when a line has no %to%, the track ends where the next one starts and the
last track runs to the end of the file. %seq% always exists: it numbers tracks in track list order,
zero-padded to a common width.

Example:
  tracklist-split --file album.mp3 --track-list list.txt \\
      --track-list-format \"%number%. %from% - %title%\" --output-dir out/ \\
      --output-format \"%seq% - %title%.mp3\"";

#[derive(Parser, Debug)]
#[command(author, version, about, after_long_help = AFTER_HELP)]
pub(crate) struct Args {
    /// Audio file to split
    #[arg(long, value_name = "FILE")]
    pub(crate) file: Option<PathBuf>,
    /// Track list, one track per line
    #[arg(long, value_name = "FILE")]
    pub(crate) track_list: Option<PathBuf>,
    /// Line format of the track list, e.g. "%from% %title%"
    #[arg(long, value_name = "FORMAT")]
    pub(crate) track_list_format: Option<String>,
    /// Directory the tracks are written to
    #[arg(long, value_name = "DIR")]
    pub(crate) output_dir: Option<PathBuf>,
    /// File name format of the extracted tracks
    #[arg(long, value_name = "FORMAT", default_value = DEFAULT_OUTPUT_FORMAT)]
    pub(crate) output_format: String,
    /// Character separating hours, minutes and seconds in the track list
    #[arg(long, value_name = "CHAR", default_value_t = DEFAULT_TIME_SEPARATOR)]
    pub(crate) time_separator: char,
    /// Track list text encoding (autodetected when omitted)
    #[arg(long, value_name = "ENCODING")]
    pub(crate) track_list_encoding: Option<String>,
    /// Path to the ffmpeg executable (searched on PATH when omitted)
    #[arg(long, value_name = "PATH")]
    pub(crate) ffmpeg: Option<PathBuf>,
    /// Overwrite existing output files
    #[arg(short = 'o', long)]
    pub(crate) overwrite: bool,
    /// Print the plan without running ffmpeg
    #[arg(short = 'n', long)]
    pub(crate) dry_run: bool,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
}

pub(crate) fn display_path(base: Option<&Path>, path: &Path) -> PathBuf {
    if let Some(base) = base
        && let Ok(rel) = path.strip_prefix(base)
    {
        if rel.as_os_str().is_empty() {
            return PathBuf::from(".");
        }
        return rel.to_path_buf();
    }
    path.to_path_buf()
}
