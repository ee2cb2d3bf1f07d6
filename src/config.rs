//! Turns parsed arguments into a validated [`Config`].

use encoding_rs::Encoding;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::cli::Args;
use crate::error::Error;
use crate::format::LineFormat;
use crate::tracklist::resolve_encoding;

pub(crate) const FFMPEG: &str = "ffmpeg";

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) ffmpeg: PathBuf,
    pub(crate) file: PathBuf,
    pub(crate) track_list: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) line_format: LineFormat,
    pub(crate) output_format: String,
    pub(crate) time_separator: char,
    pub(crate) track_list_encoding: Option<&'static Encoding>,
    pub(crate) overwrite: bool,
    pub(crate) dry_run: bool,
}

/// Checks run in a fixed order: tool, input file, track list, output
/// directory, then the line format.
pub(crate) fn resolve(args: Args) -> Result<Config> {
    let ffmpeg = match args.ffmpeg {
        Some(path) => validate_tool(path)?,
        None => find_in_path(FFMPEG).ok_or_else(|| Error::MissingTool {
            tool: FFMPEG.to_string(),
        })?,
    };

    let file = required(args.file, "--file")?;
    validate_file(&file)?;

    let track_list = required(args.track_list, "--track-list")?;
    validate_file(&track_list)?;

    let output_dir = required(args.output_dir, "--output-dir")?;
    validate_dir(&output_dir)?;

    let track_list_format = required(args.track_list_format, "--track-list-format")?;
    let line_format = LineFormat::compile(&track_list_format)?;

    let track_list_encoding = args
        .track_list_encoding
        .as_deref()
        .map(resolve_encoding)
        .transpose()?;

    let config = Config {
        ffmpeg,
        file,
        track_list,
        output_dir,
        line_format,
        output_format: args.output_format,
        time_separator: args.time_separator,
        track_list_encoding,
        overwrite: args.overwrite,
        dry_run: args.dry_run,
    };
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn required<T>(value: Option<T>, flag: &'static str) -> Result<T> {
    value.ok_or(Error::MissingArgument { flag })
}

fn validate_tool(path: PathBuf) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::MissingTool {
            tool: path.display().to_string(),
        })
    }
}

pub(crate) fn find_in_path(tool: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let full = dir.join(tool);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{tool}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

fn validate_file(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(Error::unreadable(
            path,
            std::io::Error::other("is a directory"),
        ));
    }
    File::open(path)
        .map(drop)
        .map_err(|err| Error::unreadable(path, err))
}

fn validate_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::OutputDir {
            path: path.to_path_buf(),
        });
    }
    // Creating a file is the only portable writability check.
    tempfile::Builder::new()
        .prefix(".tracklist-split-")
        .tempfile_in(path)
        .map(drop)
        .map_err(|err| {
            tracing::debug!(path = %path.display(), %err, "output directory is not writable");
            Error::OutputDir {
                path: path.to_path_buf(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::{resolve, validate_dir, validate_file};
    use crate::cli::Args;
    use crate::error::{Error, FormatError};
    use clap::Parser;
    use std::fs;
    use std::path::Path;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("ffmpeg"), "").unwrap();
            fs::write(dir.path().join("album.mp3"), "").unwrap();
            fs::write(dir.path().join("list.txt"), "0:00 Intro\n").unwrap();
            fs::create_dir(dir.path().join("out")).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> String {
            self.dir.path().join(name).display().to_string()
        }

        fn args(&self, extra: &[&str]) -> Args {
            let mut argv = vec![
                "tracklist-split".to_string(),
                "--ffmpeg".to_string(),
                self.path("ffmpeg"),
            ];
            argv.extend(extra.iter().map(|arg| arg.to_string()));
            Args::try_parse_from(argv).unwrap()
        }

        fn full_args(&self, format: &str) -> Args {
            let file = self.path("album.mp3");
            let list = self.path("list.txt");
            let out = self.path("out");
            self.args(&[
                "--file",
                &file,
                "--track-list",
                &list,
                "--output-dir",
                &out,
                "--track-list-format",
                format,
            ])
        }
    }

    #[test]
    fn resolves_complete_arguments() {
        let fixture = Fixture::new();
        let config = resolve(fixture.full_args("%from% %title%")).unwrap();
        assert_eq!(config.line_format.names(), ["from", "title"]);
        assert_eq!(config.output_format, "%seq%.mp3");
        assert_eq!(config.time_separator, ':');
        assert!(config.track_list_encoding.is_none());
    }

    #[test]
    fn reports_first_missing_flag() {
        let fixture = Fixture::new();
        let err = resolve(fixture.args(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { flag: "--file" }));

        let file = fixture.path("album.mp3");
        let err = resolve(fixture.args(&["--file", &file])).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { flag: "--track-list" }));
    }

    #[test]
    fn rejects_invalid_format() {
        let fixture = Fixture::new();
        let err = resolve(fixture.full_args("%start% %title%")).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(FormatError::NoFrom)));
    }

    #[test]
    fn rejects_missing_tool() {
        let fixture = Fixture::new();
        let ffmpeg = fixture.path("no-such-ffmpeg");
        let args =
            Args::try_parse_from(["tracklist-split", "--ffmpeg", ffmpeg.as_str()]).unwrap();
        assert!(matches!(resolve(args), Err(Error::MissingTool { .. })));
    }

    #[test]
    fn validate_file_rejects_missing_and_directories() {
        let fixture = Fixture::new();
        assert!(validate_file(Path::new(&fixture.path("album.mp3"))).is_ok());
        assert!(matches!(
            validate_file(Path::new(&fixture.path("missing.mp3"))),
            Err(Error::Unreadable { .. })
        ));
        assert!(matches!(
            validate_file(Path::new(&fixture.path("out"))),
            Err(Error::Unreadable { .. })
        ));
    }

    #[test]
    fn validate_dir_leaves_no_temp_file_behind() {
        let fixture = Fixture::new();
        let out = fixture.dir.path().join("out");
        validate_dir(&out).unwrap();
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
        assert!(matches!(
            validate_dir(&fixture.dir.path().join("album.mp3")),
            Err(Error::OutputDir { .. })
        ));
    }
}
