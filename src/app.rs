use clap::{CommandFactory, Parser};

use crate::Result;
use crate::cli::Args;
use crate::config::{Config, resolve};
use crate::error::Error;
use crate::logging::init_logging;
use crate::output::{print_plan, print_summary};
use crate::split::prepare;
use crate::tracklist::load_track_list;

pub fn run() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        // Printing help only fails when stdout is gone.
        Args::command().print_long_help().ok();
        return Ok(());
    }

    let args = Args::parse();
    init_logging(args.verbose);

    let config = resolve(args)?;
    split(&config)
}

fn split(config: &Config) -> Result<()> {
    let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;

    let loaded = load_track_list(
        &config.track_list,
        config.track_list_encoding,
        &config.line_format,
    )?;
    let plan = prepare(config, loaded, Some(cwd))?;

    if config.dry_run {
        print_plan(&plan);
        return Ok(());
    }

    tracing::info!(tracks = plan.jobs().len(), "extracting tracks");
    let summary = plan.execute(&config.ffmpeg);
    println!("Done!");
    print_summary(plan.display_base_abs(), &summary);
    Ok(())
}
