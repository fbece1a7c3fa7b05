use anyhow::{Context, Result};
use colorbrew::{Color, ImageFormat, Options, Preset};
use log::*;
use std::path::PathBuf;
use structopt::StructOpt;
use walkdir::WalkDir;

#[derive(Debug, StructOpt)]
#[structopt(about = "Render .csv grids of values into heatmap images")]
struct Opt {
    /// Specify the .csv file to use
    #[structopt(name = "INPUT", parse(from_os_str))]
    input: PathBuf,

    /// Sets the level of verbosity
    #[structopt(short = "v", parse(from_occurrences))]
    verbose: usize,

    /// Silence all output
    #[structopt(short = "q")]
    quiet: bool,

    /// Finds .csv files in the specified folder and runs on all of them
    #[structopt(short = "r")]
    recursive: bool,

    /// Color scale to brew values onto
    #[structopt(
        short = "p",
        long = "palette",
        default_value = "Default",
        possible_values = &Preset::variants(),
        case_insensitive = true
    )]
    palette: Preset,

    /// Color for cells without data, as #RRGGBB
    #[structopt(long = "nodata", default_value = "#000000")]
    nodata: Color,

    /// Number of leading label columns in every row
    #[structopt(long = "skip", default_value = "0")]
    skip: usize,

    #[structopt(
        short = "f",
        long = "format",
        default_value = "Png",
        possible_values = &ImageFormat::variants(),
        case_insensitive = true
    )]
    format: ImageFormat,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    stderrlog::new()
        .module(module_path!())
        .quiet(opt.quiet)
        .verbosity(opt.verbose)
        .init()
        .context("Could not set up logging")?;

    let options = Options {
        spectrum: opt.palette.spectrum(),
        nodata: opt.nodata,
        skip: opt.skip,
        format: opt.format,
    };
    let exts = [".csv", ".csv.gz"];

    if opt.recursive {
        let mut failed = 0;
        for entry in WalkDir::new(&opt.input) {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy();
            if exts.iter().any(|ext| name.ends_with(ext)) {
                if let Err(e) = colorbrew::render(entry.path(), &options) {
                    warn!("Skipping {}: {:#}", entry.path().display(), e);
                    failed += 1;
                }
            }
        }
        if failed > 0 {
            anyhow::bail!("{} files could not be rendered", failed);
        }
    } else {
        let dest = colorbrew::render(&opt.input, &options)?;
        info!("Wrote {}", dest.display());
    }
    Ok(())
}
