use anyhow::{bail, Context, Result};
use arrayvec::ArrayVec;
use clap::arg_enum;
use flate2::read::GzDecoder;
use image::png::PngEncoder;
use itertools::Itertools;
use log::*;
use rayon::prelude::*;
use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

pub mod colors;
pub mod contrast;
pub mod palettes;

pub use colors::{hex_to_packed, pack_rgba, Color, ColorParseError};
pub use contrast::ColorContrast;
pub use palettes::named::NamedColor;
pub use palettes::presets::Preset;
pub use palettes::{BrewError, ColorBrewer, Range, Spectrum};

/// Rows of spectrum drawn above the data as a legend.
pub const LEGEND_HEIGHT: usize = 26;

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ImageFormat {
        Png,
        Webp,
    }
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    pub spectrum: Spectrum,
    /// Drawn where a cell holds NaN.
    pub nodata: Color,
    /// Leading columns of every record that are labels, not values.
    pub skip: usize,
    pub format: ImageFormat,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            spectrum: Preset::default().spectrum(),
            nodata: Color::BLACK,
            skip: 0,
            format: ImageFormat::Png,
        }
    }
}

/// A rectangular block of values, one `Vec` per CSV record.
#[derive(Debug, PartialEq)]
pub struct Grid {
    width: usize,
    rows: Vec<Vec<f64>>,
}

impl Grid {
    /// Pads short rows with NaN so every row is as wide as the widest.
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let ragged = rows.iter().filter(|row| row.len() != width).count();
        if ragged > 0 {
            warn!(
                "{} of {} rows are shorter than {} values, was the file cut early? Filling with NaN.",
                ragged,
                rows.len(),
                width
            );
        }
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().pad_using(width, |_| f64::NAN).collect())
            .collect();
        Self { width, rows }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Range of the finite values over the whole grid.
    pub fn range(&self) -> Range {
        self.rows
            .iter()
            .map(|row| Range::from_values(row))
            .fold(Range::empty(), Range::combine)
    }
}

pub struct Heatmap {
    pub width: usize,
    pub height: usize,
    pub range: Range,
    /// RGB8, row-major.
    pub pixels: Vec<u8>,
}

fn parse_f64(s: &str) -> std::result::Result<f64, std::num::ParseFloatError> {
    let s = s.trim();
    if s == "-nan" || s == "nan" {
        Ok(f64::NAN)
    } else {
        s.parse()
    }
}

pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Box<dyn Read>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    Ok(match path.extension() {
        Some(ext) if ext == OsStr::new("gz") => Box::new(GzDecoder::new(file)),
        _ => Box::new(file),
    })
}

fn read_file<T: Read>(file: T) -> csv::Reader<T> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file)
}

pub fn read_grid<R: Read>(file: R, skip: usize) -> Result<Grid> {
    let mut rows = Vec::new();
    for (line, result) in read_file(file).into_records().enumerate() {
        let mut record = result.with_context(|| format!("Invalid CSV record on line {}", line + 1))?;
        record.trim();
        let row = record
            .iter()
            .skip(skip)
            .map(|s| {
                parse_f64(s)
                    .with_context(|| format!("'{}' on line {} should be a valid float", s, line + 1))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(Grid::new(rows))
}

/// The `nodata` color, nudged away from whichever end of the spectrum it is
/// nearest to if the two would be hard to tell apart. Inner stops are ignored.
pub fn nodata_color(nodata: Color, spectrum: &Spectrum) -> Color {
    let distance = |c: &Color| (c.luminance() - nodata.luminance()).abs();
    let nearest = match (spectrum.colors().first(), spectrum.colors().last()) {
        (Some(first), Some(last)) if distance(last) < distance(first) => Some(*last),
        (first, _) => first.copied(),
    };
    contrast::shade_or_tint_if_close(nodata, nearest)
}

/// Brews every cell of the grid against the grid-wide range.
pub fn process(grid: &Grid, spectrum: &Spectrum, nodata: Color) -> Result<Heatmap> {
    if grid.width() == 0 {
        bail!("No values to draw");
    }
    let range = grid.range();
    info!("Color values {} to {}", range.min(), range.max());
    let nodata = nodata_color(nodata, spectrum);
    debug!("Cells without data are drawn as {}", nodata);

    let rows = grid
        .rows()
        .par_iter()
        .map(|row| {
            row.iter()
                .map(|&v| spectrum.brew(v, range).map(|c| c.unwrap_or(nodata)))
                .collect::<std::result::Result<Vec<Color>, BrewError>>()
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let pixels: Vec<u8> = rows
        .into_iter()
        .flatten()
        .flat_map(|color| ArrayVec::from(color.to_rgb()).into_iter())
        .collect();

    info!("Img data {}x{}", grid.width(), grid.height());
    Ok(Heatmap {
        width: grid.width(),
        height: grid.height(),
        range,
        pixels,
    })
}

fn legend(width: usize, spectrum: &Spectrum, imgdata: &mut Vec<u8>) -> Result<()> {
    let band: Vec<u8> = spectrum
        .gradient(width)?
        .into_iter()
        .flat_map(|color| ArrayVec::from(color.to_rgb()).into_iter())
        .collect();
    for _ in 0..LEGEND_HEIGHT {
        imgdata.extend_from_slice(&band);
    }
    Ok(())
}

/// Lays out the final image: the legend band followed by the heatmap rows.
pub fn create_image(heatmap: Heatmap, spectrum: &Spectrum) -> Result<(usize, Vec<u8>)> {
    info!("Raw {}x{}", heatmap.width, heatmap.height);
    let height = heatmap.height + LEGEND_HEIGHT;
    let mut imgdata: Vec<u8> = Vec::with_capacity(heatmap.width * height * 3);
    legend(heatmap.width, spectrum, &mut imgdata)?;
    imgdata.extend(heatmap.pixels);
    debug_assert_eq!(imgdata.len(), heatmap.width * height * 3);
    Ok((height, imgdata))
}

pub fn save_image(
    width: usize,
    height: usize,
    imgdata: &[u8],
    dest: &Path,
    format: ImageFormat,
) -> Result<()> {
    info!("Saving {} {}x{}", dest.display(), width, height);
    match format {
        ImageFormat::Png => {
            let f = File::create(dest)
                .with_context(|| format!("Could not create {}", dest.display()))?;
            PngEncoder::new(f)
                .encode(imgdata, width as u32, height as u32, image::ColorType::Rgb8)
                .with_context(|| format!("Could not encode {}", dest.display()))?;
        }
        ImageFormat::Webp => {
            let encoded =
                webp::Encoder::new(imgdata, webp::PixelLayout::Rgb, width as u32, height as u32)
                    .encode_lossless();
            std::fs::write(dest, &*encoded)
                .with_context(|| format!("Could not write {}", dest.display()))?;
        }
    }
    Ok(())
}

/// Reads values from `path`, draws them and writes the image next to the input.
pub fn render<P: AsRef<Path>>(path: P, options: &Options) -> Result<PathBuf> {
    let path = path.as_ref();
    info!("Loading: {}", path.display());
    let grid = read_grid(open_file(path)?, options.skip)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let heatmap = process(&grid, &options.spectrum, options.nodata)?;
    let width = heatmap.width;
    let (height, imgdata) = create_image(heatmap, &options.spectrum)?;

    let mut dest = path.to_path_buf();
    // data.csv.gz -> data.png
    if dest.extension() == Some(OsStr::new("gz")) {
        dest.set_extension("");
    }
    dest.set_extension(options.format.extension());
    save_image(width, height, &imgdata, &dest, options.format)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use crate::*;
    use pretty_assertions::assert_eq;
    use test_generator::test_resources;

    fn grid(text: &str) -> Grid {
        read_grid(text.as_bytes(), 0).unwrap()
    }

    #[test]
    fn reads_nan_and_pads() {
        let g = grid("1, 2, 3\n4, nan\n-nan, 6, 7\n");
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert!(g.rows()[1][1].is_nan());
        assert!(g.rows()[1][2].is_nan());
        assert!(g.rows()[2][0].is_nan());
        assert_eq!(g.range(), Range::new(1.0, 7.0));
    }

    #[test]
    fn skips_label_columns() {
        let g = read_grid("2024-01-01, 10:00, 5, 10\n2024-01-01, 10:01, 0, 20\n".as_bytes(), 2)
            .unwrap();
        assert_eq!(g.rows(), &[vec![5.0, 10.0], vec![0.0, 20.0]]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(read_grid("1, banana\n".as_bytes(), 0).is_err());
    }

    #[test]
    fn process_two_by_two() {
        let g = grid("0, 10\nnan, 5\n");
        let spectrum = Spectrum::new(vec![Color::new(0, 0, 255), Color::new(255, 0, 0)]);
        let heatmap = process(&g, &spectrum, Color::new(0, 255, 0)).unwrap();
        assert_eq!((heatmap.width, heatmap.height), (2, 2));
        assert_eq!(heatmap.range, Range::new(0.0, 10.0));
        assert_eq!(
            heatmap.pixels,
            vec![0, 0, 255, 255, 0, 0, 0, 255, 0, 127, 0, 127]
        );
    }

    #[test]
    fn process_needs_spectrum() {
        let g = grid("1, 2\n");
        assert!(process(&g, &Spectrum::default(), Color::BLACK).is_err());
        assert!(process(&grid(""), &Preset::Heat.spectrum(), Color::BLACK).is_err());
    }

    #[test]
    fn nodata_moves_away_from_spectrum_end() {
        let spectrum = Preset::Grayscale.spectrum();
        let adjusted = nodata_color(Color::BLACK, &spectrum);
        assert!(adjusted.luminance() > 0.3);
        let red = Color::new(255, 0, 0);
        assert_eq!(nodata_color(red, &spectrum), red);
    }

    #[test]
    fn nodata_ignores_inner_stops() {
        let mid = Color::new(128, 128, 128);
        let spectrum = Spectrum::new(vec![Color::BLACK, mid, Color::WHITE]);
        assert_eq!(nodata_color(mid, &spectrum), mid);
        let near_white = Color::new(250, 250, 250);
        assert_eq!(nodata_color(near_white, &spectrum), Color::new(150, 150, 150));
    }

    #[test]
    fn image_has_legend() {
        let g = grid("0, 1, 2, 3\n");
        let spectrum = Preset::Grayscale.spectrum();
        let heatmap = process(&g, &spectrum, Color::BLACK).unwrap();
        let (height, data) = create_image(heatmap, &spectrum).unwrap();
        assert_eq!(height, LEGEND_HEIGHT + 1);
        assert_eq!(data.len(), 4 * height * 3);
        assert_eq!(&data[..3], &[0, 0, 0]);
        assert_eq!(&data[9..12], &[255, 255, 255]);
    }

    #[test_resources("samples/*.csv*")]
    fn samples_render_in_memory(path: &str) {
        // rtl_power rows start with date, time, low, high, step and sample count
        let skip = if path.contains("rtl_power") { 6 } else { 0 };
        let grid = read_grid(open_file(path).unwrap(), skip).unwrap();
        assert!(!grid.range().is_empty());
        for preset in &[Preset::Default, Preset::Heat, Preset::Grayscale] {
            let spectrum = preset.spectrum();
            let heatmap = process(&grid, &spectrum, Color::BLACK).unwrap();
            assert_eq!(heatmap.pixels.len(), grid.width() * grid.height() * 3);
            let (height, data) = create_image(heatmap, &spectrum).unwrap();
            assert_eq!(data.len(), grid.width() * height * 3);
        }
    }

    #[test_resources("samples/*.csv*")]
    fn complete(path: &str) {
        let source = std::path::Path::new(path);
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(source.file_name().unwrap());
        std::fs::copy(source, &input).unwrap();
        let stem = input.file_name().unwrap().to_string_lossy();
        let stem = stem.trim_end_matches(".gz").trim_end_matches(".csv").to_string();

        for format in &[ImageFormat::Png, ImageFormat::Webp] {
            let options = Options {
                skip: if path.contains("rtl_power") { 6 } else { 0 },
                format: *format,
                ..Options::default()
            };
            let dest = render(&input, &options).unwrap();
            assert_eq!(dest, dir.path().join(format!("{}.{}", stem, format.extension())));
            assert!(std::fs::metadata(&dest).unwrap().len() > 0);
        }
    }

    #[test]
    fn rtl_power_sample() {
        let grid = read_grid(open_file("samples/rtl_power_46M.csv.gz").unwrap(), 6).unwrap();
        assert_eq!((grid.width(), grid.height()), (24, 20));
        assert!(grid.rows()[7][20].is_nan());
        assert!(grid.rows()[0][0].is_nan());
        let range = grid.range();
        assert!(range.min() >= -55.0 && range.max() <= -5.0);
    }

    #[test]
    fn webp_new_image() {
        let size = (*webp::Encoder::new(&[0, 0, 0], webp::PixelLayout::Rgb, 1, 1)
            .encode_lossless())
        .len();
        assert_ne!(0, size);
    }
}
