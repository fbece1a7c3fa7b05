use crate::colors::Color;
use log::*;
use std::fmt;
pub mod named;
pub mod presets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrewError {
    /// The spectrum has fewer than two colors to interpolate between.
    NotInitialized { colors: usize },
}

impl fmt::Display for BrewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrewError::NotInitialized { colors } => write!(
                f,
                "color scale has not been initialized: need at least 2 colors, found {}",
                colors
            ),
        }
    }
}

impl std::error::Error for BrewError {}

/// Minimum and maximum of the finite values in a batch.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The range of no values at all; combining anything into it yields that thing.
    pub fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Skips NaN and infinities.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
    {
        values
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(Range::empty(), Range::combine_f64)
    }

    fn combine_f64(s: Self, v: f64) -> Self {
        Range::combine(s, Range { min: v, max: v })
    }

    pub fn combine(a: Self, b: Self) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Scale a value from between min and max to between 0 and 1.
    ///
    /// A degenerate range (`max <= min`) maps everything to 0. Values outside
    /// the range are not clamped here.
    pub fn normalize(&self, value: f64) -> f64 {
        let width = self.max - self.min;
        if width.is_nan() || width <= 0.0 {
            return 0.0;
        }
        let normalized = (value - self.min) / width;
        if normalized.is_nan() {
            // infinity over an infinitely wide range
            if value > self.min {
                1.0
            } else {
                0.0
            }
        } else {
            normalized
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::new(0.0, 0.0)
    }
}

impl From<(f64, f64)> for Range {
    fn from((min, max): (f64, f64)) -> Self {
        Range::new(min, max)
    }
}

/// Ordered color stops. The first maps to a range's minimum, the last to its maximum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Spectrum {
    colors: Vec<Color>,
}

impl Spectrum {
    pub fn new<I: IntoIterator<Item = Color>>(colors: I) -> Self {
        Self {
            colors: colors.into_iter().collect(),
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    fn check(&self) -> Result<(), BrewError> {
        if self.colors.len() < 2 {
            return Err(BrewError::NotInitialized {
                colors: self.colors.len(),
            });
        }
        Ok(())
    }

    /// Places `value` on the scale spanned by `range` and returns the color there.
    ///
    /// NaN is "no data" and yields `Ok(None)` whatever the spectrum holds.
    /// Values at or beyond either end of the range get that end's color.
    /// Alpha is not interpolated; brewed colors are always opaque.
    pub fn brew(&self, value: f64, range: Range) -> Result<Option<Color>, BrewError> {
        if value.is_nan() {
            return Ok(None);
        }
        self.check()?;

        let last = self.colors.len() - 1;
        let normalized = range.normalize(value);
        let (idx1, idx2, fract) = if normalized <= f64::EPSILON {
            if normalized < 0.0 {
                trace!("{} is below {}, using the first color", value, range.min);
            }
            (0, 0, 0.0)
        } else if normalized >= 1.0 - f64::EPSILON {
            if normalized > 1.0 {
                trace!("{} is above {}, using the last color", value, range.max);
            }
            (last, last, 0.0)
        } else {
            let scaled = normalized * last as f64;
            let idx1 = (scaled.floor() as usize).min(last - 1);
            (idx1, idx1 + 1, scaled - idx1 as f64)
        };

        let (from, to) = (self.colors[idx1], self.colors[idx2]);
        let blend = |a: u8, b: u8| -> u8 {
            ((f64::from(b) - f64::from(a)) * fract + f64::from(a)) as u8
        };
        Ok(Some(Color::new(
            blend(from.red, to.red),
            blend(from.green, to.green),
            blend(from.blue, to.blue),
        )))
    }

    /// Brews every value against the range of the batch's own finite values.
    ///
    /// The output lines up index for index with `values`.
    pub fn brew_many(&self, values: &[f64]) -> Result<(Range, Vec<Option<Color>>), BrewError> {
        self.check()?;
        let range = Range::from_values(values);
        debug!("Brewing {} values over {} to {}", values.len(), range.min, range.max);
        let colors = values
            .iter()
            .map(|&v| self.brew(v, range))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((range, colors))
    }

    /// `steps` colors evenly spaced from the first stop to the last.
    pub fn gradient(&self, steps: usize) -> Result<Vec<Color>, BrewError> {
        self.check()?;
        let range = Range::new(0.0, steps.saturating_sub(1) as f64);
        (0..steps)
            .map(|i| {
                self.brew(i as f64, range)
                    .map(|c| c.unwrap_or(self.colors[0]))
            })
            .collect()
    }
}

impl From<Vec<Color>> for Spectrum {
    fn from(colors: Vec<Color>) -> Self {
        Self { colors }
    }
}

/// A spectrum paired with the range of the last batch brewed through it.
///
/// Single values passed to [`ColorBrewer::brew_one`] are placed relative to
/// that range, so brew a batch first.
#[derive(Debug, Clone, Default)]
pub struct ColorBrewer {
    spectrum: Spectrum,
    range: Range,
}

impl ColorBrewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the spectrum. Fewer than two colors is accepted here but
    /// brewing will fail.
    pub fn set_scale<I: IntoIterator<Item = Color>>(&mut self, colors: I) {
        self.spectrum = Spectrum::new(colors);
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    pub fn brew_many(&mut self, values: &[f64]) -> Result<Vec<Option<Color>>, BrewError> {
        let (range, colors) = self.spectrum.brew_many(values)?;
        self.range = range;
        Ok(colors)
    }

    pub fn brew_one(&self, value: f64) -> Result<Option<Color>, BrewError> {
        self.spectrum.brew(value, self.range)
    }

    /// Range from the last call to [`ColorBrewer::brew_many`].
    pub fn range(&self) -> Range {
        self.range
    }
}
