//! Luminance based adjustments that keep text and fills legible.
//!
//! Everything here is a pure function of its arguments. [`ColorContrast`]
//! only carries the background color that other colors are contrasted with.

use crate::colors::Color;

/// Smallest luminance gap at which two colors count as contrasting.
pub const TOLERANCE: f64 = 0.5;
pub const DEFAULT_SHADE_LUMINANCE: f64 = 0.5;
pub const DEFAULT_TINT_LUMINANCE: f64 = 0.75;
pub const DEFAULT_SHADE_OR_TINT: f64 = 0.2;
pub const DEFAULT_CLOSENESS: f64 = 0.1;

/// Alpha at or below which a color is too faint to count as dark.
const FAINT_ALPHA: u8 = 32;

/// Luminance below one half, unless the color is close to transparent.
///
/// Black at alpha 32 is an eighth as opaque as solid black and reads as a
/// light gray on most backgrounds.
pub fn is_dark(color: Color) -> bool {
    color.alpha > FAINT_ALPHA && color.luminance() < 0.5
}

pub fn is_light(color: Color) -> bool {
    !is_dark(color)
}

/// Darkens `color` one lightness step at a time until its luminance is at most
/// `min_luminance` (clamped to `0.0..=1.0`) or it cannot get any darker.
pub fn shade(mut color: Color, min_luminance: f64) -> Color {
    let target = min_luminance.clamp(0.0, 1.0);
    let mut level = 100;
    while color.luminance() > target && level > 0 {
        level -= 1;
        color = color.change_lightness(level);
    }
    color
}

/// Lightens `color` one step at a time until its luminance reaches
/// `max_luminance`, which is capped at 0.5.
pub fn tint(mut color: Color, max_luminance: f64) -> Color {
    let target = max_luminance.clamp(0.0, 0.5);
    let mut level = 100;
    while color.luminance() < target && level < 200 {
        level += 1;
        color = color.change_lightness(level);
    }
    color
}

fn lightness_step(amount: f64) -> i32 {
    ((amount * 100.0) as i32).clamp(0, 100)
}

/// Lightens a dark color or darkens a light one by `amount` (`0.0..=1.0`).
///
/// Black comes back as a dark gray and white as an eggshell.
pub fn shade_or_tint(color: Color, amount: f64) -> Color {
    let step = lightness_step(amount);
    if is_dark(color) {
        color.change_lightness(100 + step)
    } else {
        color.change_lightness(100 - step)
    }
}

/// White on dark colors, black on light ones.
pub fn black_or_white_contrast(color: Color) -> Color {
    if is_dark(color) {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

/// Whether the luminance of two colors is within `delta` (clamped to
/// `0.0..=1.0`). A missing color is never close to anything.
pub fn are_colors_close<A, B>(first: A, second: B, delta: f64) -> bool
where
    A: Into<Option<Color>>,
    B: Into<Option<Color>>,
{
    match (first.into(), second.into()) {
        (Some(a), Some(b)) => (a.luminance() - b.luminance()).abs() <= delta.clamp(0.0, 1.0),
        _ => false,
    }
}

/// Nudges `main` away from `secondary` (typically a background) when the two
/// would blend together.
pub fn shade_or_tint_if_close<B: Into<Option<Color>>>(main: Color, secondary: B) -> Color {
    if are_colors_close(main, secondary, DEFAULT_CLOSENESS) {
        shade_or_tint(main, 0.4)
    } else {
        main
    }
}

pub fn change_opacity(color: Color, alpha: u8) -> Color {
    color.with_alpha(alpha)
}

/// Adjusts colors so they stand out against a fixed base (background) color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorContrast {
    base: Color,
}

impl ColorContrast {
    pub fn new(base: Color) -> Self {
        Self { base }
    }

    pub fn base(&self) -> Color {
        self.base
    }

    /// Returns `color` shifted in lightness until its luminance is at least
    /// [`TOLERANCE`] away from the base color's.
    ///
    /// The shift goes away from the base when there is room. When there is
    /// not (near-black text on a dark gray), it goes the other way, across
    /// the base and a full tolerance past it.
    pub fn contrast(&self, color: Color) -> Color {
        let bg = self.base.luminance();
        let fg = color.luminance();
        let needed = TOLERANCE - (bg - fg).abs();
        if needed <= f64::EPSILON {
            return color;
        }
        let level = if bg >= fg {
            if fg - needed >= 0.0 {
                100.0 - needed * 100.0
            } else {
                100.0 + (needed + TOLERANCE) * 100.0
            }
        } else if fg + needed <= 1.0 {
            100.0 + needed * 100.0
        } else {
            100.0 - (needed + TOLERANCE) * 100.0
        };
        color.change_lightness(level as i32)
    }
}

impl Default for ColorContrast {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const DARK_GRAY: Color = Color::new(64, 64, 64);
    const LIGHT_GRAY: Color = Color::new(200, 200, 200);

    #[test]
    fn dark_and_light() {
        assert!(is_dark(Color::BLACK));
        assert!(!is_dark(Color::rgba(0, 0, 0, 20)));
        assert!(!is_dark(Color::rgba(0, 0, 0, 32)));
        assert!(is_dark(Color::rgba(0, 0, 0, 33)));
        assert!(!is_dark(Color::WHITE));
        assert!(is_light(Color::WHITE));
        assert!(is_light(Color::rgba(0, 0, 0, 20)));
    }

    #[test]
    fn black_or_white() {
        assert_eq!(black_or_white_contrast(Color::BLACK), Color::WHITE);
        assert_eq!(black_or_white_contrast(Color::WHITE), Color::BLACK);
        assert_eq!(black_or_white_contrast(Color::new(0, 0, 128)), Color::WHITE);
        assert_eq!(black_or_white_contrast(Color::new(255, 255, 0)), Color::BLACK);
    }

    #[test]
    fn shade_reaches_target() {
        let shaded = shade(Color::WHITE, DEFAULT_SHADE_LUMINANCE);
        assert!(shaded.luminance() <= DEFAULT_SHADE_LUMINANCE);
        assert_eq!(shaded.alpha, 255);
        let darker = shade(Color::WHITE, 0.1);
        assert!(darker.luminance() <= 0.1);
        assert_eq!(shade(Color::WHITE, -3.0), Color::BLACK);
    }

    #[test]
    fn shade_leaves_dark_colors() {
        assert_eq!(shade(DARK_GRAY, DEFAULT_SHADE_LUMINANCE), DARK_GRAY);
        assert_eq!(shade(Color::WHITE, 1.0), Color::WHITE);
    }

    #[test]
    fn tint_is_capped_at_half() {
        let tinted = tint(Color::BLACK, DEFAULT_TINT_LUMINANCE);
        assert!(tinted.luminance() >= 0.5);
        assert!(tinted.luminance() < 0.75);
        assert_eq!(tint(LIGHT_GRAY, DEFAULT_TINT_LUMINANCE), LIGHT_GRAY);
        assert_eq!(tint(DARK_GRAY, 0.0), DARK_GRAY);
    }

    #[test]
    fn shade_or_tint_direction() {
        assert_eq!(shade_or_tint(Color::BLACK, DEFAULT_SHADE_OR_TINT), Color::new(51, 51, 51));
        assert_eq!(shade_or_tint(Color::WHITE, DEFAULT_SHADE_OR_TINT), Color::new(204, 204, 204));
        assert_eq!(shade_or_tint(Color::WHITE, 5.0), Color::BLACK);
        assert_eq!(shade_or_tint(Color::WHITE, -1.0), Color::WHITE);
        let faint = Color::rgba(0, 0, 0, 10);
        assert_eq!(shade_or_tint(faint, 0.4), faint);
    }

    #[test]
    fn closeness() {
        assert!(are_colors_close(Color::WHITE, LIGHT_GRAY, 0.3));
        assert!(!are_colors_close(Color::WHITE, LIGHT_GRAY, DEFAULT_CLOSENESS));
        assert!(are_colors_close(Color::BLACK, Color::WHITE, 7.0));
        assert!(!are_colors_close(Color::BLACK, None::<Color>, 1.0));
        assert!(!are_colors_close(None::<Color>, Some(Color::BLACK), 1.0));
        assert!(!are_colors_close(Color::BLACK, Color::new(1, 0, 0), -1.0));
    }

    #[test]
    fn shade_or_tint_when_close() {
        let bg = Color::new(250, 250, 250);
        assert_eq!(shade_or_tint_if_close(Color::WHITE, bg), Color::new(153, 153, 153));
        assert_eq!(shade_or_tint_if_close(Color::WHITE, Color::BLACK), Color::WHITE);
        assert_eq!(shade_or_tint_if_close(Color::WHITE, None::<Color>), Color::WHITE);
    }

    #[test]
    fn opacity() {
        assert_eq!(change_opacity(LIGHT_GRAY, 7), Color::rgba(200, 200, 200, 7));
    }

    #[test]
    fn contrast_already_enough() {
        let on_white = ColorContrast::default();
        assert_eq!(on_white.contrast(Color::BLACK), Color::BLACK);
        assert_eq!(on_white.contrast(DARK_GRAY), DARK_GRAY);
    }

    #[test]
    fn contrast_at_tolerance_edge() {
        let on_white = ColorContrast::default();
        // 127 gray is just over half a luminance away from white, 128 just under
        let enough = Color::new(127, 127, 127);
        assert_eq!(on_white.contrast(enough), enough);
        assert_eq!(on_white.contrast(Color::new(128, 128, 128)), Color::new(126, 126, 126));
    }

    #[test]
    fn contrast_darkens_on_light_background() {
        let on_white = ColorContrast::new(Color::WHITE);
        // level 100 - 28.4
        assert_eq!(on_white.contrast(LIGHT_GRAY), Color::new(142, 142, 142));
    }

    #[test]
    fn contrast_flips_when_it_cannot_darken() {
        let on_gray = ColorContrast::new(DARK_GRAY);
        // level 100 + 82.7
        assert_eq!(on_gray.contrast(Color::new(20, 20, 20)), Color::new(212, 212, 212));
    }

    #[test]
    fn contrast_lightens_on_dark_background() {
        let on_black = ColorContrast::new(Color::BLACK);
        // level 100 + 24.9
        assert_eq!(on_black.contrast(DARK_GRAY), Color::new(109, 109, 109));
    }

    #[test]
    fn contrast_flips_when_it_cannot_lighten() {
        let on_light = ColorContrast::new(LIGHT_GRAY);
        // level 100 - 80.4
        assert_eq!(on_light.contrast(Color::new(250, 250, 250)), Color::new(47, 47, 47));
    }

    fn colors() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(r, g, b, a)| Color::rgba(r, g, b, a))
    }

    proptest! {
        #[test]
        fn close_to_itself(color in colors(), delta in 0.0f64..10.0) {
            prop_assert!(are_colors_close(color, color, delta));
        }

        #[test]
        fn light_is_not_dark(color in colors()) {
            prop_assert_ne!(is_dark(color), is_light(color));
        }

        #[test]
        fn shade_never_lightens(color in colors(), target in -1.0f64..2.0) {
            let shaded = shade(color, target);
            prop_assert!(shaded.luminance() <= color.luminance() + 1e-9);
            prop_assert_eq!(shaded.alpha, color.alpha);
        }

        #[test]
        fn tint_never_darkens(color in colors(), target in -1.0f64..2.0) {
            let tinted = tint(color, target);
            prop_assert!(tinted.luminance() + 1e-9 >= color.luminance());
            prop_assert_eq!(tinted.alpha, color.alpha);
        }

        #[test]
        fn contrast_keeps_alpha(base in colors(), color in colors()) {
            prop_assert_eq!(ColorContrast::new(base).contrast(color).alpha, color.alpha);
        }
    }
}
