use super::named::NamedColor;
use super::Spectrum;
use crate::colors::Color;
use clap::arg_enum;

arg_enum! {
    /// Ready-made spectra for the renderer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Preset {
        Default,
        Heat,
        Grayscale,
    }
}

impl Preset {
    pub fn spectrum(self) -> Spectrum {
        match self {
            // rtl_power style: low signal dark blue, strong signal yellow
            Preset::Default => Spectrum::new(vec![Color::new(0, 0, 50), Color::new(255, 255, 50)]),
            Preset::Heat => Spectrum::new(vec![
                NamedColor::Blue.color(),
                Color::new(0, 200, 240),
                NamedColor::Red.color(),
            ]),
            Preset::Grayscale => Spectrum::new(vec![Color::BLACK, Color::WHITE]),
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Preset::Default
    }
}
