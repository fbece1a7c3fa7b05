//! A fixed table of named colors, for building spectra by name.
use crate::colors::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Amber,
    Aqua,
    Azure,
    Beige,
    Black,
    Blue,
    Brown,
    Burgundy,
    Charcoal,
    Chocolate,
    Coral,
    Cream,
    Crimson,
    DarkGray,
    Denim,
    Emerald,
    ForestGreen,
    Gold,
    Gray,
    Green,
    Indigo,
    Ivory,
    Jade,
    Khaki,
    Lavender,
    LightGray,
    Lime,
    Magenta,
    Maroon,
    Mint,
    Olive,
    Orange,
    Orchid,
    Peach,
    Pink,
    Plum,
    Purple,
    Red,
    RoyalBlue,
    Ruby,
    Rust,
    Salmon,
    Sand,
    Sapphire,
    Scarlet,
    SeaGreen,
    Silver,
    SkyBlue,
    SteelBlue,
    Tan,
    Teal,
    Tomato,
    Turquoise,
    Violet,
    Wheat,
    White,
    Yellow,
}

/// Name and `#RRGGBB` value, in the same order as [`NamedColor`].
const TABLE: [(&str, &str); 57] = [
    ("Amber", "#FFBF00"),
    ("Aqua", "#00FFFF"),
    ("Azure", "#007FFF"),
    ("Beige", "#F5F5DC"),
    ("Black", "#000000"),
    ("Blue", "#0000FF"),
    ("Brown", "#A52A2A"),
    ("Burgundy", "#800020"),
    ("Charcoal", "#36454F"),
    ("Chocolate", "#D2691E"),
    ("Coral", "#FF7F50"),
    ("Cream", "#FFFDD0"),
    ("Crimson", "#DC143C"),
    ("DarkGray", "#A9A9A9"),
    ("Denim", "#1560BD"),
    ("Emerald", "#50C878"),
    ("ForestGreen", "#228B22"),
    ("Gold", "#FFD700"),
    ("Gray", "#808080"),
    ("Green", "#00FF00"),
    ("Indigo", "#4B0082"),
    ("Ivory", "#FFFFF0"),
    ("Jade", "#00A86B"),
    ("Khaki", "#C3B091"),
    ("Lavender", "#E6E6FA"),
    ("LightGray", "#D3D3D3"),
    ("Lime", "#BFFF00"),
    ("Magenta", "#FF00FF"),
    ("Maroon", "#800000"),
    ("Mint", "#3EB489"),
    ("Olive", "#808000"),
    ("Orange", "#FFA500"),
    ("Orchid", "#DA70D6"),
    ("Peach", "#FFE5B4"),
    ("Pink", "#FFC0CB"),
    ("Plum", "#DDA0DD"),
    ("Purple", "#800080"),
    ("Red", "#FF0000"),
    ("RoyalBlue", "#4169E1"),
    ("Ruby", "#E0115F"),
    ("Rust", "#B7410E"),
    ("Salmon", "#FF8C69"),
    ("Sand", "#C2B280"),
    ("Sapphire", "#0F52BA"),
    ("Scarlet", "#FF2400"),
    ("SeaGreen", "#2E8B57"),
    ("Silver", "#C0C0C0"),
    ("SkyBlue", "#87CEEB"),
    ("SteelBlue", "#4682B4"),
    ("Tan", "#D2B48C"),
    ("Teal", "#008080"),
    ("Tomato", "#FF6347"),
    ("Turquoise", "#30D5C8"),
    ("Violet", "#EE82EE"),
    ("Wheat", "#F5DEB3"),
    ("White", "#FFFFFF"),
    ("Yellow", "#FFFF00"),
];

impl NamedColor {
    pub const ALL: [NamedColor; 57] = [
        NamedColor::Amber,
        NamedColor::Aqua,
        NamedColor::Azure,
        NamedColor::Beige,
        NamedColor::Black,
        NamedColor::Blue,
        NamedColor::Brown,
        NamedColor::Burgundy,
        NamedColor::Charcoal,
        NamedColor::Chocolate,
        NamedColor::Coral,
        NamedColor::Cream,
        NamedColor::Crimson,
        NamedColor::DarkGray,
        NamedColor::Denim,
        NamedColor::Emerald,
        NamedColor::ForestGreen,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::Green,
        NamedColor::Indigo,
        NamedColor::Ivory,
        NamedColor::Jade,
        NamedColor::Khaki,
        NamedColor::Lavender,
        NamedColor::LightGray,
        NamedColor::Lime,
        NamedColor::Magenta,
        NamedColor::Maroon,
        NamedColor::Mint,
        NamedColor::Olive,
        NamedColor::Orange,
        NamedColor::Orchid,
        NamedColor::Peach,
        NamedColor::Pink,
        NamedColor::Plum,
        NamedColor::Purple,
        NamedColor::Red,
        NamedColor::RoyalBlue,
        NamedColor::Ruby,
        NamedColor::Rust,
        NamedColor::Salmon,
        NamedColor::Sand,
        NamedColor::Sapphire,
        NamedColor::Scarlet,
        NamedColor::SeaGreen,
        NamedColor::Silver,
        NamedColor::SkyBlue,
        NamedColor::SteelBlue,
        NamedColor::Tan,
        NamedColor::Teal,
        NamedColor::Tomato,
        NamedColor::Turquoise,
        NamedColor::Violet,
        NamedColor::Wheat,
        NamedColor::White,
        NamedColor::Yellow,
    ];

    pub fn name(self) -> &'static str {
        TABLE[self as usize].0
    }

    pub fn color(self) -> Color {
        let hex = TABLE[self as usize].1;
        // the table only holds well formed literals
        hex.parse().unwrap_or(Color::BLACK)
    }

    pub fn with_opacity(self, alpha: u8) -> Color {
        self.color().with_alpha(alpha)
    }

    /// Case-insensitive; spaces, dashes and underscores are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|named| named.name().eq_ignore_ascii_case(&wanted))
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        named.color()
    }
}
