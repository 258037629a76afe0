// Startup configuration for the particle field: how many particles,
// which colors they may take, and how far their glow spreads

use crate::color::Color;

pub const DEFAULT_PARTICLE_COUNT: usize = 70;
pub const DEFAULT_PALETTE: [&str; 4] = ["#8b0000", "#ff4444", "#3b2f2f", "#b30000"];
pub const DEFAULT_GLOW_BLUR: f64 = 6.0;

/// Non-empty set of colors particles are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Palette, String> {
        if colors.is_empty() {
            return Err(String::from("Palette needs at least one color"));
        }
        Ok(Palette { colors })
    }

    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> Result<Palette, String> {
        let colors = hexes
            .iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    // Never empty, kept for clippy's len_without_is_empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| Color::from_hex(hex).ok())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub palette: Palette,
    pub glow_blur: f64,
}

impl FieldConfig {
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_glow_blur(mut self, glow_blur: f64) -> Result<Self, String> {
        if !(glow_blur >= 0.0) {
            return Err(format!("Glow blur must be non-negative, got {}", glow_blur));
        }
        self.glow_blur = glow_blur;
        Ok(self)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: DEFAULT_PARTICLE_COUNT,
            palette: Palette::default(),
            glow_blur: DEFAULT_GLOW_BLUR,
        }
    }
}
