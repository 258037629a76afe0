// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a css hex string

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Accepts "#rrggbb" or "#rrggbbaa", leading '#' optional
    pub fn from_hex(hex: &str) -> Result<Color, String> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color '{}'", hex));
        }
        let packed = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map(|rgb| (rgb << 8) | 0xff),
            8 => u32::from_str_radix(digits, 16),
            _ => return Err(format!("Invalid hex color '{}'", hex)),
        };
        packed
            .map(Color::from_u32)
            .map_err(|_| format!("Invalid hex color '{}'", hex))
    }

    // Css representation for fillStyle / shadowColor
    pub fn to_css(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}
