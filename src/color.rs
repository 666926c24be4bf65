/// Opaque RGB triple, 8 bits per channel. The only color representation the
/// renderer knows about: drawing is always an opaque overwrite (last draw
/// wins, no blending), so there is no alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

// Figure palette, compiled in. Callers pick from these by name rather than
// passing runtime configuration.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const INK: Rgb = Rgb::new(34, 34, 34);
pub const GREY: Rgb = Rgb::new(210, 210, 210);
pub const DARK_GREY: Rgb = Rgb::new(120, 120, 120);
pub const ACCENT: Rgb = Rgb::new(180, 210, 250);
pub const BOX_FILL: Rgb = Rgb::new(235, 242, 255);
