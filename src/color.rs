use std::fmt;

use serde::{de::Visitor, Deserialize};

/// Straight-alpha 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const RED: Self = Self::new(0xff, 0x00, 0x00, 0xff);
    pub const BLUE: Self = Self::new(0x00, 0x00, 0xff, 0xff);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a `0xRRGGBBAA` integer.
    pub const fn from_packed(rgba: u32) -> Self {
        let [r, g, b, a] = rgba.to_be_bytes();
        Self { r, g, b, a }
    }

    pub const fn to_packed(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Parses `#rrggbbaa` or `#rrggbb` (the leading `#` is optional; a missing alpha
    /// channel means opaque).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let packed = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            8 => Some(Self::from_packed(packed)),
            6 => Some(Self::from_packed((packed << 8) | 0xff)),
            _ => None,
        }
    }

    /// Normalized `[r, g, b, a]` in `0.0..=1.0`, the layout the renderer consumes.
    pub fn to_f32(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.to_packed())
    }
}

impl<'a> Deserialize<'a> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        struct ColorVisitor;

        impl<'de> Visitor<'de> for ColorVisitor {
            type Value = Rgba8;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a \"#rrggbbaa\" string or a packed 0xRRGGBBAA integer")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Rgba8::from_hex(v).ok_or_else(|| E::custom(format_args!("invalid color '{v}'")))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let packed = u32::try_from(v)
                    .map_err(|_| E::custom(format_args!("packed color {v:#x} out of range")))?;
                Ok(Rgba8::from_packed(packed))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let packed = u32::try_from(v)
                    .map_err(|_| E::custom(format_args!("packed color {v:#x} out of range")))?;
                Ok(Rgba8::from_packed(packed))
            }
        }

        deserializer.deserialize_any(ColorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channels_in_order() {
        let c = Rgba8::from_packed(0x12345678);
        assert_eq!(c, Rgba8::new(0x12, 0x34, 0x56, 0x78));
        assert_eq!(c.to_packed(), 0x12345678);
        assert_eq!(Rgba8::from_packed(0xff0000ff), Rgba8::RED);
    }

    #[test]
    fn parses_hex() {
        assert_eq!(Rgba8::from_hex("#0000ffff"), Some(Rgba8::BLUE));
        assert_eq!(Rgba8::from_hex("ff0000"), Some(Rgba8::RED));
        assert_eq!(Rgba8::from_hex("#ff00"), None);
        assert_eq!(Rgba8::from_hex("#+f0000ff"), None);
        assert_eq!(Rgba8::from_hex("#gg0000ff"), None);
    }

    #[test]
    fn normalizes_to_f32() {
        assert_eq!(Rgba8::RED.to_f32(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(Rgba8::TRANSPARENT.to_f32(), [0.0; 4]);
    }

    #[test]
    fn deserializes_from_string_and_integer() {
        #[derive(Deserialize)]
        struct Doc {
            a: Rgba8,
            b: Rgba8,
        }
        let doc: Doc = toml::from_str("a = \"#0000ffff\"\nb = 0xff0000ff\n").unwrap();
        assert_eq!(doc.a, Rgba8::BLUE);
        assert_eq!(doc.b, Rgba8::RED);
        assert!(toml::from_str::<Doc>("a = \"blue\"\nb = 0\n").is_err());
    }
}
