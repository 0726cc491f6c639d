use std::str::FromStr;

use crate::error::{ColorParseReason, InvalidColorError};

use super::model::Color;
use super::named;

/// Parse a color from a string.
///
/// Accepted notations:
/// * hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (the `#` is optional)
/// * `rgb(r, g, b)` and `rgba(r, g, b, a)`, comma or space separated,
///   with percentage channels and a `/ alpha` suffix
/// * CSS named colors and `transparent`
pub fn parse_color(input: &str) -> Result<Color, InvalidColorError> {
    parse_inner(input).map_err(|reason| {
        log::warn!("rejected color {:?}: {}", input, reason);
        InvalidColorError::new(input, reason)
    })
}

fn parse_inner(input: &str) -> Result<Color, ColorParseReason> {
    use ColorParseReason::*;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Empty);
    }

    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(args) = strip_function(&lower, "rgba").or_else(|| strip_function(&lower, "rgb")) {
        return parse_rgb_function(args);
    }

    if lower == "transparent" {
        return Ok(Color::rgba(0, 0, 0, 0));
    }
    if let Some(rgb) = named::lookup(&lower) {
        return Ok(Color::from(rgb));
    }

    if lower.bytes().all(|b| b.is_ascii_hexdigit()) {
        return parse_hex(&lower);
    }

    Err(UnknownName)
}

fn strip_function<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Result<Color, ColorParseReason> {
    use ColorParseReason::*;

    let nibble = |c: u8| -> Result<u8, ColorParseReason> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(InvalidHex),
        }
    };
    let byte = |hi: u8, lo: u8| -> Result<u8, ColorParseReason> { Ok(nibble(hi)? << 4 | nibble(lo)?) };

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 | 4 => {
            let mut channels = [255u8; 4];
            for (slot, &c) in channels.iter_mut().zip(bytes) {
                *slot = nibble(c)? * 17;
            }
            Ok(Color::from(channels))
        }
        6 | 8 => {
            let mut channels = [255u8; 4];
            for (slot, pair) in channels.iter_mut().zip(bytes.chunks(2)) {
                *slot = byte(pair[0], pair[1])?;
            }
            Ok(Color::from(channels))
        }
        _ => Err(InvalidLength),
    }
}

fn parse_rgb_function(args: &str) -> Result<Color, ColorParseReason> {
    use ColorParseReason::*;

    let parts: Vec<&str> = if args.contains(',') {
        args.split(',').map(str::trim).collect()
    } else {
        args.split(|c: char| c.is_whitespace() || c == '/')
            .filter(|part| !part.is_empty())
            .collect()
    };

    let (channels, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], None),
        [r, g, b, a] => ([*r, *g, *b], Some(*a)),
        _ => return Err(InvalidFunction),
    };

    let mut rgb = [0u8; 3];
    for (slot, channel) in rgb.iter_mut().zip(channels) {
        *slot = parse_channel(channel)?;
    }
    let a = match alpha {
        Some(alpha) => parse_alpha(alpha)?,
        None => 255,
    };

    Ok(Color::rgba(rgb[0], rgb[1], rgb[2], a))
}

fn parse_number(token: &str) -> Result<f64, ColorParseReason> {
    let value = token.parse::<f64>().map_err(|_| ColorParseReason::InvalidFunction)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ColorParseReason::OutOfRange)
    }
}

fn parse_channel(token: &str) -> Result<u8, ColorParseReason> {
    let value = match token.strip_suffix('%') {
        Some(percent) => parse_number(percent)? / 100.0 * 255.0,
        None => parse_number(token)?,
    };
    if !(0.0..=255.0).contains(&value) {
        return Err(ColorParseReason::OutOfRange);
    }
    Ok(value.round() as u8)
}

fn parse_alpha(token: &str) -> Result<u8, ColorParseReason> {
    let value = match token.strip_suffix('%') {
        Some(percent) => parse_number(percent)? / 100.0,
        None => parse_number(token)?,
    };
    if !(0.0..=1.0).contains(&value) {
        return Err(ColorParseReason::OutOfRange);
    }
    Ok((value * 255.0).round() as u8)
}

impl FromStr for Color {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = InvalidColorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_color(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#fff").unwrap(), Color::WHITE);
        assert_eq!(parse_color("#000F").unwrap(), Color::BLACK);
        assert_eq!(parse_color("#F97316").unwrap(), Color::rgb(0xf9, 0x73, 0x16));
        assert_eq!(parse_color("#00000066").unwrap(), Color::rgba(0, 0, 0, 0x66));
        assert_eq!(parse_color("  3b82f6 ").unwrap(), Color::rgb(0x3b, 0x82, 0xf6));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(parse_color("#ffff0").unwrap_err().reason, ColorParseReason::InvalidLength);
        assert_eq!(parse_color("#gggggg").unwrap_err().reason, ColorParseReason::InvalidHex);
    }

    #[test]
    fn test_parse_rgb_functions() {
        assert_eq!(parse_color("rgb(255, 0, 0)").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(parse_color("RGB(0 128 255)").unwrap(), Color::rgb(0, 128, 255));
        assert_eq!(parse_color("rgba(0, 0, 0, 0.4)").unwrap(), Color::rgba(0, 0, 0, 102));
        assert_eq!(parse_color("rgb(100% 0% 50% / 50%)").unwrap(), Color::rgba(255, 0, 128, 128));
    }

    #[test]
    fn test_parse_rgb_function_errors() {
        assert_eq!(parse_color("rgb(256, 0, 0)").unwrap_err().reason, ColorParseReason::OutOfRange);
        assert_eq!(parse_color("rgba(0, 0, 0, 2)").unwrap_err().reason, ColorParseReason::OutOfRange);
        assert_eq!(parse_color("rgb(1, 2)").unwrap_err().reason, ColorParseReason::InvalidFunction);
        assert_eq!(parse_color("rgb(a, b, c)").unwrap_err().reason, ColorParseReason::InvalidFunction);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("White").unwrap(), Color::WHITE);
        assert_eq!(parse_color("rebeccapurple").unwrap(), Color::rgb(0x66, 0x33, 0x99));
        assert_eq!(parse_color("transparent").unwrap().a, 0);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = parse_color("not-a-color").unwrap_err();
        assert_eq!(err.input, "not-a-color");
        assert_eq!(err.reason, ColorParseReason::UnknownName);
        assert_eq!(parse_color("   ").unwrap_err().reason, ColorParseReason::Empty);
    }

    #[test]
    fn test_from_str() {
        let color: Color = "navy".parse().unwrap();
        assert_eq!(color, Color::rgb(0, 0, 0x80));
        assert!(Color::try_from("nope").is_err());
    }
}
