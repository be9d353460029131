//! Atlas text parsing
//!
//! Turns the line-oriented atlas format into blocks of key/value pairs.
//! A bare line (no colon) names a page when none is open and a region
//! otherwise; `key: value` lines belong to the most recent name; a blank
//! line closes the current page.

use std::f32::consts::FRAC_PI_2;

use rustc_hash::FxHashMap;

use super::atlas_data::{FrameInfo, Lrtb};
use super::error::{AtlasError, AtlasResult};
use crate::texture::TextureFilter;

/// Key/value pairs of one page or region
#[derive(Debug, Clone, Default)]
pub struct KvBlock {
    pub name: String,
    pub line: usize,
    pub values: FxHashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct PageBlock {
    pub page: KvBlock,
    pub regions: Vec<KvBlock>,
}

/// Split atlas text into page blocks, rejecting duplicate keys
pub fn parse_blocks(text: &str) -> AtlasResult<Vec<PageBlock>> {
    let mut pages: Vec<PageBlock> = Vec::new();
    let mut open = false;

    for (i, raw) in text.lines().enumerate() {
        let line_number = i + 1;
        let line = raw.trim();

        if line.is_empty() {
            open = false;
            continue;
        }

        let Some(colon) = line.find(':') else {
            let block = KvBlock {
                name: line.to_string(),
                line: line_number,
                values: FxHashMap::default(),
            };
            if open {
                if let Some(page) = pages.last_mut() {
                    page.regions.push(block);
                    continue;
                }
            }
            pages.push(PageBlock {
                page: block,
                regions: Vec::new(),
            });
            open = true;
            continue;
        };

        let key = line[..colon].trim();
        let value = line[colon + 1..].trim();

        let target = match pages.last_mut() {
            Some(page) if open => page.regions.last_mut().unwrap_or(&mut page.page),
            _ => {
                return Err(AtlasError::KeyOutsideBlock {
                    key: key.to_string(),
                    line: line_number,
                })
            }
        };

        if target.values.contains_key(key) {
            return Err(AtlasError::DuplicateKey {
                block: target.name.clone(),
                key: key.to_string(),
                line: line_number,
            });
        }
        target.values.insert(key.to_string(), value.to_string());
    }

    Ok(pages)
}

pub fn get_str<'a>(block: &'a KvBlock, key: &str) -> Option<&'a str> {
    block.values.get(key).map(String::as_str)
}

/// Comma separated integers. `None` when the key is absent or empty.
pub fn get_ints(block: &KvBlock, key: &str) -> AtlasResult<Option<Vec<i32>>> {
    let Some(value) = get_str(block, key) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(None);
    }

    value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| invalid_number(block, key, value))
        })
        .collect::<AtlasResult<Vec<_>>>()
        .map(Some)
}

pub fn get_int(block: &KvBlock, key: &str) -> AtlasResult<Option<i64>> {
    match get_str(block, key) {
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid_number(block, key, value)),
        None => Ok(None),
    }
}

/// `true`/`false` in any case, or an integer (non-zero is true).
/// Anything else falls back to `default`.
pub fn get_bool(block: &KvBlock, key: &str, default: bool) -> bool {
    let Some(value) = get_str(block, key) else {
        return default;
    };
    let value = value.to_lowercase();
    match value.as_str() {
        "true" => true,
        "false" => false,
        other => other.parse::<i64>().map(|n| n != 0).unwrap_or(default),
    }
}

/// Up to four integers read as left, right, top, bottom
pub fn get_lrtb(block: &KvBlock, key: &str) -> AtlasResult<Option<Lrtb>> {
    Ok(get_ints(block, key)?.map(|d| Lrtb {
        left: d.first().copied().unwrap_or(0),
        right: d.get(1).copied().unwrap_or(0),
        top: d.get(2).copied().unwrap_or(0),
        bottom: d.get(3).copied().unwrap_or(0),
    }))
}

fn invalid_number(block: &KvBlock, key: &str, value: &str) -> AtlasError {
    AtlasError::InvalidNumber {
        block: block.name.clone(),
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Parse one filter token. Case and whitespace are ignored; empty means
/// nearest.
pub fn parse_filter(token: &str) -> AtlasResult<TextureFilter> {
    let normalized: String = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    match normalized.as_str() {
        "" | "nearest" => Ok(TextureFilter::Nearest),
        "linear" => Ok(TextureFilter::Linear),
        "mipmap" | "mipmaplinearlinear" => Ok(TextureFilter::LinearMipmapLinear),
        "mipmapnearestnearest" => Ok(TextureFilter::NearestMipmapNearest),
        "mipmaplinearnearest" => Ok(TextureFilter::LinearMipmapNearest),
        "mipmapnearestlinear" => Ok(TextureFilter::NearestMipmapLinear),
        _ => Err(AtlasError::UnknownFilter {
            value: token.trim().to_string(),
        }),
    }
}

/// Parse a `filter` value into (min, mag). A single token sets both.
pub fn parse_filters(value: &str) -> AtlasResult<(TextureFilter, TextureFilter)> {
    let tokens: Vec<&str> = value.split(',').collect();
    let min = parse_filter(tokens.first().copied().unwrap_or(""))?;
    let mag = parse_filter(tokens.last().copied().unwrap_or(""))?;
    Ok((min, mag))
}

/// `true` is a quarter turn, a number is degrees, anything else is zero.
/// Returns radians.
pub fn parse_rotation(value: &str) -> f32 {
    let value = value.trim().to_lowercase();
    if value == "true" {
        return FRAC_PI_2;
    }
    value
        .parse::<f64>()
        .map(|degrees| degrees.to_radians() as f32)
        .unwrap_or(0.0)
}

/// Remove a `.png`, `.gif` or `.jpg` extension (any case)
pub fn strip_ext(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => {
            let ext = name[dot + 1..].to_lowercase();
            if matches!(ext.as_str(), "png" | "gif" | "jpg") {
                &name[..dot]
            } else {
                name
            }
        }
        None => name,
    }
}

/// Split a trailing run of digits off a region name.
///
/// `"walk07"` becomes `walk` with index 7. Separators (`/`, `\`, space)
/// left at either end are trimmed. A digit run too long for `u64`
/// saturates.
pub fn frame_info(name: &str) -> FrameInfo {
    let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &name[stem.len()..];

    let index = if digits.is_empty() {
        None
    } else {
        Some(digits.parse::<u64>().unwrap_or(u64::MAX))
    };

    let separators: &[char] = &['/', '\\', ' '];
    FrameInfo {
        original_name: name.to_string(),
        name: stem.trim_matches(separators).to_string(),
        index,
    }
}
