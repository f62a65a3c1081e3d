//! Parser for the BMFont text descriptor format (`.fnt`).
//! - One record per line: a tag keyword followed by `key=value` attributes
//! - Values are bare tokens (`12`, `1,1,1,1`) or double-quoted strings
//! - Unknown tags and keys are skipped; repeated ids overwrite earlier ones
//! - `chars count=` / `kernings count=` are informational only

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info, trace, warn};
use thiserror::Error;

use super::types::{Channel, ChannelInfo, Char, CharPair, Descriptor, Kerning, Page};
use crate::config::DEFAULT_SOURCE_TAG;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{source_tag}: cannot read font descriptor: {error}")]
    SourceUnavailable {
        source_tag: String,
        #[source]
        error: io::Error,
    },
    #[error("{source_tag}:{line}: malformed value {value:?} for '{key}' in '{record}' record: {reason}")]
    MalformedValue {
        source_tag: String,
        line: usize,
        record: String,
        key: String,
        value: String,
        reason: String,
    },
}

/* ======================= ENTRY POINTS ======================= */

/// Loads a descriptor from a `.fnt` file. The referenced page sheets are not
/// touched. Errors are tagged with the file's base name.
pub fn load_descriptor(path: impl AsRef<Path>) -> Result<Descriptor, ParseError> {
    let path = path.as_ref();
    let source_tag = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    info!("Loading font descriptor: {:?}", path);

    let file = File::open(path).map_err(|error| ParseError::SourceUnavailable {
        source_tag: source_tag.clone(),
        error,
    })?;
    parse(&source_tag, BufReader::new(file))
}

/// Parses descriptor text from any reader, tagging errors with `"bmfont"`.
pub fn read_descriptor(reader: impl Read) -> Result<Descriptor, ParseError> {
    parse(DEFAULT_SOURCE_TAG, BufReader::new(reader))
}

impl FromStr for Descriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(DEFAULT_SOURCE_TAG, s.as_bytes())
    }
}

/// Parses a descriptor in one pass over `reader`. `source_tag` names the
/// input in error messages (usually the file name).
///
/// Non-UTF-8 bytes (face names written in a legacy code page) are decoded
/// lossily instead of failing the parse.
pub fn parse(source_tag: &str, mut reader: impl BufRead) -> Result<Descriptor, ParseError> {
    let mut desc = Descriptor::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|error| ParseError::SourceUnavailable {
                source_tag: source_tag.to_string(),
                error,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let text: &str = if line_no == 1 { strip_bom(&line) } else { &line };

        let Some((tag, rest)) = split_tag(text) else {
            continue;
        };
        let ctx = LineCtx {
            source_tag,
            line: line_no,
            record: tag,
        };
        let attrs = split_attributes(rest)
            .map_err(|key| ctx.malformed(key, rest, "unterminated quoted string"))?;

        match tag {
            "info" => parse_info(&ctx, &attrs, &mut desc)?,
            "common" => parse_common(&ctx, &attrs, &mut desc)?,
            "page" => {
                let page = parse_page(&ctx, &attrs)?;
                trace!("page {} -> {:?}", page.id, page.file);
                desc.pages.insert(page.id, page);
            }
            "char" => {
                let ch = parse_char(&ctx, &attrs)?;
                trace!("char {} at ({}, {}) {}x{}", ch.id, ch.x, ch.y, ch.width, ch.height);
                desc.chars.insert(ch.id, ch);
            }
            "kerning" => {
                let (pair, kerning) = parse_kerning(&ctx, &attrs)?;
                trace!("kerning {}+{} = {}", pair.first, pair.second, kerning.amount);
                desc.kernings.insert(pair, kerning);
            }
            "chars" | "kernings" => {
                // Declared counts are advisory; records are accumulated as they come.
                debug!("{}:{}: {} {}", source_tag, line_no, tag, rest.trim());
            }
            other => debug!("{}:{}: skipping unknown tag '{}'", source_tag, line_no, other),
        }
    }

    debug!(
        "{}: parsed {} page(s), {} char(s), {} kerning pair(s)",
        source_tag,
        desc.pages.len(),
        desc.chars.len(),
        desc.kernings.len()
    );
    Ok(desc)
}

/* ======================= RECORDS ======================= */

fn parse_info(
    ctx: &LineCtx,
    attrs: &[(&str, &str)],
    desc: &mut Descriptor,
) -> Result<(), ParseError> {
    let info = &mut desc.info;
    for &(key, value) in attrs {
        match key {
            "face" => info.face = value.to_string(),
            "size" => info.size = ctx.int(key, value)?,
            "bold" => info.bold = ctx.flag(key, value)?,
            "italic" => info.italic = ctx.flag(key, value)?,
            "charset" => info.charset = value.to_string(),
            "unicode" => info.unicode = ctx.flag(key, value)?,
            "stretchH" => info.stretch_h = ctx.int(key, value)?,
            "smooth" => info.smooth = ctx.flag(key, value)?,
            "aa" => info.aa = ctx.int(key, value)?,
            "padding" => {
                let [up, right, down, left] = ctx.int_list::<4>(key, value)?;
                info.padding.up = up;
                info.padding.right = right;
                info.padding.down = down;
                info.padding.left = left;
            }
            "spacing" => {
                let [horizontal, vertical] = ctx.int_list::<2>(key, value)?;
                info.spacing.horizontal = horizontal;
                info.spacing.vertical = vertical;
            }
            "outline" => info.outline = ctx.int(key, value)?,
            _ => {}
        }
    }
    debug!("{}:{}: info face={:?} size={}", ctx.source_tag, ctx.line, info.face, info.size);
    Ok(())
}

fn parse_common(
    ctx: &LineCtx,
    attrs: &[(&str, &str)],
    desc: &mut Descriptor,
) -> Result<(), ParseError> {
    let common = &mut desc.common;
    for &(key, value) in attrs {
        match key {
            "lineHeight" => common.line_height = ctx.int(key, value)?,
            "base" => common.base = ctx.int(key, value)?,
            "scaleW" => common.scale_w = ctx.int(key, value)?,
            "scaleH" => common.scale_h = ctx.int(key, value)?,
            // Page count always comes from the page table.
            "pages" => {}
            "packed" => common.packed = ctx.flag(key, value)?,
            // Unknown codes are kept as `ChannelInfo::Other`.
            "alphaChnl" => common.alpha_channel = ChannelInfo::from(ctx.int(key, value)?),
            "redChnl" => common.red_channel = ChannelInfo::from(ctx.int(key, value)?),
            "greenChnl" => common.green_channel = ChannelInfo::from(ctx.int(key, value)?),
            "blueChnl" => common.blue_channel = ChannelInfo::from(ctx.int(key, value)?),
            _ => {}
        }
    }
    debug!(
        "{}:{}: common lineHeight={} base={} scale={}x{}",
        ctx.source_tag, ctx.line, common.line_height, common.base, common.scale_w, common.scale_h
    );
    Ok(())
}

fn parse_page(ctx: &LineCtx, attrs: &[(&str, &str)]) -> Result<Page, ParseError> {
    let mut page = Page::default();
    for &(key, value) in attrs {
        match key {
            "id" => page.id = ctx.int(key, value)?,
            "file" => page.file = value.to_string(),
            _ => {}
        }
    }
    Ok(page)
}

fn parse_char(ctx: &LineCtx, attrs: &[(&str, &str)]) -> Result<Char, ParseError> {
    let mut ch = Char::default();
    for &(key, value) in attrs {
        match key {
            "id" => ch.id = ctx.int(key, value)?,
            "x" => ch.x = ctx.int(key, value)?,
            "y" => ch.y = ctx.int(key, value)?,
            "width" => ch.width = ctx.int(key, value)?,
            "height" => ch.height = ctx.int(key, value)?,
            "xoffset" => ch.x_offset = ctx.int(key, value)?,
            "yoffset" => ch.y_offset = ctx.int(key, value)?,
            "xadvance" => ch.x_advance = ctx.int(key, value)?,
            "page" => ch.page = ctx.int(key, value)?,
            "chnl" => ch.channel = Channel::from_bits_retain(ctx.int(key, value)?),
            _ => {}
        }
    }
    Ok(ch)
}

fn parse_kerning(
    ctx: &LineCtx,
    attrs: &[(&str, &str)],
) -> Result<(CharPair, Kerning), ParseError> {
    let mut pair = CharPair { first: 0, second: 0 };
    let mut kerning = Kerning::default();
    for &(key, value) in attrs {
        match key {
            "first" => pair.first = ctx.int(key, value)?,
            "second" => pair.second = ctx.int(key, value)?,
            "amount" => kerning.amount = ctx.int(key, value)?,
            _ => {}
        }
    }
    Ok((pair, kerning))
}

/* ======================= VALUE DECODING ======================= */

/// Where a value came from, for error reporting.
struct LineCtx<'a> {
    source_tag: &'a str,
    line: usize,
    record: &'a str,
}

impl LineCtx<'_> {
    fn malformed(&self, key: &str, value: &str, reason: impl Into<String>) -> ParseError {
        ParseError::MalformedValue {
            source_tag: self.source_tag.to_string(),
            line: self.line,
            record: self.record.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn int(&self, key: &str, value: &str) -> Result<i32, ParseError> {
        value
            .trim()
            .parse::<i32>()
            .map_err(|e| self.malformed(key, value, format!("expected an integer ({e})")))
    }

    /// `0` is false, any other integer is true.
    #[inline(always)]
    fn flag(&self, key: &str, value: &str) -> Result<bool, ParseError> {
        Ok(self.int(key, value)? != 0)
    }

    fn int_list<const N: usize>(&self, key: &str, value: &str) -> Result<[i32; N], ParseError> {
        let arity = || self.malformed(key, value, format!("expected {N} comma-separated integers"));
        let mut out = [0; N];
        let mut parts = value.split(',');
        for slot in out.iter_mut() {
            let part = parts.next().ok_or_else(&arity)?;
            *slot = self.int(key, part)?;
        }
        if parts.next().is_some() {
            return Err(arity());
        }
        Ok(out)
    }
}

/* ======================= LINE SPLITTING ======================= */

#[inline(always)]
fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{FEFF}').unwrap_or(s)
}

/// Splits a line into its tag keyword and the attribute text after it.
/// Blank lines yield `None`.
#[inline(always)]
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let t = line.trim();
    if t.is_empty() {
        return None;
    }
    Some(t.split_once(char::is_whitespace).unwrap_or((t, "")))
}

/// Splits `key=value key="quoted value" ...` into pairs, borrowing from `s`.
/// Quotes are removed from quoted values. Tokens without `=` are skipped.
/// On an unterminated quote, returns the key whose value was left open.
fn split_attributes(s: &str) -> Result<Vec<(&str, &str)>, &str> {
    let mut out = Vec::new();
    let mut rest = s.trim_start();

    while !rest.is_empty() {
        let key_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let key = &rest[..key_end];
        rest = &rest[key_end..];

        let Some(after_eq) = rest.strip_prefix('=') else {
            warn!("ignoring attribute token without '=': {:?}", key);
            rest = rest.trim_start();
            continue;
        };

        let (value, tail) = if let Some(quoted) = after_eq.strip_prefix('"') {
            let end = quoted.find('"').ok_or(key)?;
            (&quoted[..end], &quoted[end + 1..])
        } else {
            let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
            (&after_eq[..end], &after_eq[end..])
        };

        out.push((key, value));
        rest = tail.trim_start();
    }
    Ok(out)
}
