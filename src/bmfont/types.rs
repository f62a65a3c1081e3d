use std::collections::BTreeMap;

use bitflags::bitflags;
use cgmath::Vector2;

/* ======================= INFO ======================= */

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub up: i32,
    pub right: i32,
    pub down: i32,
    pub left: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spacing {
    pub horizontal: i32,
    pub vertical: i32,
}

/// The `info` record: how the font was generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    pub face: String,
    pub size: i32,
    pub bold: bool,
    pub italic: bool,
    pub charset: String,
    pub unicode: bool,
    pub stretch_h: i32, // percent
    pub smooth: bool,
    pub aa: i32, // supersampling level, 1 = none
    pub padding: Padding,
    pub spacing: Spacing,
    pub outline: i32,
}

/* ======================= COMMON ======================= */

/// What a color channel of the page sheets holds. Codes 0-4 are the ones the
/// file format defines for `alphaChnl=` etc.; any other code is kept as
/// `Other` so it is written back unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelInfo {
    #[default]
    Glyph,
    Outline,
    GlyphAndOutline,
    Zero,
    One,
    Other(i32),
}

impl ChannelInfo {
    pub fn code(self) -> i32 {
        match self {
            ChannelInfo::Glyph => 0,
            ChannelInfo::Outline => 1,
            ChannelInfo::GlyphAndOutline => 2,
            ChannelInfo::Zero => 3,
            ChannelInfo::One => 4,
            ChannelInfo::Other(code) => code,
        }
    }
}

impl From<i32> for ChannelInfo {
    fn from(code: i32) -> Self {
        match code {
            0 => ChannelInfo::Glyph,
            1 => ChannelInfo::Outline,
            2 => ChannelInfo::GlyphAndOutline,
            3 => ChannelInfo::Zero,
            4 => ChannelInfo::One,
            other => ChannelInfo::Other(other),
        }
    }
}

/// The `common` record: metrics shared by every glyph plus the page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Common {
    pub line_height: i32,
    pub base: i32, // baseline, measured from the top of the line
    pub scale_w: i32,
    pub scale_h: i32,
    pub packed: bool,
    pub alpha_channel: ChannelInfo,
    pub red_channel: ChannelInfo,
    pub green_channel: ChannelInfo,
    pub blue_channel: ChannelInfo,
}

impl Common {
    /// Page sheet dimensions in pixels.
    pub fn scale(&self) -> Vector2<i32> {
        Vector2::new(self.scale_w, self.scale_h)
    }
}

/* ======================= PAGES & CHARS ======================= */

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub id: i32,
    pub file: String,
}

bitflags! {
    /// Sheet channels a glyph is stored in (`chnl=`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Channel: i32 {
        const BLUE = 1;
        const GREEN = 2;
        const RED = 4;
        const ALPHA = 8;
        const ALL = 15;
    }
}

impl Default for Channel {
    fn default() -> Self {
        Channel::empty()
    }
}

/// Axis-aligned box in sheet pixels; `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: Vector2<i32>,
    pub max: Vector2<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Char {
    pub id: i32, // -1 is the invalid-char glyph
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub x_advance: i32,
    pub page: i32, // not checked against the page table
    pub channel: Channel,
}

impl Char {
    pub fn pos(&self) -> Vector2<i32> {
        Vector2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vector2<i32> {
        Vector2::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos(),
            max: self.pos() + self.size(),
        }
    }

    /// Offset from the pen position to the top-left corner of the glyph.
    pub fn offset(&self) -> Vector2<i32> {
        Vector2::new(self.x_offset, self.y_offset)
    }
}

/* ======================= KERNING ======================= */

/// Key of the kerning table: `second` drawn right after `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharPair {
    pub first: i32,
    pub second: i32,
}

/// Extra horizontal pen adjustment in pixels for a [`CharPair`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kerning {
    pub amount: i32,
}

/* ======================= DESCRIPTOR ======================= */

/// Everything a `.fnt` text descriptor says about a bitmap font, without the
/// sheet images themselves.
///
/// Pages, chars and kerning pairs live in ordered maps keyed by id (or pair),
/// so re-inserting a key replaces the old record and iteration is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub info: Info,
    pub common: Common,
    pub pages: BTreeMap<i32, Page>,
    pub chars: BTreeMap<i32, Char>,
    pub kernings: BTreeMap<CharPair, Kerning>,
}

impl Descriptor {
    /// Kerning amount for `second` following `first`, 0 when the pair has none.
    pub fn kerning(&self, first: i32, second: i32) -> i32 {
        self.kernings
            .get(&CharPair { first, second })
            .map_or(0, |k| k.amount)
    }
}
