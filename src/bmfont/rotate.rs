use log::debug;

use super::types::{Char, Descriptor, Padding, Spacing};

/// Rotates the whole font layout 90 degrees clockwise, in place.
///
/// The page sheets swap width and height and every glyph box is moved onto
/// the rotated sheet. Advances are recomputed from the rotated box rather than
/// carried over, and `lineHeight`/`base` both become the tallest rotated
/// glyph. Kerning pairs are left alone.
///
/// Two calls give a 180 degree layout, not the original font.
pub fn rotate(desc: &mut Descriptor) {
    desc.info.padding = rotate_padding(desc.info.padding);
    desc.info.spacing = swap_spacing(desc.info.spacing);

    let common = &mut desc.common;
    std::mem::swap(&mut common.scale_w, &mut common.scale_h);

    // Glyphs are placed against the already swapped sheet width.
    let sheet_w = common.scale_w;
    let mut tallest = 0;
    for ch in desc.chars.values_mut() {
        rotate_char(ch, sheet_w);
        tallest = tallest.max(ch.height);
    }

    common.line_height = tallest;
    common.base = tallest;

    debug!(
        "rotated {} char(s) onto {}x{} sheet(s), lineHeight={}",
        desc.chars.len(),
        common.scale_w,
        common.scale_h,
        tallest
    );
}

impl Descriptor {
    /// See [`rotate`].
    pub fn rotate(&mut self) {
        rotate(self);
    }
}

/// `(up, right, down, left)` -> `(left, up, right, down)`
#[inline(always)]
fn rotate_padding(p: Padding) -> Padding {
    Padding {
        up: p.left,
        right: p.up,
        down: p.right,
        left: p.down,
    }
}

#[inline(always)]
fn swap_spacing(s: Spacing) -> Spacing {
    Spacing {
        horizontal: s.vertical,
        vertical: s.horizontal,
    }
}

/// `sheet_w` is the sheet width after rotation.
fn rotate_char(ch: &mut Char, sheet_w: i32) {
    let (x, y) = (ch.x, ch.y);
    ch.x = sheet_w.wrapping_sub(y).wrapping_sub(ch.height);
    ch.y = x;
    std::mem::swap(&mut ch.x_offset, &mut ch.y_offset);
    std::mem::swap(&mut ch.width, &mut ch.height);
    ch.x_advance = ch.width.wrapping_add(ch.x_offset);
}
