//! Human-readable dump of a descriptor, one `.fnt`-style line per record.
//! Kerning pairs are not written, and quoted strings are not escaped, so the
//! output is for inspection and comparison rather than a faithful writer.

use std::fmt;

use super::types::{Char, Common, Descriptor, Info, Page};

#[inline(always)]
fn bit(b: bool) -> u8 {
    u8::from(b)
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "info face=\"{}\" size={} bold={} italic={} charset=\"{}\" unicode={} stretchH={} smooth={} aa={} padding={},{},{},{} spacing={},{} outline={}",
            self.face,
            self.size,
            bit(self.bold),
            bit(self.italic),
            self.charset,
            bit(self.unicode),
            self.stretch_h,
            bit(self.smooth),
            self.aa,
            self.padding.up,
            self.padding.right,
            self.padding.down,
            self.padding.left,
            self.spacing.horizontal,
            self.spacing.vertical,
            self.outline,
        )
    }
}

/// `common` line; the page count is not part of [`Common`] so it is passed in.
pub struct CommonLine<'a> {
    pub common: &'a Common,
    pub pages: usize,
}

impl fmt::Display for CommonLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.common;
        write!(
            f,
            "common lineHeight={} base={} scaleW={} scaleH={} pages={} packed={} alphaChnl={} redChnl={} greenChnl={} blueChnl={}",
            c.line_height,
            c.base,
            c.scale_w,
            c.scale_h,
            self.pages,
            bit(c.packed),
            c.alpha_channel.code(),
            c.red_channel.code(),
            c.green_channel.code(),
            c.blue_channel.code(),
        )
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page id={} file=\"{}\"", self.id, self.file)
    }
}

impl fmt::Display for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "char id={} x={} y={} width={} height={} xoffset={} yoffset={} xadvance={} page={} chnl={}",
            self.id,
            self.x,
            self.y,
            self.width,
            self.height,
            self.x_offset,
            self.y_offset,
            self.x_advance,
            self.page,
            self.channel.bits(),
        )
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.info)?;
        writeln!(
            f,
            "{}",
            CommonLine {
                common: &self.common,
                pages: self.pages.len(),
            }
        )?;
        for page in self.pages.values() {
            writeln!(f, "{page}")?;
        }
        writeln!(f, "chars count={}", self.chars.len())?;
        for ch in self.chars.values() {
            writeln!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Renders the dump: info, common, pages, `chars count=`, chars. Every line,
/// including the last, ends with a newline.
pub fn render(desc: &Descriptor) -> String {
    desc.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmfont::types::{Channel, ChannelInfo, CharPair, Kerning, Padding, Spacing};
    use pretty_assertions::assert_eq;

    fn sample() -> Descriptor {
        let mut desc = Descriptor {
            info: Info {
                face: "Pixel Sans".to_string(),
                size: -16,
                bold: false,
                italic: true,
                charset: "ANSI".to_string(),
                unicode: false,
                stretch_h: 100,
                smooth: true,
                aa: 2,
                padding: Padding { up: 1, right: 2, down: 3, left: 4 },
                spacing: Spacing { horizontal: 5, vertical: 7 },
                outline: 1,
            },
            common: Common {
                line_height: 20,
                base: 16,
                scale_w: 64,
                scale_h: 32,
                packed: true,
                alpha_channel: ChannelInfo::Outline,
                red_channel: ChannelInfo::GlyphAndOutline,
                green_channel: ChannelInfo::Zero,
                blue_channel: ChannelInfo::One,
            },
            ..Default::default()
        };
        for (id, file) in [(1, "b.png"), (0, "a.png")] {
            desc.pages.insert(id, Page { id, file: file.to_string() });
        }
        desc.chars.insert(
            66,
            Char {
                id: 66,
                x: 8,
                y: 0,
                width: 7,
                height: 9,
                x_offset: 0,
                y_offset: 2,
                x_advance: 8,
                page: 1,
                channel: Channel::ALL,
            },
        );
        desc.chars.insert(
            65,
            Char {
                id: 65,
                x: 0,
                y: 0,
                width: 7,
                height: 9,
                x_offset: -1,
                y_offset: 2,
                x_advance: 7,
                page: 0,
                channel: Channel::RED,
            },
        );
        desc.kernings
            .insert(CharPair { first: 65, second: 66 }, Kerning { amount: -1 });
        desc
    }

    #[test]
    fn renders_records_in_key_order() {
        let expected = "\
info face=\"Pixel Sans\" size=-16 bold=0 italic=1 charset=\"ANSI\" unicode=0 stretchH=100 smooth=1 aa=2 padding=1,2,3,4 spacing=5,7 outline=1
common lineHeight=20 base=16 scaleW=64 scaleH=32 pages=2 packed=1 alphaChnl=1 redChnl=2 greenChnl=3 blueChnl=4
page id=0 file=\"a.png\"
page id=1 file=\"b.png\"
chars count=2
char id=65 x=0 y=0 width=7 height=9 xoffset=-1 yoffset=2 xadvance=7 page=0 chnl=4
char id=66 x=8 y=0 width=7 height=9 xoffset=0 yoffset=2 xadvance=8 page=1 chnl=15
";
        assert_eq!(render(&sample()), expected);
    }

    #[test]
    fn kerning_is_not_rendered() {
        let out = render(&sample());
        assert!(!out.contains("kerning"));
    }

    #[test]
    fn empty_descriptor() {
        let expected = "\
info face=\"\" size=0 bold=0 italic=0 charset=\"\" unicode=0 stretchH=0 smooth=0 aa=0 padding=0,0,0,0 spacing=0,0 outline=0
common lineHeight=0 base=0 scaleW=0 scaleH=0 pages=0 packed=0 alphaChnl=0 redChnl=0 greenChnl=0 blueChnl=0
chars count=0
";
        assert_eq!(render(&Descriptor::default()), expected);
    }

    #[test]
    fn page_count_comes_from_page_table() {
        let mut desc = sample();
        desc.pages.remove(&1);
        let line = CommonLine {
            common: &desc.common,
            pages: desc.pages.len(),
        }
        .to_string();
        assert!(line.contains(" pages=1 "), "{line}");
        assert!(render(&desc).lines().nth(1).unwrap().contains(" pages=1 "));
    }

    #[test]
    fn unknown_codes_are_written_back() {
        let mut desc = sample();
        desc.common.red_channel = ChannelInfo::Other(7);
        desc.chars.get_mut(&65).unwrap().channel = Channel::from_bits_retain(32 | 4);
        let out = render(&desc);
        assert!(out.contains(" alphaChnl=1 redChnl=7 greenChnl=3 "), "{out}");
        let line = out.lines().find(|l| l.starts_with("char id=65 ")).unwrap();
        assert!(line.ends_with(" page=0 chnl=36"), "{line}");
    }

    #[test]
    fn strings_are_not_escaped() {
        let page = Page {
            id: 0,
            file: "say \"hi\".png".to_string(),
        };
        assert_eq!(page.to_string(), "page id=0 file=\"say \"hi\".png\"");
    }
}
