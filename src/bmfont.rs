//! BMFont text descriptors (`.fnt`): the data model, a parser, the 90 degree
//! clockwise layout rotation and a diagnostic dump.
//!
//! Only the descriptor is handled; page sheet images are never opened.

mod dump;
mod parse;
mod rotate;
mod types;

pub use dump::{render, CommonLine};
pub use parse::{load_descriptor, parse, read_descriptor, ParseError};
pub use rotate::rotate;
pub use types::{
    Channel, ChannelInfo, Char, CharPair, Common, Descriptor, Info, Kerning, Padding, Page, Rect,
    Spacing,
};
