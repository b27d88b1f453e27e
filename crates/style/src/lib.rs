//! Style resolution for the inkflow flow engine.
//!
//! - **convert**: pure value converters (colors, lengths, keywords, style tokens)
//! - **properties**: the static property → key → category table driving the cascade
//! - **record**: the fixed-field `StyleRecord` and its text/block views
//! - **declarations**: `property: value; ...` parsing and resolution into a record

pub mod convert;
pub mod declarations;
pub mod dimension;
pub mod parsers;
pub mod positioning;
pub mod properties;
pub mod record;
pub mod text;

pub use convert::Symbol;
pub use declarations::{Declarations, parse_declarations, resolve};
pub use dimension::{Margins, PageSize};
pub use parsers::StyleParseError;
pub use positioning::{PageBreak, Position};
pub use properties::{MergePolicy, StyleCategory, StyleKey};
pub use record::{BlockStyles, StyleRecord, StyleValue, TextStyles};
pub use text::{StyleToken, TextAlign, WhiteSpace};
