//! Fixtures shared by this crate's own `#[cfg(test)]` modules.

use crate::item::FontRef;

/// `fontdb::ID` has no public test constructor; this is the same trick the
/// teacher crate's renderer glyph-cache tests use to obtain a dummy one.
pub(crate) fn dummy_font_ref() -> FontRef {
    unsafe { std::mem::transmute(1u64) }
}
