/// ATX heading (`#` through `######`).
pub struct Heading;

impl Heading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: u8 = 6;

    /// Returns `(level, content_offset)` if `remainder` opens an ATX heading.
    ///
    /// The run of `#` must be followed by a space or end of line.
    pub fn parse(remainder: &str) -> Option<(u8, usize)> {
        let b = remainder.as_bytes();
        let level = b.iter().take_while(|&&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL as usize {
            return None;
        }
        match b.get(level) {
            None => Some((level as u8, level)),
            Some(b' ') | Some(b'\t') => Some((level as u8, level + 1)),
            Some(_) => None,
        }
    }
}
