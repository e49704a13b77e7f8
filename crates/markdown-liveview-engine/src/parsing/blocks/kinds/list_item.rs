#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`, `*` or `+`
    Bullet,
    /// `1.` or `1)`
    Ordered,
}

/// List item opener detection.
pub struct ListItem;

impl ListItem {
    /// Returns `(marker, indent, content_offset)` if `remainder` opens a list item.
    pub fn parse(remainder: &str) -> Option<(ListMarker, usize, usize)> {
        let b = remainder.as_bytes();
        let indent = b.iter().take_while(|&&c| c == b' ').count();
        let rest = &b[indent..];

        if let Some(&c) = rest.first()
            && matches!(c, b'-' | b'*' | b'+')
            && matches!(rest.get(1), Some(b' ') | Some(b'\t'))
        {
            return Some((ListMarker::Bullet, indent, indent + 2));
        }

        let digits = rest.iter().take_while(|c| c.is_ascii_digit()).count();
        if (1..=9).contains(&digits)
            && matches!(rest.get(digits), Some(b'.') | Some(b')'))
            && matches!(rest.get(digits + 1), Some(b' ') | Some(b'\t'))
        {
            return Some((ListMarker::Ordered, indent, indent + digits + 2));
        }

        None
    }
}
