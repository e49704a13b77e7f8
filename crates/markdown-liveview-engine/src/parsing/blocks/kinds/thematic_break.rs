/// Thematic break (`---`, `***`, `___`, spaces allowed between).
pub struct ThematicBreak;

impl ThematicBreak {
    pub fn matches(remainder: &str) -> bool {
        let t = remainder.trim();
        let Some(first) = t.chars().next() else {
            return false;
        };
        if !matches!(first, '-' | '*' | '_') {
            return false;
        }
        let mut count = 0;
        for c in t.chars() {
            if c == first {
                count += 1;
            } else if c != ' ' {
                return false;
            }
        }
        count >= 3
    }
}
