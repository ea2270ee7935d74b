use similar::TextDiff;
use crate::ports::DiffRenderer;

const CONTEXT_LINES: usize = 3;

pub struct UnifiedDiffRenderer;

impl UnifiedDiffRenderer {
    pub fn new() -> Self { Self }
}

impl Default for UnifiedDiffRenderer {
    fn default() -> Self { Self::new() }
}

impl DiffRenderer for UnifiedDiffRenderer {
    fn render(&self, old_name: &str, old: &[u8], new_name: &str, new: &[u8]) -> String {
        if old == new {
            return String::new();
        }
        let old = String::from_utf8_lossy(old);
        let new = String::from_utf8_lossy(new);
        let diff = TextDiff::from_lines(old.as_ref(), new.as_ref());
        diff.unified_diff()
            .context_radius(CONTEXT_LINES)
            .header(old_name, new_name)
            .to_string()
    }
}
