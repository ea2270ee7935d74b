pub trait DiffRenderer {
    /// Empty when the two inputs are equal.
    fn render(&self, old_name: &str, old: &[u8], new_name: &str, new: &[u8]) -> String;
}
