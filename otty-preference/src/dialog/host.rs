use super::DialogSession;

/// The UI layer that actually draws dialogs.
pub trait DialogHost {
    /// Whether a dialog carrying `tag` is currently present.
    fn find_by_tag(&self, tag: &str) -> bool;

    fn show(&mut self, tag: &str, session: &DialogSession);

    fn dismiss(&mut self, tag: &str);

    /// Default handling for a preference without a dedicated editor.
    fn show_default(&mut self, key: &str);
}
