/// Knobs a host can turn on the three passes.
///
/// Hosts usually load these from `mdlive-config`; the defaults match an out-of-the-box
/// editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Hide syntax markers outside the selection.
    pub hiding_enabled: bool,
    /// `K` in the toggle window of `± marker.len() * K` bytes around the selection.
    pub toggle_window_factor: usize,
    /// Characters of a link definition URL shown in its widget before truncating.
    pub link_preview_max: usize,
    /// Run the list numbering pass after edits that ask for it.
    pub renumber_after_edit: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            hiding_enabled: true,
            toggle_window_factor: 50,
            link_preview_max: 40,
            renumber_after_edit: true,
        }
    }
}
