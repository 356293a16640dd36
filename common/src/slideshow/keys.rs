/// Viewer keyboard shortcuts, keyed by `KeyboardEvent.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    TogglePlay,
    Previous,
    Next,
    ToggleFullscreen,
    ExitFullscreen,
}

impl KeyCommand {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(KeyCommand::TogglePlay),
            "ArrowLeft" => Some(KeyCommand::Previous),
            "ArrowRight" => Some(KeyCommand::Next),
            "KeyF" => Some(KeyCommand::ToggleFullscreen),
            "Escape" => Some(KeyCommand::ExitFullscreen),
            _ => None,
        }
    }

    /// Whether the browser's default action for the key has to be suppressed
    /// (page scroll on space and arrows, find-as-you-type on `f`).
    pub fn prevents_default(self) -> bool {
        self != KeyCommand::ExitFullscreen
    }
}
