//! Control window state.

use crate::data::Rank;

/// Overlay status for display in the control window.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OverlayStatus {
    /// Overlay hidden, worker not running
    #[default]
    Paused,
    /// Worker running; carries the display loop's current state
    Running(String),
    /// Worker failed to start or stopped on its own
    Error(String),
}

impl OverlayStatus {
    pub fn status_text(&self) -> String {
        match self {
            Self::Paused => "Paused".to_string(),
            Self::Running(state) => format!("Running - {}", state),
            Self::Error(msg) => format!("Error: {}", msg),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }
}

#[derive(Debug, Default)]
pub struct GuiState {
    /// Rank selected in the combo box
    pub rank: Rank,
    pub status: OverlayStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(OverlayStatus::Paused.status_text(), "Paused");
        assert_eq!(
            OverlayStatus::Running("Checking round".into()).status_text(),
            "Running - Checking round"
        );
        assert!(!OverlayStatus::Error("x".into()).is_running());
    }
}
