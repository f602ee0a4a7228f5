use serde::Serialize;

use crate::easing::Transition;
use crate::orientation::Orientation;

/// Snapshot handed to the presentation layer after every state change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderFrame {
    pub orientation: Orientation,
    pub spinning: bool,
    pub dragging: bool,
    /// Present only while spinning or snapping. Drag updates render instantly.
    pub transition: Option<Transition>,
}

/// Label and enabled state of the explicit spin trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpinButton {
    pub label: &'static str,
    pub enabled: bool,
}

impl RenderFrame {
    pub fn cube_css(&self) -> String {
        self.orientation.css()
    }

    pub fn transition_css(&self) -> String {
        self.transition
            .map(|t| t.css())
            .unwrap_or_else(|| "none".to_string())
    }

    /// The detail panel is de-emphasized during any gesture or animation.
    pub fn panel_dimmed(&self) -> bool {
        self.spinning || self.dragging
    }

    pub fn spin_button(&self) -> SpinButton {
        if self.spinning {
            SpinButton {
                label: "Consulting the Oracle...",
                enabled: false,
            }
        } else {
            SpinButton {
                label: "Extract Wisdom",
                enabled: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> RenderFrame {
        RenderFrame {
            orientation: Orientation::default(),
            spinning: false,
            dragging: false,
            transition: None,
        }
    }

    #[test]
    fn test_idle_frame() {
        let f = idle();
        assert_eq!(f.transition_css(), "none");
        assert!(!f.panel_dimmed());
        assert_eq!(f.spin_button().label, "Extract Wisdom");
        assert!(f.spin_button().enabled);
    }

    #[test]
    fn test_dragging_dims_panel_without_disabling_spin() {
        let f = RenderFrame {
            dragging: true,
            ..idle()
        };
        assert!(f.panel_dimmed());
        assert!(f.spin_button().enabled);
    }

    #[test]
    fn test_spinning_frame() {
        let f = RenderFrame {
            spinning: true,
            transition: Some(Transition::ease_out(1.25)),
            ..idle()
        };
        assert_eq!(
            f.transition_css(),
            "transform 1.25s cubic-bezier(0.25, 1, 0.5, 1)"
        );
        assert!(!f.spin_button().enabled);
        assert_eq!(f.spin_button().label, "Consulting the Oracle...");
    }
}
