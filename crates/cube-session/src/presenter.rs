use cube_core::{RenderFrame, Wisdom};

/// Presentation collaborator. Reads state, never mutates it.
pub trait Presenter: Send + 'static {
    /// Draw the cube. `frame.transition` is set only while a spin or snap is
    /// playing; otherwise the orientation applies instantly.
    fn render(&mut self, frame: &RenderFrame);

    /// Show the committed wisdom, de-emphasized while `dimmed`.
    fn show_active_wisdom(&mut self, wisdom: Option<&Wisdom>, dimmed: bool);
}
