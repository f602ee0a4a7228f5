//! Line-oriented presenter for terminals and scripts.

use std::io::Write;

use cube_core::{Orientation, RenderFrame, Wisdom};
use cube_session::Presenter;

pub struct TextPresenter<W> {
    out: W,
    /// Intermediate eased frames to print per animated transition.
    samples: u32,
    last: Option<Orientation>,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W, samples: u32) -> Self {
        Self {
            out,
            samples,
            last: None,
        }
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!("failed to write frame: {e}");
        }
    }
}

impl<W: Write + Send + 'static> Presenter for TextPresenter<W> {
    fn render(&mut self, frame: &RenderFrame) {
        if let (Some(tr), Some(from)) = (frame.transition, self.last)
            && from != frame.orientation
        {
            for i in 1..self.samples {
                let elapsed = tr.duration_secs * f64::from(i) / f64::from(self.samples);
                let at = tr.sample(from, frame.orientation, elapsed);
                self.emit(&format!("  t={elapsed:.2}s x={:.2} y={:.2}", at.x, at.y));
            }
        }
        self.last = Some(frame.orientation);

        let state = if frame.spinning {
            "spinning"
        } else if frame.dragging {
            "dragging"
        } else {
            "idle"
        };
        let line = format!(
            "frame {state} {} transition={}",
            frame.cube_css(),
            frame.transition_css()
        );
        self.emit(&line);
    }

    fn show_active_wisdom(&mut self, wisdom: Option<&Wisdom>, dimmed: bool) {
        let line = match wisdom {
            Some(w) => format!(
                "wisdom {} \"{}\"{}",
                w.face,
                w.title,
                if dimmed { " (dimmed)" } else { "" }
            ),
            None => "wisdom none".to_string(),
        };
        self.emit(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::{Catalogue, Face, Transition};

    fn frame(orientation: Orientation, transition: Option<Transition>) -> RenderFrame {
        RenderFrame {
            orientation,
            spinning: transition.is_some(),
            dragging: false,
            transition,
        }
    }

    fn text(p: TextPresenter<Vec<u8>>) -> String {
        String::from_utf8(p.out).unwrap()
    }

    #[test]
    fn test_idle_frame_line() {
        let mut p = TextPresenter::new(Vec::new(), 0);
        p.render(&frame(Orientation::default(), None));
        assert_eq!(
            text(p),
            "frame idle rotateX(-15deg) rotateY(-25deg) transition=none\n"
        );
    }

    #[test]
    fn test_samples_between_frames() {
        let mut p = TextPresenter::new(Vec::new(), 4);
        p.render(&frame(Orientation::new(0.0, 0.0), None));
        p.render(&frame(
            Orientation::new(0.0, 180.0),
            Some(Transition::ease_out(0.6)),
        ));
        let out = text(p);
        assert_eq!(out.matches("  t=").count(), 3);
        assert!(out.contains("frame spinning rotateX(0deg) rotateY(180deg)"));
    }

    #[test]
    fn test_wisdom_line() {
        let cat = Catalogue::builtin();
        let mut p = TextPresenter::new(Vec::new(), 0);
        p.show_active_wisdom(Some(cat.get(Face::Top)), true);
        p.show_active_wisdom(None, false);
        assert_eq!(
            text(p),
            "wisdom top \"Refactorable Code\" (dimmed)\nwisdom none\n"
        );
    }
}
