//! Transition Module
//! Time-based interpolation between two bound frames. Marks move in pixel
//! space while axis domains slide, both with cubic in-out easing.

use crate::view::{Frame, Mark};

/// Cubic in-out easing on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// An in-flight animation from one frame to another.
#[derive(Debug, Clone)]
pub struct Transition {
    from: Frame,
    to: Frame,
    start: f64,
    duration: f64,
}

impl Transition {
    /// `start` and `duration` are seconds on the caller's clock.
    pub fn new(from: Frame, to: Frame, start: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Interrupt `current` (if any) at `now` and head for `to` from wherever
    /// the marks are at that moment.
    pub fn retarget(
        current: Option<&Transition>,
        settled: &Frame,
        to: Frame,
        now: f64,
        duration: f64,
    ) -> Self {
        let from = current
            .map(|t| t.sample(now))
            .unwrap_or_else(|| settled.clone());
        Self::new(from, to, now, duration)
    }

    /// Eased progress at `now`, in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_cubic_in_out((now - self.start) / self.duration)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.start + self.duration
    }

    /// Frame as it should be drawn at `now`. Tooltips always come from the
    /// target frame.
    pub fn sample(&self, now: f64) -> Frame {
        if self.is_finished(now) {
            return self.to.clone();
        }
        let t = self.progress(now);
        let lerp = |a: f64, b: f64| {
            if a.is_finite() && b.is_finite() {
                a + (b - a) * t
            } else {
                b
            }
        };

        let marks = self
            .to
            .marks
            .iter()
            .enumerate()
            .map(|(i, target)| match self.from.marks.get(i) {
                Some(source) => Mark {
                    abbr: target.abbr.clone(),
                    x: lerp(source.x, target.x),
                    y: lerp(source.y, target.y),
                    tooltip: target.tooltip.clone(),
                },
                None => target.clone(),
            })
            .collect();

        Frame {
            x_scale: self.from.x_scale.lerp_domain(&self.to.x_scale, t),
            y_scale: self.from.y_scale.lerp_domain(&self.to.y_scale, t),
            marks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::LinearScale;

    fn frame(x: f64, y: f64, domain: (f64, f64)) -> Frame {
        Frame {
            x_scale: LinearScale::new(domain, (0.0, 100.0)),
            y_scale: LinearScale::new((0.0, 10.0), (100.0, 0.0)),
            marks: vec![Mark {
                abbr: "AL".into(),
                x,
                y,
                tooltip: format!("{x}"),
            }],
        }
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(2.0), 1.0);
    }

    #[test]
    fn sample_at_start_is_source_and_end_is_target() {
        let from = frame(0.0, 0.0, (0.0, 10.0));
        let to = frame(80.0, 40.0, (10.0, 30.0));
        let tr = Transition::new(from.clone(), to.clone(), 5.0, 1.0);

        let start = tr.sample(5.0);
        assert_eq!(start.marks[0].x, 0.0);
        assert_eq!(start.x_scale.domain, (0.0, 10.0));
        assert_eq!(start.marks[0].tooltip, to.marks[0].tooltip);

        assert_eq!(tr.sample(6.0), to);
        assert!(tr.is_finished(6.0));
        assert!(!tr.is_finished(5.5));
    }

    #[test]
    fn midpoint_is_halfway() {
        let tr = Transition::new(
            frame(0.0, 0.0, (0.0, 10.0)),
            frame(80.0, 40.0, (10.0, 30.0)),
            0.0,
            1.0,
        );
        let mid = tr.sample(0.5);
        assert_eq!(mid.marks[0].x, 40.0);
        assert_eq!(mid.marks[0].y, 20.0);
        assert_eq!(mid.x_scale.domain, (5.0, 20.0));
    }

    #[test]
    fn interrupted_transition_restarts_from_sampled_position() {
        let settled = frame(0.0, 0.0, (0.0, 10.0));
        let first = Transition::new(settled.clone(), frame(80.0, 40.0, (10.0, 30.0)), 0.0, 1.0);
        let second = Transition::retarget(
            Some(&first),
            &settled,
            frame(20.0, 0.0, (0.0, 10.0)),
            0.5,
            1.0,
        );
        let begin = second.sample(0.5);
        assert_eq!(begin.marks[0].x, 40.0);
        assert_eq!(begin.marks[0].y, 20.0);
        assert_eq!(second.sample(1.5).marks[0].x, 20.0);
    }

    #[test]
    fn non_finite_positions_jump_to_target() {
        let tr = Transition::new(
            frame(f64::NAN, 0.0, (0.0, 10.0)),
            frame(80.0, 40.0, (0.0, 10.0)),
            0.0,
            1.0,
        );
        assert_eq!(tr.sample(0.25).marks[0].x, 80.0);
    }
}
