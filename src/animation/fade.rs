use std::time::Duration;

/// An opacity animation on an annotation view
#[derive(Debug, Clone, PartialEq)]
pub struct FadeAnimation {
    pub from_opacity: f32,
    pub to_opacity: f32,
    pub duration: Duration,
    pub repeat_count: u32,
}

impl FadeAnimation {
    /// Opacity 0 → 1 over `duration`, played once
    pub fn fade_in(duration: Duration) -> Self {
        Self {
            from_opacity: 0.0,
            to_opacity: 1.0,
            duration,
            repeat_count: 1,
        }
    }

    /// Opacity `elapsed` after the animation started
    pub fn opacity_at(&self, elapsed: Duration) -> f32 {
        if self.is_finished(elapsed) {
            return self.to_opacity;
        }
        let cycle = self.duration.as_secs_f64();
        let t = ((elapsed.as_secs_f64() % cycle) / cycle).clamp(0.0, 1.0) as f32;
        self.from_opacity + (self.to_opacity - self.from_opacity) * t
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.duration.is_zero() || elapsed >= self.duration * self.repeat_count.max(1)
    }
}
