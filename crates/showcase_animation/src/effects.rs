//! Transient class effects
//!
//! An effect adds a CSS class (whose keyframes live in the stylesheet) and
//! removes it again once the animation has played.

use showcase_core::AnimationConfig;

/// Which effect to play
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Pulse,
    Shake,
}

/// A class added for a fixed time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransientEffect {
    pub kind: EffectKind,
    pub duration_ms: u32,
}

impl TransientEffect {
    pub fn pulse(duration_ms: u32) -> Self {
        Self {
            kind: EffectKind::Pulse,
            duration_ms,
        }
    }

    pub fn shake(duration_ms: u32) -> Self {
        Self {
            kind: EffectKind::Shake,
            duration_ms,
        }
    }

    /// Effect of `kind` with the configured duration
    pub fn from_config(kind: EffectKind, config: &AnimationConfig) -> Self {
        match kind {
            EffectKind::Pulse => Self::pulse(config.pulse_ms),
            EffectKind::Shake => Self::shake(config.shake_ms),
        }
    }

    pub fn class(&self) -> &'static str {
        match self.kind {
            EffectKind::Pulse => "pulse",
            EffectKind::Shake => "shake",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_durations() {
        let config = AnimationConfig::default();
        let pulse = TransientEffect::from_config(EffectKind::Pulse, &config);
        assert_eq!((pulse.class(), pulse.duration_ms), ("pulse", 2000));
        let shake = TransientEffect::from_config(EffectKind::Shake, &config);
        assert_eq!((shake.class(), shake.duration_ms), ("shake", 1000));
    }
}
