//! Animation controller
//!
//! Entrance sequences, viewport-triggered reveals and number counters. All
//! deferred work is scheduled as [`AnimationTask`]s on the app scheduler and
//! handed back through [`AnimationController::run_task`].
//!
//! When the user prefers reduced motion every entry point is a no-op.

use showcase_animation::{
    transition_value, CounterSet, EffectKind, EnterTransition, RangeCounter, Scheduler,
    StaggerConfig, TextCounter, TransientEffect, VisibilityObserver,
};
use showcase_core::{is_partially_visible, AnimationConfig, Margins};
use showcase_dom::{Document, DocumentExt};

const OBSERVED_SELECTOR: &str = ".animate-on-scroll, .stat-number, .metric-value, .feature-card";
const COUNTED_CLASSES: [&str; 2] = ["stat-number", "metric-value"];
const RANGE_COUNTER_SELECTOR: &str = ".counter";
const SCROLL_ANIMATION_SELECTOR: &str = ".scroll-animation";
const HERO_PARTS: [&str; 4] = [".hero-title", ".hero-subtitle", ".hero-stats", ".hero-actions"];
const CARD_SELECTOR: &str = ".value-card, .tech-card";
const PROGRESS_BAR_SELECTOR: &str = ".progress-bar";

/// Deferred animation work
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationTask<E> {
    /// Transition an element to its settled style; `replay` first snaps it
    /// back to the hidden style so the transition runs again
    Reveal {
        element: E,
        transition: EnterTransition,
        replay: bool,
    },
    /// Queue the staggered progress-bar fills
    StartMetricsBars,
    /// Animate one progress bar from 0% to its declared width
    FillBar { element: E },
    /// End of a transient effect
    RemoveClass { element: E, class: &'static str },
}

/// Viewport reveals, counters and entrance sequences
#[derive(Debug)]
pub struct AnimationController<E> {
    enabled: bool,
    config: AnimationConfig,
    observer: VisibilityObserver<E>,
    counters: CounterSet<E>,
}

impl<E: Clone + PartialEq> AnimationController<E> {
    pub fn new(config: AnimationConfig, enabled: bool) -> Self {
        let observer = VisibilityObserver::new(
            config.observer_threshold,
            Margins::bottom(config.observer_bottom_margin),
        );
        Self {
            enabled,
            config,
            observer,
            counters: CounterSet::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Elements watched for viewport entry
    pub fn observed(&self) -> usize {
        self.observer.len()
    }

    /// Counters still ticking
    pub fn running_counters(&self) -> usize {
        self.counters.len()
    }

    /// Start observing and kick off the declared-range counters
    pub fn initialize<D>(&mut self, doc: &mut D, now: f64)
    where
        D: Document<Element = E> + ?Sized,
    {
        if !self.enabled {
            tracing::info!("animations disabled (reduced motion)");
            return;
        }

        for element in doc.query_all(OBSERVED_SELECTOR).unwrap_or_default() {
            self.observer.observe(element);
        }

        let mut started = 0;
        for counter in doc.query_all(RANGE_COUNTER_SELECTOR).unwrap_or_default() {
            let target = doc
                .attribute(&counter, "data-target")
                .as_deref()
                .and_then(parse_int)
                .unwrap_or(0);
            if target == 0 {
                continue;
            }
            self.counters.start(
                counter,
                RangeCounter::new(
                    0.0,
                    target as f64,
                    self.config.range_counter_duration_ms,
                    self.config.range_counter_min_step_ms,
                    now,
                ),
            );
            started += 1;
        }

        tracing::info!(
            "animation system initialized ({} observed, {} counters)",
            self.observer.len(),
            started
        );
    }

    /// Check observed elements against the viewport; returns how many
    /// entered it
    pub fn sample_observers<D>(&mut self, doc: &mut D, now: f64) -> usize
    where
        D: Document<Element = E> + ?Sized,
    {
        if !self.enabled || self.observer.is_empty() {
            return 0;
        }
        let viewport = doc.viewport();
        let entries = self.observer.sample(&viewport, |e| doc.bounding_rect(e));

        for entry in &entries {
            doc.add_class(&entry.element, "animate");
            if COUNTED_CLASSES.iter().any(|c| doc.has_class(&entry.element, c)) {
                self.animate_number(doc, &entry.element, now);
            }
        }
        entries.len()
    }

    /// Count the number shown in `element` up from zero, once per element
    ///
    /// Text without digits is left alone and not flagged, so a later entry
    /// tries again.
    pub fn animate_number<D>(&mut self, doc: &mut D, element: &E, now: f64) -> bool
    where
        D: Document<Element = E> + ?Sized,
    {
        if doc.attribute(element, "data-animated").as_deref() == Some("true") {
            return false;
        }
        let text = doc.text_content(element);
        let Some(counter) = TextCounter::from_text(
            &text,
            now,
            self.config.counter_duration_ms,
            self.config.counter_steps,
        ) else {
            return false;
        };

        doc.set_attribute(element, "data-animated", "true");
        self.counters.start(element.clone(), counter);
        true
    }

    /// Mark partially visible `.scroll-animation` elements `in-view`
    pub fn trigger_scroll_animations<D>(&self, doc: &mut D) -> usize
    where
        D: Document<Element = E> + ?Sized,
    {
        if !self.enabled {
            return 0;
        }
        let viewport = doc.viewport();
        let mut shown = 0;
        for element in doc.query_all(SCROLL_ANIMATION_SELECTOR).unwrap_or_default() {
            if is_partially_visible(&doc.bounding_rect(&element), &viewport) {
                doc.add_class(&element, "in-view");
                shown += 1;
            }
        }
        shown
    }

    /// Write the counter values due at `now`
    pub fn tick<D>(&mut self, doc: &mut D, now: f64)
    where
        D: Document<Element = E> + ?Sized,
    {
        for (element, text) in self.counters.sample(now) {
            doc.set_text_content(&element, &text);
        }
    }

    // =========================================================================
    // Entrance sequences
    // =========================================================================

    /// Hero entrance: every part hidden now, revealed one after another
    ///
    /// Indices count absent parts too, so the timing of a part does not
    /// depend on its siblings existing.
    pub fn trigger_home_animations<D, T>(&self, doc: &mut D, scheduler: &mut Scheduler<T>)
    where
        D: Document<Element = E> + ?Sized,
        T: From<AnimationTask<E>>,
    {
        if !self.enabled {
            return;
        }
        let stagger = StaggerConfig::new(self.config.hero_stagger_ms)
            .with_base_delay(self.config.hero_base_delay_ms);
        let transition =
            EnterTransition::slide_up(self.config.hero_offset_px, self.config.hero_duration_ms);

        for (index, selector) in HERO_PARTS.iter().enumerate() {
            let Ok(Some(element)) = doc.query(selector) else {
                continue;
            };
            doc.set_styles(&element, &transition.hidden_styles());
            scheduler.set_timeout(
                stagger.delay_for_index(index),
                AnimationTask::Reveal {
                    element,
                    transition,
                    replay: false,
                }
                .into(),
            );
        }
    }

    /// Value and technology cards fade in one after another
    pub fn initialize_value_animations<D, T>(&self, doc: &mut D, scheduler: &mut Scheduler<T>)
    where
        D: Document<Element = E> + ?Sized,
        T: From<AnimationTask<E>>,
    {
        if !self.enabled {
            return;
        }
        let stagger = StaggerConfig::new(self.config.card_stagger_ms);
        let transition =
            EnterTransition::slide_up(self.config.card_offset_px, self.config.card_duration_ms);

        let cards = doc.query_all(CARD_SELECTOR).unwrap_or_default();
        for (index, element) in cards.into_iter().enumerate() {
            scheduler.set_timeout(
                stagger.delay_for_index(index),
                AnimationTask::Reveal {
                    element,
                    transition,
                    replay: true,
                }
                .into(),
            );
        }
    }

    /// Progress bars grow to their widths after a short lead-in
    pub fn initialize_metrics_animations<T>(&self, scheduler: &mut Scheduler<T>)
    where
        T: From<AnimationTask<E>>,
    {
        if !self.enabled {
            return;
        }
        scheduler.set_timeout(self.config.metrics_delay_ms, AnimationTask::StartMetricsBars.into());
    }

    // =========================================================================
    // Effects
    // =========================================================================

    pub fn pulse<D, T>(&self, doc: &mut D, scheduler: &mut Scheduler<T>, element: &E)
    where
        D: Document<Element = E> + ?Sized,
        T: From<AnimationTask<E>>,
    {
        self.play_effect(doc, scheduler, element, EffectKind::Pulse);
    }

    pub fn shake<D, T>(&self, doc: &mut D, scheduler: &mut Scheduler<T>, element: &E)
    where
        D: Document<Element = E> + ?Sized,
        T: From<AnimationTask<E>>,
    {
        self.play_effect(doc, scheduler, element, EffectKind::Shake);
    }

    fn play_effect<D, T>(&self, doc: &mut D, scheduler: &mut Scheduler<T>, element: &E, kind: EffectKind)
    where
        D: Document<Element = E> + ?Sized,
        T: From<AnimationTask<E>>,
    {
        if !self.enabled {
            return;
        }
        let effect = TransientEffect::from_config(kind, &self.config);
        doc.add_class(element, effect.class());
        scheduler.set_timeout(
            effect.duration_ms,
            AnimationTask::RemoveClass {
                element: element.clone(),
                class: effect.class(),
            }
            .into(),
        );
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    /// Carry out a task scheduled by this controller
    pub fn run_task<D, T>(&self, doc: &mut D, scheduler: &mut Scheduler<T>, task: AnimationTask<E>)
    where
        D: Document<Element = E> + ?Sized,
        T: From<AnimationTask<E>>,
    {
        match task {
            AnimationTask::Reveal {
                element,
                transition,
                replay,
            } => {
                if replay {
                    doc.set_styles(&element, &transition.hidden_styles());
                    doc.force_reflow(&element);
                }
                doc.set_styles(&element, &transition.settled_styles());
            }
            AnimationTask::StartMetricsBars => {
                let stagger = StaggerConfig::new(self.config.bar_stagger_ms);
                let bars = doc.query_all(PROGRESS_BAR_SELECTOR).unwrap_or_default();
                let total = bars.len();
                tracing::debug!("animating {} progress bars", total);
                for (index, element) in bars.into_iter().enumerate() {
                    scheduler.set_timeout(
                        stagger.delay_for_index(index),
                        AnimationTask::FillBar { element }.into(),
                    );
                }
            }
            AnimationTask::FillBar { element } => {
                let width = doc.style(&element, "width").unwrap_or_default();
                doc.set_style(&element, "width", "0%");
                doc.force_reflow(&element);
                doc.set_style(
                    &element,
                    "transition",
                    &transition_value("width", self.config.bar_duration_ms),
                );
                doc.set_style(&element, "width", &width);
            }
            AnimationTask::RemoveClass { element, class } => {
                doc.remove_class(&element, class);
            }
        }
    }

    /// Stop observing and drop running counters
    pub fn cleanup(&mut self) {
        self.observer.disconnect();
        self.counters.clear();
        tracing::debug!("animation observers disconnected");
    }
}

/// Leading integer of an attribute value, `parseInt` style
fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::reference_page;
    use showcase_dom::{HeadlessDocument, NodeId};

    type Tasks = Scheduler<AnimationTask<NodeId>>;

    fn controller(enabled: bool) -> AnimationController<NodeId> {
        AnimationController::new(AnimationConfig::default(), enabled)
    }

    fn run(
        animations: &AnimationController<NodeId>,
        doc: &mut HeadlessDocument,
        scheduler: &mut Tasks,
        until: f64,
    ) {
        while let Some(task) = scheduler.pop_due(until) {
            animations.run_task(doc, scheduler, task);
        }
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" 7px"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_visible_stat_counts_to_its_text() {
        let mut doc = reference_page();
        let mut animations = controller(true);
        animations.initialize(&mut doc, 0.0);

        assert!(animations.sample_observers(&mut doc, 0.0) > 0);
        let stat = doc.query(".stat-number").unwrap().unwrap();
        assert!(doc.has_class(&stat, "animate"));
        assert_eq!(doc.attribute(&stat, "data-animated").as_deref(), Some("true"));

        animations.tick(&mut doc, 30.0);
        assert_ne!(doc.text_content(&stat), "85%");
        animations.tick(&mut doc, 1500.0);
        assert_eq!(doc.text_content(&stat), "85%");
    }

    #[test]
    fn test_entry_is_reported_once() {
        let mut doc = reference_page();
        let mut animations = controller(true);
        animations.initialize(&mut doc, 0.0);
        let first = animations.sample_observers(&mut doc, 0.0);
        assert!(first > 0);
        assert_eq!(animations.sample_observers(&mut doc, 10.0), 0);
    }

    #[test]
    fn test_non_numeric_text_is_not_flagged() {
        let mut doc = HeadlessDocument::new();
        let body = doc.body().unwrap();
        let el = doc.create_with_classes("div", &["stat-number"]);
        doc.set_text_content(&el, "N/A");
        doc.append_child(&body, &el);

        let mut animations = controller(true);
        assert!(!animations.animate_number(&mut doc, &el, 0.0));
        assert_eq!(doc.attribute(&el, "data-animated"), None);
        assert_eq!(animations.running_counters(), 0);
    }

    #[test]
    fn test_range_counters_start_for_nonzero_targets() {
        let mut doc = reference_page();
        let mut animations = controller(true);
        animations.initialize(&mut doc, 0.0);
        let counter = doc.query(".counter").unwrap().unwrap();
        assert_eq!(animations.running_counters(), 1);

        animations.tick(&mut doc, 2000.0);
        assert_eq!(doc.text_content(&counter), "1.2K");
        assert_eq!(animations.running_counters(), 0);
    }

    #[test]
    fn test_hero_sequence() {
        let mut doc = reference_page();
        let mut scheduler = Tasks::new();
        let animations = controller(true);
        animations.trigger_home_animations(&mut doc, &mut scheduler);

        let title = doc.query(".hero-title").unwrap().unwrap();
        let actions = doc.query(".hero-actions").unwrap().unwrap();
        assert_eq!(doc.style(&title, "opacity").as_deref(), Some("0"));
        assert_eq!(scheduler.pending(), 4);

        run(&animations, &mut doc, &mut scheduler, 200.0);
        assert_eq!(doc.style(&title, "opacity").as_deref(), Some("1"));
        assert_eq!(doc.style(&title, "transition").as_deref(), Some("all 0.8s ease-out"));
        assert_eq!(doc.style(&actions, "opacity").as_deref(), Some("0"));

        run(&animations, &mut doc, &mut scheduler, 650.0);
        assert_eq!(doc.style(&actions, "transform").as_deref(), Some("translateY(0)"));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_metrics_bars_restore_width() {
        let mut doc = reference_page();
        let mut scheduler = Tasks::new();
        let animations = controller(true);
        let bars = doc.query_all(".progress-bar").unwrap();
        let widths: Vec<_> = bars.iter().map(|b| doc.style(b, "width")).collect();

        animations.initialize_metrics_animations(&mut scheduler);
        run(&animations, &mut doc, &mut scheduler, 499.0);
        assert_eq!(doc.style(&bars[0], "transition"), None);

        run(&animations, &mut doc, &mut scheduler, 500.0 + 200.0 * bars.len() as f64);
        for (bar, width) in bars.iter().zip(widths) {
            assert_eq!(doc.style(bar, "width"), width);
            assert_eq!(doc.style(bar, "transition").as_deref(), Some("width 1s ease-out"));
        }
        assert!(doc.reflow_count() >= bars.len());
    }

    #[test]
    fn test_value_cards_replay() {
        let mut doc = reference_page();
        let mut scheduler = Tasks::new();
        let animations = controller(true);
        animations.initialize_value_animations(&mut doc, &mut scheduler);
        let cards = doc.query_all(".value-card, .tech-card").unwrap();
        assert_eq!(scheduler.pending(), cards.len());

        run(&animations, &mut doc, &mut scheduler, 100.0 * cards.len() as f64);
        for card in &cards {
            assert_eq!(doc.style(card, "opacity").as_deref(), Some("1"));
            assert_eq!(doc.style(card, "transition").as_deref(), Some("all 0.6s ease-out"));
        }
    }

    #[test]
    fn test_effects_remove_their_class() {
        let mut doc = reference_page();
        let mut scheduler = Tasks::new();
        let animations = controller(true);
        let card = doc.query(".feature-card").unwrap().unwrap();

        animations.pulse(&mut doc, &mut scheduler, &card);
        animations.shake(&mut doc, &mut scheduler, &card);
        assert!(doc.has_class(&card, "pulse") && doc.has_class(&card, "shake"));

        run(&animations, &mut doc, &mut scheduler, 1000.0);
        assert!(doc.has_class(&card, "pulse"));
        assert!(!doc.has_class(&card, "shake"));
        run(&animations, &mut doc, &mut scheduler, 2000.0);
        assert!(!doc.has_class(&card, "pulse"));
    }

    #[test]
    fn test_reduced_motion_is_inert() {
        let mut doc = reference_page();
        let before = doc.to_html();
        let mut scheduler = Tasks::new();
        let mut animations = controller(false);

        animations.initialize(&mut doc, 0.0);
        animations.trigger_home_animations(&mut doc, &mut scheduler);
        animations.initialize_value_animations(&mut doc, &mut scheduler);
        animations.initialize_metrics_animations(&mut scheduler);
        let card = doc.query(".feature-card").unwrap().unwrap();
        animations.pulse(&mut doc, &mut scheduler, &card);

        assert_eq!(animations.sample_observers(&mut doc, 0.0), 0);
        assert!(scheduler.is_empty());
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_cleanup_disconnects() {
        let mut doc = reference_page();
        let mut animations = controller(true);
        animations.initialize(&mut doc, 0.0);
        assert!(animations.observed() > 0);
        animations.cleanup();
        assert_eq!(animations.observed(), 0);
        assert_eq!(animations.running_counters(), 0);
    }
}
