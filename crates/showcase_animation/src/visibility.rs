//! Viewport-entry observation
//!
//! A polling counterpart of `IntersectionObserver`: the owner samples the
//! observer with the current element boxes (after scrolls, resizes and at
//! startup) and gets back the elements that just crossed the threshold.

use showcase_core::{intersection_ratio, Margins, Rect, Viewport};

/// An element that newly became visible
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityEntry<E> {
    pub element: E,
    pub ratio: f64,
}

#[derive(Clone, Debug)]
struct Target<E> {
    element: E,
    intersecting: bool,
}

/// Reports not-intersecting → intersecting transitions
///
/// Element handles only need equality; browser handles cannot be hashed.
#[derive(Clone, Debug)]
pub struct VisibilityObserver<E> {
    threshold: f64,
    root_margin: Margins,
    targets: Vec<Target<E>>,
}

impl<E: Clone + PartialEq> VisibilityObserver<E> {
    pub fn new(threshold: f64, root_margin: Margins) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin,
            targets: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start observing; observing twice is a no-op
    pub fn observe(&mut self, element: E) {
        if !self.is_observing(&element) {
            self.targets.push(Target {
                element,
                intersecting: false,
            });
        }
    }

    pub fn unobserve(&mut self, element: &E) {
        self.targets.retain(|t| t.element != *element);
    }

    /// Stop observing everything
    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, element: &E) -> bool {
        self.targets.iter().any(|t| t.element == *element)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Check every target against the viewport
    ///
    /// `rect_of` returns an element's viewport-relative box. Entries come
    /// back in observation order.
    pub fn sample<F>(&mut self, viewport: &Viewport, mut rect_of: F) -> Vec<VisibilityEntry<E>>
    where
        F: FnMut(&E) -> Rect,
    {
        let threshold = self.threshold;
        let crosses = |ratio: f64| {
            if threshold == 0.0 {
                ratio > 0.0
            } else {
                ratio >= threshold
            }
        };

        let mut entries = Vec::new();
        for target in &mut self.targets {
            let ratio = intersection_ratio(&rect_of(&target.element), viewport, &self.root_margin);
            let now_visible = crosses(ratio);
            if now_visible && !target.intersecting {
                entries.push(VisibilityEntry {
                    element: target.element.clone(),
                    ratio,
                });
            }
            target.intersecting = now_visible;
        }
        entries
    }
}
