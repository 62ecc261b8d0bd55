//! Loading optimizations
//!
//! Lazy images swap in their real source when they first come into view;
//! critical stylesheets and scripts get `<link rel="preload">` hints.

use showcase_animation::VisibilityObserver;
use showcase_core::{Margins, PreloadConfig};
use showcase_dom::{Document, DocumentExt};

const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";

/// Value of a preload link's `as` attribute for `asset`
pub fn preload_kind(asset: &str) -> &'static str {
    if asset.ends_with(".css") {
        "style"
    } else {
        "script"
    }
}

/// Lazy image loading and asset preloading
#[derive(Debug)]
pub struct PerformanceOptimizer<E> {
    images: VisibilityObserver<E>,
    preload: PreloadConfig,
    loaded: usize,
}

impl<E: Clone + PartialEq> PerformanceOptimizer<E> {
    pub fn new(preload: PreloadConfig) -> Self {
        Self {
            images: VisibilityObserver::new(0.0, Margins::default()),
            preload,
            loaded: 0,
        }
    }

    /// Images still waiting to load
    pub fn pending_images(&self) -> usize {
        self.images.len()
    }

    /// Images swapped to their real source so far
    pub fn loaded_images(&self) -> usize {
        self.loaded
    }

    /// Observe lazy images, load those already visible and add the preload
    /// hints
    pub fn initialize<D>(&mut self, doc: &mut D)
    where
        D: Document<Element = E> + ?Sized,
    {
        for image in doc.query_all(LAZY_IMAGE_SELECTOR).unwrap_or_default() {
            self.images.observe(image);
        }
        self.sample(doc);
        let hints = self.preload_assets(doc);
        tracing::info!(
            "performance optimizations initialized ({} lazy images, {} preloads)",
            self.images.len() + self.loaded,
            hints
        );
    }

    /// Load every observed image that entered the viewport
    pub fn sample<D>(&mut self, doc: &mut D) -> usize
    where
        D: Document<Element = E> + ?Sized,
    {
        if self.images.is_empty() {
            return 0;
        }
        let viewport = doc.viewport();
        let entries = self.images.sample(&viewport, |e| doc.bounding_rect(e));
        for entry in &entries {
            let image = &entry.element;
            if let Some(src) = doc.attribute(image, "data-src") {
                doc.set_attribute(image, "src", &src);
            }
            doc.remove_class(image, "lazy");
            self.images.unobserve(image);
            self.loaded += 1;
        }
        entries.len()
    }

    fn preload_assets<D>(&self, doc: &mut D) -> usize
    where
        D: Document<Element = E> + ?Sized,
    {
        let Some(head) = doc.head() else {
            tracing::warn!("no document head; skipping preload hints");
            return 0;
        };
        for asset in &self.preload.assets {
            let link = doc.create_element("link");
            doc.set_attribute(&link, "rel", "preload");
            doc.set_attribute(&link, "href", asset);
            doc.set_attribute(&link, "as", preload_kind(asset));
            doc.append_child(&head, &link);
        }
        self.preload.assets.len()
    }

    pub fn disconnect(&mut self) {
        self.images.disconnect();
    }
}
