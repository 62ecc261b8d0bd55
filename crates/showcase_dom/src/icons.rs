//! Icon replacement
//!
//! The page declares icons as `<i data-feather="name">` placeholders which an
//! external icon library swaps for inline SVG once at startup.

use showcase_core::Result;

use crate::document::{Document, DocumentExt};

/// External icon library
pub trait IconReplacer<D: Document + ?Sized> {
    /// Replace every icon placeholder, returning how many were replaced
    fn replace(&mut self, doc: &mut D) -> Result<usize>;
}

/// Icon library that is not loaded
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIcons;

impl<D: Document + ?Sized> IconReplacer<D> for NoIcons {
    fn replace(&mut self, _doc: &mut D) -> Result<usize> {
        Ok(0)
    }
}

/// Replaces `[data-feather]` placeholders with an empty `svg.feather`
///
/// Stands in for the Feather library when the page runs headless; the icon
/// artwork itself is irrelevant to the runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineIcons;

impl<D: Document + ?Sized> IconReplacer<D> for InlineIcons {
    fn replace(&mut self, doc: &mut D) -> Result<usize> {
        let placeholders = doc.query_all("[data-feather]")?;
        let mut replaced = 0;

        for element in placeholders {
            // Already replaced on an earlier call
            if !doc.children(&element).is_empty() {
                continue;
            }
            let Some(name) = doc.attribute(&element, "data-feather") else {
                continue;
            };
            let svg = doc.create_with_classes("svg", &["feather"]);
            doc.add_class(&svg, &format!("feather-{}", name));
            doc.append_child(&element, &svg);
            replaced += 1;
        }

        tracing::debug!("replaced {} icons", replaced);
        Ok(replaced)
    }
}
