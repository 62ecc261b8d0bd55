//! Bindings to the page's script-tag libraries
//!
//! Mermaid and Feather are loaded as globals by the page. Both are optional:
//! when a global is missing the corresponding feature degrades.

use js_sys::{Function, Promise, Reflect, JSON};
use showcase_core::{Result, ShowcaseError};
use showcase_diagram::{DiagramRenderer, MermaidConfig};
use showcase_dom::{DocumentExt, IconReplacer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::document::{describe, WebDocument};

fn global(name: &str) -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

/// `window.mermaid`
#[derive(Debug, Default)]
pub struct MermaidRenderer {
    mermaid: Option<JsValue>,
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn library(&mut self) -> Result<JsValue> {
        if self.mermaid.is_none() {
            self.mermaid = global("mermaid");
        }
        self.mermaid
            .clone()
            .ok_or_else(|| ShowcaseError::RendererUnavailable("mermaid is not loaded".into()))
    }
}

impl DiagramRenderer<WebDocument> for MermaidRenderer {
    fn initialize(&mut self, config: &MermaidConfig) -> Result<()> {
        let mermaid = self.library()?;
        let initialize = method(&mermaid, "initialize")
            .ok_or_else(|| ShowcaseError::RendererUnavailable("mermaid.initialize".into()))?;

        let options = JSON::parse(&config.to_json()?)
            .map_err(|e| ShowcaseError::Config(describe(&e)))?;
        initialize
            .call1(&mermaid, &options)
            .map_err(|e| ShowcaseError::RendererUnavailable(describe(&e)))?;

        tracing::info!("mermaid initialized");
        Ok(())
    }

    fn render(&mut self, _doc: &mut WebDocument, host: &Element, _source: &str) -> Result<()> {
        let mermaid = self.library()?;
        let init = method(&mermaid, "init")
            .ok_or_else(|| ShowcaseError::RendererUnavailable("mermaid.init".into()))?;

        let result = init
            .call2(&mermaid, &JsValue::UNDEFINED, host)
            .map_err(|e| ShowcaseError::Render {
                diagram: host.id(),
                message: describe(&e),
            })?;

        // Newer releases render asynchronously; failures surface on the promise
        if let Ok(promise) = result.dyn_into::<Promise>() {
            let id = host.id();
            let on_error = Closure::once_into_js(move |reason: JsValue| {
                tracing::error!("diagram '{}' failed to render: {}", id, describe(&reason));
            });
            let _ = promise.catch(on_error.unchecked_ref());
        }
        Ok(())
    }
}

/// `window.feather`
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatherIcons;

impl IconReplacer<WebDocument> for FeatherIcons {
    fn replace(&mut self, doc: &mut WebDocument) -> Result<usize> {
        let Some(feather) = global("feather") else {
            tracing::debug!("feather is not loaded; icons left as placeholders");
            return Ok(0);
        };
        let replace = method(&feather, "replace")
            .ok_or_else(|| ShowcaseError::Other("feather.replace is not a function".into()))?;

        let placeholders = doc.query_all("[data-feather]")?.len();
        replace
            .call0(&feather)
            .map_err(|e| ShowcaseError::Other(describe(&e)))?;
        Ok(placeholders)
    }
}
