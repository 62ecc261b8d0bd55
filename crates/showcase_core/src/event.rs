//! Page events
//!
//! Platform backends translate browser events into [`PageEvent`]s and feed
//! them to the orchestrator. Time does not travel in events: the backend
//! advances the orchestrator's clock separately on every animation frame.

use crate::section::Section;

/// Events delivered to the page orchestrator
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// The document finished parsing
    DomReady,
    /// The window scrolled
    Scroll {
        /// New vertical scroll offset
        y: f64,
    },
    /// The window was resized
    Resize {
        /// New viewport width in CSS pixels
        width: f64,
        /// New viewport height in CSS pixels
        height: f64,
    },
    /// A key was pressed anywhere in the document
    KeyDown(Key),
    /// Browser back/forward navigation
    PopState {
        /// URL fragment without the leading `#`
        fragment: String,
    },
    /// A navigation link was clicked
    NavLinkClicked {
        /// The link's `data-target`
        target: String,
    },
    /// The mobile menu toggle was clicked
    NavToggleClicked,
    /// The back-to-top button was clicked
    BackToTopClicked,
    /// A click landed on the diagram modal backdrop
    ModalBackdropClicked,
    /// A diagram asked to be shown enlarged
    EnlargeDiagram {
        /// Diagram id or its container id
        element_id: String,
    },
    /// The diagram modal close button was clicked
    CloseDiagramModal,
    /// The page is being unloaded
    Unload,
    /// An uncaught script error reached the window
    ScriptError { message: String },
    /// A promise rejection was never handled
    UnhandledRejection { reason: String },
}

/// Keys the page reacts to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Number row digit `0`..`9`
    Digit(u8),
    Escape,
    Other(String),
}

impl Key {
    /// Build from a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        if key == "Escape" || key == "Esc" {
            return Key::Escape;
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => Key::Digit(c as u8 - b'0'),
            _ => Key::Other(key.to_string()),
        }
    }

    /// Section reached through the digit shortcut, if any
    pub fn section(&self) -> Option<Section> {
        match self {
            Key::Digit(n) => Section::from_shortcut(*n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key("5"), Key::Digit(5));
        assert_eq!(Key::from_dom_key("F5"), Key::Other("F5".into()));
        assert_eq!(Key::from_dom_key("a"), Key::Other("a".into()));
    }

    #[test]
    fn test_digit_shortcuts() {
        assert_eq!(Key::Digit(3).section(), Some(Section::Performance));
        assert_eq!(Key::Digit(0).section(), None);
        assert_eq!(Key::Digit(8).section(), None);
        assert_eq!(Key::Escape.section(), None);
    }
}
