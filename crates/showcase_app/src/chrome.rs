//! Page chrome
//!
//! The navigation bar's scrolled look, the back-to-top button, the loading
//! splash and notification toasts.

use std::fmt;

use showcase_animation::Scheduler;
use showcase_core::{AppState, ChromeConfig};
use showcase_dom::{Document, DocumentExt, ScrollBehavior};

const NAV_ID: &str = "mainNav";
const BACK_TO_TOP_ID: &str = "backToTop";
const LOADING_SCREEN_ID: &str = "loading-screen";

const NAV_BACKGROUND_SCROLLED: &str = "rgba(255, 255, 255, 0.98)";
const NAV_BACKGROUND_TOP: &str = "rgba(255, 255, 255, 0.95)";
const NAV_SHADOW_SCROLLED: &str = "0 2px 20px rgba(0, 0, 0, 0.1)";

/// Inline style of a toast before it slides in
const NOTIFICATION_STYLES: [(&str, &str); 13] = [
    ("position", "fixed"),
    ("top", "20px"),
    ("right", "20px"),
    ("background", "white"),
    ("padding", "16px 20px"),
    ("border-radius", "8px"),
    ("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.15)"),
    ("z-index", "10000"),
    ("opacity", "0"),
    ("transform", "translateX(100%)"),
    ("transition", "all 0.3s ease"),
    ("max-width", "400px"),
    ("border-left", "4px solid var(--primary-color)"),
];

/// Deferred chrome work
#[derive(Clone, Debug, PartialEq)]
pub enum ChromeTask<E> {
    /// The splash faded out: take it out of layout
    FinishLoading,
    ShowNotification(E),
    HideNotification(E),
    RemoveNotification(E),
}

/// Toast flavor, selecting the `notification-<kind>` class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scroll-dependent chrome, the splash and toasts
#[derive(Clone, Debug)]
pub struct PageChrome {
    config: ChromeConfig,
    loading_fade_ms: u32,
}

impl PageChrome {
    pub fn new(config: ChromeConfig, loading_fade_ms: u32) -> Self {
        Self {
            config,
            loading_fade_ms,
        }
    }

    /// Opaque navigation bar with a shadow once the page has scrolled
    pub fn update_navigation_scroll<D: Document + ?Sized>(&self, doc: &mut D, scroll_y: f64) {
        let Some(nav) = doc.element_by_id(NAV_ID) else {
            return;
        };
        if scroll_y > self.config.nav_scrolled_threshold {
            doc.set_style(&nav, "background", NAV_BACKGROUND_SCROLLED);
            doc.set_style(&nav, "box-shadow", NAV_SHADOW_SCROLLED);
        } else {
            doc.set_style(&nav, "background", NAV_BACKGROUND_TOP);
            doc.set_style(&nav, "box-shadow", "none");
        }
    }

    pub fn update_back_to_top<D: Document + ?Sized>(&self, doc: &mut D, scroll_y: f64) {
        let Some(button) = doc.element_by_id(BACK_TO_TOP_ID) else {
            return;
        };
        if scroll_y > self.config.back_to_top_threshold {
            doc.add_class(&button, "visible");
        } else {
            doc.remove_class(&button, "visible");
        }
    }

    pub fn scroll_to_top<D: Document + ?Sized>(&self, doc: &mut D) {
        doc.scroll_to(0.0, ScrollBehavior::Smooth);
    }

    // =========================================================================
    // Loading splash
    // =========================================================================

    /// Start fading the splash out
    ///
    /// Returns false when the page has no splash; the caller then finishes
    /// loading right away.
    pub fn hide_loading_screen<D, T>(&self, doc: &mut D, scheduler: &mut Scheduler<T>) -> bool
    where
        D: Document + ?Sized,
        T: From<ChromeTask<D::Element>>,
    {
        let Some(splash) = doc.element_by_id(LOADING_SCREEN_ID) else {
            tracing::warn!("loading screen not found");
            return false;
        };
        doc.add_class(&splash, "hidden");
        scheduler.set_timeout(self.loading_fade_ms, ChromeTask::FinishLoading.into());
        true
    }

    pub fn finish_loading<D: Document + ?Sized>(&self, doc: &mut D, state: &mut AppState) {
        if let Some(splash) = doc.element_by_id(LOADING_SCREEN_ID) {
            doc.set_style(&splash, "display", "none");
        }
        state.finish_loading();
        tracing::info!("page loaded");
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Append a toast to the body; it slides in shortly after and hides
    /// itself after the configured timeout
    pub fn show_notification<D, T>(
        &self,
        doc: &mut D,
        scheduler: &mut Scheduler<T>,
        message: &str,
        kind: NotificationKind,
    ) -> Option<D::Element>
    where
        D: Document + ?Sized,
        T: From<ChromeTask<D::Element>>,
    {
        let Some(body) = doc.body() else {
            tracing::warn!("cannot show notification without a body");
            return None;
        };

        let kind_class = format!("notification-{}", kind);
        let toast = doc.create_with_classes("div", &["notification", kind_class.as_str()]);
        let content = doc.create_with_classes("div", &["notification-content"]);
        let text = doc.create_with_classes("span", &["notification-message"]);
        doc.set_text_content(&text, message);
        let close = doc.create_with_classes("button", &["notification-close"]);
        doc.set_text_content(&close, "×");
        doc.append_child(&content, &text);
        doc.append_child(&content, &close);
        doc.append_child(&toast, &content);

        for (property, value) in NOTIFICATION_STYLES {
            doc.set_style(&toast, property, value);
        }
        doc.append_child(&body, &toast);

        scheduler.set_timeout(
            self.config.notification_show_delay_ms,
            ChromeTask::ShowNotification(toast.clone()).into(),
        );
        scheduler.set_timeout(
            self.config.notification_timeout_ms,
            ChromeTask::HideNotification(toast.clone()).into(),
        );
        tracing::debug!("notification ({}): {}", kind, message);
        Some(toast)
    }

    /// Slide a toast out; it is removed once the exit transition ends
    pub fn hide_notification<D, T>(&self, doc: &mut D, scheduler: &mut Scheduler<T>, toast: &D::Element)
    where
        D: Document + ?Sized,
        T: From<ChromeTask<D::Element>>,
    {
        doc.set_style(toast, "opacity", "0");
        doc.set_style(toast, "transform", "translateX(100%)");
        scheduler.set_timeout(
            self.config.notification_exit_ms,
            ChromeTask::RemoveNotification(toast.clone()).into(),
        );
    }

    /// Carry out a task scheduled by this component
    pub fn run_task<D, T>(
        &self,
        doc: &mut D,
        scheduler: &mut Scheduler<T>,
        state: &mut AppState,
        task: ChromeTask<D::Element>,
    ) where
        D: Document + ?Sized,
        T: From<ChromeTask<D::Element>>,
    {
        match task {
            ChromeTask::FinishLoading => self.finish_loading(doc, state),
            ChromeTask::ShowNotification(toast) => {
                doc.set_style(&toast, "opacity", "1");
                doc.set_style(&toast, "transform", "translateX(0)");
            }
            ChromeTask::HideNotification(toast) => self.hide_notification(doc, scheduler, &toast),
            ChromeTask::RemoveNotification(toast) => {
                if doc.is_connected(&toast) {
                    doc.remove(&toast);
                }
            }
        }
    }
}
