//! Renderer configuration and the layout arithmetic derived from store data.
//!
//! Nothing here touches the store; a renderer reads toasts and heights from
//! [`ToastState`](crate::ToastState) and asks these options when a toast
//! should close and where it sits in the stack.

use crate::error::{Result, ToastError};
use crate::records::Toast;
use crate::types::{Direction, HeightEntry, Position, Theme, ToastClasses, ToastId, ToastKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time a toast stays on screen.
pub const DEFAULT_DURATION_MS: u64 = 4000;

/// Default number of toasts shown at once.
pub const DEFAULT_VISIBLE_TOASTS: usize = 3;

/// Default gap between expanded toasts, in pixels.
pub const DEFAULT_GAP: f32 = 14.0;

/// Default distance of the toaster from the screen edges.
pub const DEFAULT_OFFSET: &str = "32px";

/// Distance of the toaster from the screen edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Offset {
    /// Pixels.
    Px(f32),
    /// Any CSS length, e.g. `"2rem"`.
    Css(String),
}

impl Offset {
    /// CSS value for the offset. An empty string falls back to the default.
    pub fn to_css(&self) -> String {
        match self {
            Offset::Px(px) => format!("{}px", px),
            Offset::Css(css) if css.is_empty() => DEFAULT_OFFSET.to_string(),
            Offset::Css(css) => css.clone(),
        }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Offset::Css(DEFAULT_OFFSET.to_string())
    }
}

impl From<f32> for Offset {
    fn from(px: f32) -> Self {
        Offset::Px(px)
    }
}

impl From<&str> for Offset {
    fn from(css: &str) -> Self {
        Offset::Css(css.to_string())
    }
}

/// Defaults applied to every toast a toaster renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToastDefaults {
    pub class: Option<String>,
    pub description_class: Option<String>,
    pub style: Option<String>,
    pub cancel_button_style: Option<String>,
    pub action_button_style: Option<String>,
    /// Milliseconds; overrides the toaster-wide duration.
    pub duration: Option<u64>,
    pub unstyled: Option<bool>,
    pub classes: Option<ToastClasses>,
}

/// Options of the toaster component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToasterOptions {
    /// Dark toasts in light mode and vice versa.
    pub invert: bool,
    pub theme: Theme,
    pub position: Position,
    /// Keys that move focus to the toaster.
    pub hotkey: Vec<String>,
    /// More colorful success and error toasts.
    pub rich_colors: bool,
    /// Show toasts expanded instead of stacked.
    pub expand: bool,
    /// Milliseconds a toast stays on screen.
    pub duration: u64,
    pub visible_toasts: usize,
    pub close_button: bool,
    pub toast_options: ToastDefaults,
    /// Offset from the screen edges. `None` (JSON `null`) uses the default.
    pub offset: Option<Offset>,
    pub dir: Direction,
    pub gap: f32,
}

impl Default for ToasterOptions {
    fn default() -> Self {
        Self {
            invert: false,
            theme: Theme::default(),
            position: Position::default(),
            hotkey: vec!["altKey".to_string(), "KeyT".to_string()],
            rich_colors: false,
            expand: false,
            duration: DEFAULT_DURATION_MS,
            visible_toasts: DEFAULT_VISIBLE_TOASTS,
            close_button: false,
            toast_options: ToastDefaults::default(),
            offset: Some(Offset::default()),
            dir: Direction::default(),
            gap: DEFAULT_GAP,
        }
    }
}

impl ToasterOptions {
    /// Parse options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ToastError::InvalidOptions(e.to_string()))
    }

    /// Resolved CSS offset from the screen edges.
    pub fn offset_css(&self) -> String {
        self.offset
            .as_ref()
            .map_or_else(|| DEFAULT_OFFSET.to_string(), Offset::to_css)
    }

    /// Toaster-wide display time, after per-toaster toast defaults.
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.toast_options.duration.unwrap_or(self.duration))
    }

    /// How long a toast stays up before auto-closing.
    ///
    /// Loading toasts wait for their promise and never auto-close.
    pub fn expiry(&self, toast: &Toast) -> Option<Duration> {
        if toast.kind == ToastKind::Loading {
            return None;
        }
        Some(toast.duration().unwrap_or_else(|| self.default_duration()))
    }

    /// Whether the toast at `index` (newest first) is inside the visible window.
    pub fn is_visible(&self, index: usize) -> bool {
        index < self.visible_toasts
    }

    /// Distance of a toast from the toaster edge when expanded: the heights of
    /// all newer toasts plus one gap per toast in front of it.
    ///
    /// Returns `None` if no height has been reported for `id` yet.
    pub fn stack_offset(&self, heights: &[HeightEntry], id: &ToastId) -> Option<f32> {
        let index = heights.iter().position(|h| &h.toast_id == id)?;
        let before: f32 = heights[..index].iter().map(|h| h.height).sum();
        Some(index as f32 * self.gap + before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ToastData, ToastOptions};

    fn toast(kind: ToastKind, options: ToastOptions) -> Toast {
        Toast::from_data(ToastId::Num(0), ToastData::new(kind, "t").with_options(options))
    }

    #[test]
    fn test_defaults() {
        let options = ToasterOptions::default();

        assert_eq!(options.position, Position::BottomRight);
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.default_duration(), Duration::from_millis(4000));
        assert_eq!(options.visible_toasts, 3);
        assert_eq!(options.offset, Some(Offset::Css("32px".to_string())));
        assert_eq!(options.offset_css(), "32px");
        assert_eq!(options.gap, 14.0);
        assert_eq!(options.hotkey, vec!["altKey", "KeyT"]);
    }

    #[test]
    fn test_from_json_partial() {
        let options = ToasterOptions::from_json(
            r#"{"position":"top-center","richColors":true,"visibleToasts":5,"toastOptions":{"duration":1000}}"#,
        )
        .unwrap();

        assert_eq!(options.position, Position::TopCenter);
        assert!(options.rich_colors);
        assert_eq!(options.visible_toasts, 5);
        assert_eq!(options.default_duration(), Duration::from_millis(1000));
        // untouched fields keep defaults
        assert_eq!(options.duration, DEFAULT_DURATION_MS);
    }

    #[test]
    fn test_offset_forms() {
        let options = ToasterOptions::from_json(r#"{"offset": 24}"#).unwrap();
        assert_eq!(options.offset, Some(Offset::Px(24.0)));
        assert_eq!(options.offset_css(), "24px");

        let options = ToasterOptions::from_json(r#"{"offset": "2rem"}"#).unwrap();
        assert_eq!(options.offset, Some(Offset::from("2rem")));
        assert_eq!(options.offset_css(), "2rem");

        let options = ToasterOptions::from_json(r#"{"offset": null}"#).unwrap();
        assert_eq!(options.offset, None);
        assert_eq!(options.offset_css(), "32px");

        let options = ToasterOptions::from_json(r#"{"offset": ""}"#).unwrap();
        assert_eq!(options.offset_css(), "32px");
    }

    #[test]
    fn test_from_json_invalid() {
        let result = ToasterOptions::from_json(r#"{"position":"middle"}"#);
        assert!(matches!(result, Err(ToastError::InvalidOptions(_))));

        let result = ToasterOptions::from_json(r#"{"offset": true}"#);
        assert!(matches!(result, Err(ToastError::InvalidOptions(_))));
    }

    #[test]
    fn test_expiry() {
        let options = ToasterOptions::default();

        assert_eq!(
            options.expiry(&toast(ToastKind::Success, ToastOptions::new())),
            Some(Duration::from_millis(4000))
        );
        assert_eq!(
            options.expiry(&toast(
                ToastKind::Info,
                ToastOptions::new().with_duration(Duration::from_millis(300))
            )),
            Some(Duration::from_millis(300))
        );
        assert_eq!(
            options.expiry(&toast(ToastKind::Loading, ToastOptions::new())),
            None
        );
    }

    #[test]
    fn test_visible_window() {
        let options = ToasterOptions::default();
        assert!(options.is_visible(2));
        assert!(!options.is_visible(3));
    }

    #[test]
    fn test_stack_offset() {
        let options = ToasterOptions::default();
        let heights = vec![
            HeightEntry::new(3u64, 50.0),
            HeightEntry::new(2u64, 60.0),
            HeightEntry::new(1u64, 40.0),
        ];

        assert_eq!(options.stack_offset(&heights, &ToastId::Num(3)), Some(0.0));
        assert_eq!(options.stack_offset(&heights, &ToastId::Num(2)), Some(64.0));
        assert_eq!(options.stack_offset(&heights, &ToastId::Num(1)), Some(138.0));
        assert_eq!(options.stack_offset(&heights, &ToastId::Num(9)), None);
    }
}
