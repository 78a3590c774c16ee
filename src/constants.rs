//! Centralized constants for tagging behavior, UI sizing, and colors.

use eframe::egui::Color32;

// =============================================================================
// TAGGING DEFAULTS
// =============================================================================

/// Pointer distance, in image pixels, within which a tag's marker is shown.
pub const DEFAULT_REVEAL_RADIUS: f32 = 70.0;

/// Minimum time between proximity checks while the pointer moves.
pub const DEFAULT_THROTTLE_DELAY_MS: u64 = 1000;

/// Longest label accepted, in characters.
pub const DEFAULT_MAX_LABEL_LEN: usize = 64;

// =============================================================================
// WINDOW CONSTANTS
// =============================================================================

/// Initial window width when the application starts.
pub const INITIAL_WINDOW_WIDTH: f32 = 1024.0;

/// Initial window height when the application starts.
pub const INITIAL_WINDOW_HEIGHT: f32 = 768.0;

// =============================================================================
// TOOLBAR CONSTANTS
// =============================================================================

/// Spacing at the start of the toolbar.
pub const TOOLBAR_START_SPACING: f32 = 8.0;

/// Size of toolbar button icons.
pub const TOOLBAR_ICON_SIZE: f32 = 24.0;

/// Minimum size for toolbar buttons.
pub const TOOLBAR_BUTTON_SIZE: f32 = 32.0;

// =============================================================================
// MARKER RENDERING CONSTANTS
// =============================================================================

/// Radius of the dot drawn at a tag's exact position.
pub const MARKER_DOT_RADIUS: f32 = 4.0;

/// Font size for marker labels.
pub const MARKER_FONT_SIZE: f32 = 14.0;

/// Padding around the marker label text.
pub const MARKER_PADDING: f32 = 4.0;

/// Corner radius of the marker label background.
pub const MARKER_CORNER_RADIUS: f32 = 4.0;

/// Offset of the label from the tag position, so the dot stays visible.
pub const MARKER_LABEL_OFFSET: f32 = 8.0;

// =============================================================================
// INPUT OVERLAY CONSTANTS
// =============================================================================

/// Width of the label input field.
pub const INPUT_WIDTH: f32 = 160.0;

// =============================================================================
// COLORS
// =============================================================================

/// Background color for the toolbar.
pub const COLOR_TOOLBAR_BG: Color32 = Color32::from_rgb(30, 30, 30);

/// Marker label background (semi-transparent black).
pub const COLOR_MARKER_BG: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);

/// Marker label background for the tag nearest the pointer.
pub const COLOR_MARKER_BG_NEAREST: Color32 = Color32::from_rgba_premultiplied(0, 70, 140, 210);

/// Marker label text.
pub const COLOR_MARKER_TEXT: Color32 = Color32::WHITE;

/// Dot drawn at the tag position.
pub const COLOR_MARKER_DOT: Color32 = Color32::from_rgb(255, 200, 0);
