// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (tab bar, track, preview, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - tab_bar: Renders the tab strip
// - columns: Renders the column track at the animator's offset
// - preview: Renders the preview pane for the focused item
// - legend: Renders hotkey legend
// - palette: Renders the jump-to palette
// - status_bar: Renders bottom status bar with path and metrics
// - dialogs: Renders inline input and delete confirmation
// - toast: Renders toast notifications (brief pop-up messages)

pub mod columns;
pub mod dialogs;
pub mod layout;
pub mod legend;
pub mod palette;
pub mod preview;
pub mod render;
pub mod status_bar;
pub mod tab_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
