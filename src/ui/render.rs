use crate::App;
use ratatui::Frame;

use notefinder::model::ui::Overlay;

use super::{columns, dialogs, layout, legend, palette, preview, status_bar, tab_bar, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let layout_info = layout::calculate_layout(size, app);

    tab_bar::render_tab_bar(f, layout_info.tab_area, &app.model.tabs);

    let tab = app.model.tabs.active();
    let geometry = app.model.track.geometry();
    columns::render_track(
        f,
        layout_info.track_area,
        tab,
        app.model.track.rendered_offset(),
        geometry.col_width,
        &app.model.clipboard.marks,
        app.model.clipboard.cut_buffer(),
        &mut app.list_offsets,
        app.model.track.is_sliding(),
    );

    if let Some(preview_area) = layout_info.preview_area {
        preview::render_preview(f, preview_area, tab, app.model.ui.preview_scroll);
    }

    legend::render_legend(f, layout_info.legend_area, legend::LegendState::from_app(app));
    status_bar::render_status_bar(f, layout_info.status_area, &app.model);

    // Overlays draw last, above everything but the toast
    match &app.model.ui.overlay {
        Overlay::None => {}
        Overlay::Input(input) => dialogs::render_input_dialog(f, input),
        Overlay::ConfirmDelete { item } => dialogs::render_delete_confirmation(f, item),
        Overlay::JumpPalette(state) => palette::render_palette(f, state),
    }

    if let Some((message, _)) = &app.model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
