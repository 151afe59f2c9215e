//! Terminal rendering of a [`FilterView`].

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use facet_client::ConfigError;
use facet_engine::{FacetStatus, FacetView, FilterView, ResultRegion};

/// One table per facet, separated by blank lines.
pub fn render_facets(view: &FilterView) -> String {
    view.facets
        .iter()
        .map(render_facet)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_facet(facet: &FacetView) -> String {
    let mut out = format!("{} ({})", facet.facet.label(), status_text(facet.status));

    if let Some(error) = &facet.error {
        out.push_str(&format!("\n  {error}"));
        return out;
    }

    if facet.options.is_empty() {
        out.push_str("\n  no options");
    } else {
        out.push('\n');
        out.push_str(&options_table(facet).to_string());
    }

    if !facet.missing.is_empty() {
        let ids: Vec<String> = facet.missing.iter().map(ToString::to_string).collect();
        out.push_str(&format!(
            "\n  selected but not listed: {}",
            ids.join(", ")
        ));
    }
    out
}

fn options_table(facet: &FacetView) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(""), header_cell("ID"), header_cell("Label")]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for option in &facet.options {
        let marker = if option.selected {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new("")
        };
        let label = if option.selected {
            Cell::new(&option.label).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&option.label)
        };
        table.add_row(vec![marker, Cell::new(option.id), label]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_text(status: FacetStatus) -> &'static str {
    match status {
        FacetStatus::Idle => "ready",
        FacetStatus::Loading => "loading",
        FacetStatus::Error => "error",
    }
}

/// The result line, `None` when there is nothing to show.
pub fn render_result(result: &ResultRegion) -> Option<String> {
    match result {
        ResultRegion::Hidden => None,
        region => Some(region.to_string()),
    }
}

/// Text printed for a command that could not run.
///
/// Setup errors lead with their short message; the full chain follows.
pub fn render_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ConfigError>() {
        Some(config) => format!("{}\n  caused by: {error:#}", config.user_message()),
        None => format!("{error:#}"),
    }
}
