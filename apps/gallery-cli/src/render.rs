//! Plain-text rendering of a composed gallery view

use std::fmt::Write;

use gallery_core::{FlagCard, GalleryView};

/// Render every section as a heading followed by rows of cards.
pub fn render_view(view: &GalleryView) -> String {
    let mut output = String::new();
    let mode = if view.show_colors { "color" } else { "outline" };
    let _ = writeln!(
        output,
        "Flags ({} mode, {} per row)",
        mode, view.items_per_row
    );

    let per_row = view.items_per_row.max(1) as usize;
    for section in &view.sections {
        let _ = writeln!(output, "\n== {} ({}) ==", section.title, section.cards.len());
        for row in section.cards.chunks(per_row) {
            let cells: Vec<String> = row.iter().map(render_card).collect();
            let _ = writeln!(output, "  {}", cells.join("  |  "));
        }
    }
    output
}

fn render_card(card: &FlagCard) -> String {
    let mut cell = format!("{} {} <{}>", card.code, card.name, card.image_url);
    if card.hidden {
        cell.push_str(" [hidden]");
    }
    if !card.tags.is_empty() {
        let tags: Vec<&str> = card.tags.iter().collect();
        let _ = write!(cell, " #{}", tags.join(" #"));
    }
    cell
}
