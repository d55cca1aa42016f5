use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pseudobtag::histogram::Histogram1D;
use pseudobtag::summary::ScoreSummary;
use pseudobtag::BinTable;

const BAR_WIDTH: usize = 40;

fn fmt_bounds(bins: &BinTable, bin: usize) -> String {
    match bins.bounds(bin) {
        Some((lo, hi)) => format!("[{}, {})", lo, hi),
        None => "?".to_string(),
    }
}

/// Jets and mean score per (|eta|, pT) cell.
pub fn print_bin_summary(summary: &ScoreSummary, pt_bins: &BinTable, abs_eta_bins: &BinTable) {
    let n_pt = pt_bins.n_bins();

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("|eta| \\ pT").add_attribute(Attribute::Bold)];
    for pt_bin in 0..n_pt {
        header.push(Cell::new(fmt_bounds(pt_bins, pt_bin)).fg(Color::Cyan));
    }
    table.set_header(header);

    for eta_bin in 0..abs_eta_bins.n_bins() {
        let mut row = vec![Cell::new(fmt_bounds(abs_eta_bins, eta_bin))];
        for pt_bin in 0..n_pt {
            let cell = &summary.cells[eta_bin * n_pt + pt_bin];
            let text = match cell.mean_score() {
                Some(mean) => format!("{} ({}b) {:.3}", cell.jets, cell.signal_jets, mean),
                None => "-".to_string(),
            };
            row.push(Cell::new(text).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }

    println!("\n=== SCORE SUMMARY: jets (b-jets) mean ===");
    println!("{}", table);
    println!(
        "Total: {} | Outside bins: {} | Unscored: {}",
        summary.total_jets, summary.sentinel_jets, summary.unscored_jets
    );
}

pub fn print_window_histogram(hist: &Histogram1D, pt_window: (f64, f64), eta_window: (f64, f64)) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new("Count").fg(Color::Cyan),
        Cell::new(""),
    ]);

    let max = hist.contents().iter().cloned().fold(0.0f64, f64::max);
    for (bin, &count) in hist.contents().iter().enumerate() {
        let (lo, hi) = hist.bin_bounds(bin);
        let width = if max > 0.0 {
            ((count / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        table.add_row(vec![
            Cell::new(format!("[{:.2}, {:.2})", lo, hi)),
            Cell::new(format!("{}", count)).set_alignment(CellAlignment::Right),
            Cell::new("#".repeat(width)).fg(Color::Green),
        ]);
    }

    println!(
        "\n=== SCORES: pT in [{}, {}), |eta| in [{}, {}) ===",
        pt_window.0, pt_window.1, eta_window.0, eta_window.1
    );
    println!("{}", table);
    println!(
        "In range: {} | Below 0 (incl. sentinel): {} | Above 1: {}",
        hist.integral(),
        hist.underflow(),
        hist.overflow()
    );
}
