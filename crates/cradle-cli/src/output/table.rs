const GAP: &str = "  ";
const MIN_WIDTH: usize = 6;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render rows under `headers`, padded to a shared width per column.
///
/// Numeric cells are right-aligned. With `max_width` set, the widest columns
/// are capped to one common width until the table fits.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let floors = headers
        .iter()
        .map(|header| char_len(header).max(MIN_WIDTH))
        .collect::<Vec<_>>();
    let natural = floors
        .iter()
        .enumerate()
        .map(|(index, floor)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| char_len(cell))
                .fold(*floor, usize::max)
        })
        .collect::<Vec<_>>();
    let widths = match options.max_width {
        Some(max_width) => capped_widths(&natural, &floors, max_width),
        None => natural,
    };

    let mut out = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let rule = widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1);
    out.push('\n');
    out.push_str(&"-".repeat(rule));

    let key_value = headers.first() == Some(&"key");
    for row in rows {
        let cells = widths.iter().enumerate().map(|(index, width)| {
            let text = clip(row.get(index).map_or("-", String::as_str), *width);
            let padded = pad(&text, *width, looks_numeric(&text));
            if !options.color {
                return padded;
            }
            // Key/value tables color the value by its row's key.
            let column = match (key_value, index) {
                (true, 0) => "",
                (true, _) => row.first().map_or("", String::as_str),
                (false, _) => headers[index],
            };
            match color_code(column, &text) {
                Some(code) => format!("\u{1b}[{code}m{padded}\u{1b}[0m"),
                None => padded,
            }
        });
        out.push('\n');
        out.push_str(&cells.collect::<Vec<_>>().join(GAP));
    }
    out
}

/// Lower a shared cap on the widest columns until the row fits `max_width`.
/// No column drops below its floor, so very narrow terminals still overflow.
fn capped_widths(natural: &[usize], floors: &[usize], max_width: usize) -> Vec<usize> {
    let gaps = GAP.len() * natural.len().saturating_sub(1);
    let apply = |cap: usize| {
        natural
            .iter()
            .zip(floors)
            .map(|(width, floor)| (*width).min(cap).max(*floor))
            .collect::<Vec<_>>()
    };

    let widest = natural.iter().copied().max().unwrap_or(0);
    (MIN_WIDTH..=widest)
        .rev()
        .map(apply)
        .find(|widths| widths.iter().sum::<usize>() + gaps <= max_width)
        .unwrap_or_else(|| floors.to_vec())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn clip(value: &str, width: usize) -> String {
    if char_len(value) <= width {
        return value.to_string();
    }
    let mut out = value.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right: bool) -> String {
    if right {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn looks_numeric(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Measurements over their limit in red, within it in green.
fn color_code(column: &str, value: &str) -> Option<&'static str> {
    match (column, value) {
        ("exceeds_limit", "true") => Some("31"),
        ("exceeds_limit", "false") => Some("32"),
        ("skipped_lab_results", v) if v != "-" => Some("33"),
        _ => None,
    }
}
