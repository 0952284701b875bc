use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Scalars go into one key/value table; every nested map or array of
/// objects gets its own titled section below it.
fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    let map = match serde_json::to_value(value)? {
        Value::Object(map) => map,
        Value::Array(items) => return Ok(render_array_table(&items, options)),
        scalar => {
            let rows = [vec![value_to_cell(&scalar)]];
            return Ok(table::render_entity_table(&["value"], &rows, options));
        }
    };

    let mut entries = map.into_iter().collect::<Vec<_>>();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut rows = Vec::new();
    let mut sections = Vec::new();
    for (key, value) in entries {
        match value {
            Value::Object(nested) => sections.push((key, render_count_table(&nested, options))),
            Value::Array(items) if items.iter().any(Value::is_object) => {
                sections.push((key, render_array_table(&items, options)));
            }
            other => rows.push(vec![key, value_to_cell(&other)]),
        }
    }

    let mut out = table::render_entity_table(&["key", "value"], &rows, options);
    for (title, body) in sections {
        out.push_str("\n\n");
        out.push_str(&title);
        out.push('\n');
        out.push_str(&body);
    }
    Ok(out)
}

/// `by_brand` / `by_category` style maps, largest first.
fn render_count_table(map: &Map<String, Value>, options: table::TableOptions) -> String {
    if map.is_empty() {
        return String::from("(no rows)");
    }

    let mut entries = map.iter().collect::<Vec<_>>();
    entries.sort_by(|a, b| {
        let count = |v: &Value| v.as_u64().unwrap_or(0);
        count(b.1).cmp(&count(a.1)).then_with(|| a.0.cmp(b.0))
    });
    let rows = entries
        .into_iter()
        .map(|(name, count)| vec![name.clone(), value_to_cell(count)])
        .collect::<Vec<_>>();
    table::render_entity_table(&["name", "count"], &rows, options)
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let all_objects = items.iter().all(Value::is_object);
    if !all_objects {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => {
            if items.is_empty() {
                String::from("-")
            } else {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
