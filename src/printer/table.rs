use std::fmt::Display;

use console::style;

/// Left-aligned columns separated by two spaces, upper-cased header first.
pub fn render_column_table<R, C>(headers: &[&str], rows: R) -> Vec<String>
where
    R: IntoIterator<Item = Vec<C>>,
    C: Display,
{
    let headers: Vec<String> = headers.iter().map(|h| h.to_uppercase()).collect();
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(&headers[..]));
    lines.extend(rows.iter().map(|row| render_row(row.as_slice())));
    lines
}

pub fn column_table<R, C>(headers: &[&str], rows: R)
where
    R: IntoIterator<Item = Vec<C>>,
    C: Display,
{
    let mut lines = render_column_table(headers, rows).into_iter();
    if let Some(head) = lines.next() {
        println!("{}", style(head).dim());
    }
    for line in lines {
        println!("{}", line);
    }
}

/// `key : value` lines with keys padded to a common width.
pub fn render_key_value_table<K, V>(pairs: &[(K, V)], indent: usize) -> Vec<(String, String)>
where
    K: Display,
    V: Display,
{
    let keys: Vec<String> = pairs.iter().map(|(k, _)| k.to_string()).collect();
    let longest = keys.iter().map(|k| k.chars().count()).max().unwrap_or(0);
    let padding = " ".repeat(indent);

    keys.into_iter()
        .zip(pairs.iter())
        .map(|(key, (_, value))| {
            let gap = " ".repeat(longest - key.chars().count() + 2);
            (format!("{}{}", padding, key), format!("{}: {}", gap, value))
        })
        .collect()
}

pub fn key_value_table<K, V>(pairs: &[(K, V)], indent: usize)
where
    K: Display,
    V: Display,
{
    for (key, rest) in render_key_value_table(pairs, indent) {
        println!("{}{}", style(key).dim(), rest);
    }
}
