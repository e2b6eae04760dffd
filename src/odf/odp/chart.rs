//! Embedded chart objects.
//!
//! A chart frame points at a sub-document (`draw:object/@xlink:href`, e.g.
//! `./Object 1`) whose `content.xml` holds an `office:chart`. The chart's
//! local `table:table` carries the data: the first row names the series,
//! the first column names the categories.

use crate::common::ZipPackage;
use crate::common::xml::XmlElement;
use crate::presentation::ChartData;

/// Cap on repeated rows and columns.
const MAX_REPEAT: usize = 1000;

/// Read the chart data of an embedded object.
///
/// Returns `None` when the object is missing, is not a chart or holds no
/// data table.
pub fn chart_from_object(package: &ZipPackage, href: &str) -> Option<ChartData> {
    let dir = href.trim_start_matches("./").trim_end_matches('/');
    let doc = package.read_xml(&format!("{}/content.xml", dir))?;
    let chart = doc.root.first_descendant("chart")?;
    let table = chart.first_descendant("table")?;
    chart_data(table)
}

/// Derive series data from a chart's data table.
pub fn chart_data(table: &XmlElement) -> Option<ChartData> {
    let rows = table_rows(table);
    let (header, body) = rows.split_first()?;
    if header.len() < 2 {
        return None;
    }

    let headers: Vec<String> = header[1..]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if name.trim().is_empty() {
                format!("Series {}", i + 1)
            } else {
                name.trim().to_string()
            }
        })
        .collect();
    let categories = body
        .iter()
        .map(|row| row.first().cloned().unwrap_or_default())
        .collect();
    let values = (1..header.len())
        .map(|col| {
            body.iter()
                .map(|row| {
                    row.get(col)
                        .and_then(|v| fast_float2::parse::<f64, _>(v.trim()).ok())
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    Some(ChartData {
        headers,
        categories,
        values,
    })
}

/// Cell values of every row, header rows included, in document order.
///
/// Numeric cells contribute their `office:value`, others their text.
fn table_rows(table: &XmlElement) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for row in table.descendants("table-row") {
        let repeat = repeat_count(row, "table:number-rows-repeated");
        let mut cells = Vec::new();
        for cell in row.elements() {
            if !matches!(cell.local_name(), "table-cell" | "covered-table-cell") {
                continue;
            }
            let value = cell
                .attr("office:value")
                .map(str::to_string)
                .unwrap_or_else(|| cell.text());
            let repeat = repeat_count(cell, "table:number-columns-repeated");
            cells.extend(std::iter::repeat_n(value, repeat));
        }
        for _ in 0..repeat {
            if rows.len() >= MAX_REPEAT {
                return rows;
            }
            rows.push(cells.clone());
        }
    }
    rows
}

fn repeat_count(el: &XmlElement, attr: &str) -> usize {
    el.attr(attr)
        .and_then(|v| atoi_simd::parse::<usize>(v.as_bytes()).ok())
        .unwrap_or(1)
        .clamp(1, MAX_REPEAT)
}
