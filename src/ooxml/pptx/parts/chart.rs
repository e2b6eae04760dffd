/// Chart parts for PowerPoint presentations.
///
/// Corresponds to `/ppt/charts/chartN.xml`. Only the cached series data is
/// read: series names, the category axis of the first series and each
/// series' values. That is enough for a caller to draw a bar chart.
use crate::common::xml::XmlElement;
use crate::presentation::ChartData;

/// Points beyond this index are ignored.
const MAX_POINTS: usize = 100_000;

/// Extract series data from a chart part's root element.
///
/// Returns `None` when the chart holds no series.
///
/// # Examples
///
/// ```rust
/// use deckread::common::xml::XmlDocument;
/// use deckread::ooxml::pptx::parts::chart_data;
///
/// let doc = XmlDocument::parse(r#"<c:chartSpace><c:chart><c:plotArea><c:barChart>
///   <c:ser>
///     <c:tx><c:strRef><c:strCache><c:pt idx="0"><c:v>Sales</c:v></c:pt></c:strCache></c:strRef></c:tx>
///     <c:cat><c:strRef><c:strCache><c:pt idx="0"><c:v>Q1</c:v></c:pt><c:pt idx="1"><c:v>Q2</c:v></c:pt></c:strCache></c:strRef></c:cat>
///     <c:val><c:numRef><c:numCache><c:pt idx="0"><c:v>1.5</c:v></c:pt><c:pt idx="1"><c:v>2</c:v></c:pt></c:numCache></c:numRef></c:val>
///   </c:ser>
/// </c:barChart></c:plotArea></c:chart></c:chartSpace>"#).unwrap();
/// let data = chart_data(&doc.root).unwrap();
/// assert_eq!(data.headers, ["Sales"]);
/// assert_eq!(data.categories, ["Q1", "Q2"]);
/// assert_eq!(data.values, [vec![1.5, 2.0]]);
/// ```
pub fn chart_data(root: &XmlElement) -> Option<ChartData> {
    let series = root.descendants("ser");
    if series.is_empty() {
        return None;
    }

    let mut data = ChartData::default();
    for (index, ser) in series.iter().enumerate() {
        let name = ser
            .child("tx")
            .map(|tx| {
                let cached = point_texts(tx);
                if cached.is_empty() {
                    tx.text().trim().to_string()
                } else {
                    cached.join(" ")
                }
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Series {}", index + 1));
        data.headers.push(name);

        if data.categories.is_empty()
            && let Some(cat) = ser.child("cat")
        {
            data.categories = point_texts(cat);
        }

        let values = ser
            .child("val")
            .or_else(|| ser.child("yVal"))
            .map(point_values)
            .unwrap_or_default();
        data.values.push(values);
    }

    // Categories may be absent; number them after the longest series
    if data.categories.is_empty() {
        let count = data.values.iter().map(Vec::len).max().unwrap_or(0);
        data.categories = (1..=count).map(|i| i.to_string()).collect();
    }
    Some(data)
}

/// Cached points of a data reference, placed at their `idx`.
fn cached_points(container: &XmlElement) -> Vec<(usize, String)> {
    container
        .descendants("pt")
        .into_iter()
        .filter_map(|pt| {
            let idx = pt
                .attr("idx")
                .and_then(|v| atoi_simd::parse::<usize>(v.as_bytes()).ok())
                .filter(|&idx| idx < MAX_POINTS)?;
            let value = pt.child("v").map(XmlElement::text).unwrap_or_default();
            Some((idx, value))
        })
        .collect()
}

/// Text points, with missing indices left empty.
fn point_texts(container: &XmlElement) -> Vec<String> {
    let points = cached_points(container);
    let len = points.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
    let mut out = vec![String::new(); len];
    for (idx, value) in points {
        out[idx] = value;
    }
    out
}

/// Numeric points; missing or unparsable values become zero.
fn point_values(container: &XmlElement) -> Vec<f64> {
    let points = cached_points(container);
    let len = points.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
    let mut out = vec![0.0; len];
    for (idx, value) in points {
        out[idx] = fast_float2::parse::<f64, _>(value.trim()).unwrap_or(0.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::XmlDocument;

    #[test]
    fn test_sparse_points_and_default_names() {
        let doc = XmlDocument::parse(
            r#"<c:chartSpace><c:ser>
                <c:val><c:numRef><c:numCache><c:ptCount val="3"/>
                    <c:pt idx="2"><c:v>7</c:v></c:pt><c:pt idx="0"><c:v>x</c:v></c:pt>
                </c:numCache></c:numRef></c:val>
            </c:ser><c:ser><c:tx><c:v>Direct</c:v></c:tx></c:ser></c:chartSpace>"#,
        )
        .unwrap();
        let data = chart_data(&doc.root).unwrap();
        assert_eq!(data.headers, ["Series 1", "Direct"]);
        assert_eq!(data.values[0], [0.0, 0.0, 7.0]);
        assert!(data.values[1].is_empty());
        assert_eq!(data.categories, ["1", "2", "3"]);
    }

    #[test]
    fn test_no_series() {
        let doc = XmlDocument::parse("<c:chartSpace><c:chart/></c:chartSpace>").unwrap();
        assert!(chart_data(&doc.root).is_none());
    }
}
