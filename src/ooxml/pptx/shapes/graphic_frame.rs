/// Graphic frames: tables and charts.
///
/// A `p:graphicFrame` wraps `a:graphic/a:graphicData`, whose single child
/// decides the content. DrawingML tables are inline; charts live in their
/// own part referenced by `c:chart/@r:id`. Other content (SmartArt, OLE
/// objects) is skipped.
use super::textframe::parse_text_body;
use super::{GroupTransform, ShapeContext};
use crate::common::xml::XmlElement;
use crate::ooxml::pptx::parts::chart_data;
use crate::presentation::{RunStyle, Shape};

/// Convert a `p:graphicFrame` element.
pub fn frame_shape(frame: &XmlElement, ctx: &ShapeContext, transform: &GroupTransform) -> Option<Shape> {
    let data = frame.path(&["graphic", "graphicData"])?;

    if let Some(tbl) = data.child("tbl") {
        return Some(Shape::Table {
            props: ctx.props(frame, transform),
            data: table_cells(tbl, ctx),
        });
    }

    if let Some(chart) = data.child("chart") {
        let r_id = chart.attr("r:id")?;
        let uri = ctx.part.rels.target_of(r_id)?;
        let Some(doc) = ctx.package.read_xml(uri.membername()) else {
            log::debug!("Chart part {} is missing", uri);
            return None;
        };
        return Some(Shape::Chart {
            props: ctx.props(frame, transform),
            data: chart_data(&doc.root)?,
        });
    }

    log::debug!("Skipping unsupported graphic frame in {}", ctx.part.uri);
    None
}

/// Cell texts of an `a:tbl`, padded so every row has the same width.
fn table_cells(tbl: &XmlElement, ctx: &ShapeContext) -> Vec<Vec<String>> {
    let base = RunStyle::default();
    let mut rows: Vec<Vec<String>> = tbl
        .children_named("tr")
        .map(|tr| {
            tr.children_named("tc")
                .map(|tc| {
                    tc.child("txBody")
                        .map(|body| parse_text_body(body, &base, ctx.colors).text())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::super::tests::shapes_of;
    use crate::presentation::Shape;

    #[test]
    fn test_table() {
        let shapes = shapes_of(
            r#"<p:spTree><p:graphicFrame>
                <p:xfrm><a:off x="0" y="0"/><a:ext cx="952500" cy="952500"/></p:xfrm>
                <a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl>
                    <a:tr><a:tc><a:txBody><a:p><a:r><a:t>A</a:t></a:r></a:p><a:p><a:r><a:t>B</a:t></a:r></a:p></a:txBody></a:tc>
                          <a:tc><a:txBody><a:p><a:r><a:t>C</a:t></a:r></a:p></a:txBody></a:tc></a:tr>
                    <a:tr><a:tc><a:txBody><a:p/></a:txBody></a:tc></a:tr>
                </a:tbl></a:graphicData></a:graphic>
            </p:graphicFrame></p:spTree>"#,
            &[],
            false,
        );
        let Shape::Table { props, data } = &shapes[0] else {
            panic!("expected a table, got {:?}", shapes);
        };
        assert_eq!(props.bounds.cx, 100);
        assert_eq!(data, &[vec!["A\nB", "C"], vec!["", ""]]);
    }

    #[test]
    fn test_chart() {
        let rels = r#"<Relationships><Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="../charts/chart1.xml"/></Relationships>"#;
        let chart = r#"<c:chartSpace><c:chart><c:plotArea><c:barChart><c:ser>
            <c:tx><c:v>Revenue</c:v></c:tx>
            <c:val><c:numRef><c:numCache><c:pt idx="0"><c:v>3</c:v></c:pt></c:numCache></c:numRef></c:val>
        </c:ser></c:barChart></c:plotArea></c:chart></c:chartSpace>"#;
        let shapes = shapes_of(
            r#"<p:spTree><p:graphicFrame>
                <p:xfrm><a:off x="0" y="0"/><a:ext cx="9525" cy="9525"/></p:xfrm>
                <a:graphic><a:graphicData><c:chart r:id="rId4"/></a:graphicData></a:graphic>
            </p:graphicFrame></p:spTree>"#,
            &[
                ("ppt/slides/_rels/slide1.xml.rels", rels.as_bytes()),
                ("ppt/charts/chart1.xml", chart.as_bytes()),
            ],
            false,
        );
        let Shape::Chart { data, .. } = &shapes[0] else {
            panic!("expected a chart, got {:?}", shapes);
        };
        assert_eq!(data.headers, ["Revenue"]);
        assert_eq!(data.categories, ["1"]);
        assert_eq!(data.values, [vec![3.0]]);
    }
}
