//! Shapes placed on a slide.

use super::text::TextBody;
use crate::common::RGBColor;
use crate::common::media::is_displayable_mime;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Position and size of a shape, in slide pixels.
///
/// Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl BoundingBox {
    /// Build a box, clamping negative extents to zero.
    pub fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self {
            x,
            y,
            cx: cx.max(0),
            cy: cy.max(0),
        }
    }

    /// Build a box from fractional pixel values, rounding each edge.
    pub fn from_f64(x: f64, y: f64, cx: f64, cy: f64) -> Self {
        Self::new(
            x.round() as i64,
            y.round() as i64,
            cx.round() as i64,
            cy.round() as i64,
        )
    }
}

/// Shape fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    None,
    Solid { color: RGBColor },
}

/// Geometry hint for renderers that only draw boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Geometry {
    RoundRect,
    Ellipse,
}

impl Geometry {
    /// Map a preset/ODF geometry keyword to a hint.
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "roundRect" | "round-rectangle" | "flowChartAlternateProcess" => Some(Self::RoundRect),
            "ellipse" | "circle" | "flowChartConnector" => Some(Self::Ellipse),
            _ => None,
        }
    }
}

/// Properties shared by every kind of shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProps {
    #[serde(rename = "box")]
    pub bounds: BoundingBox,
    /// Inherited from a master or layout rather than defined on the slide
    pub is_master: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geom: Option<Geometry>,
}

impl ShapeProps {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn with_master(mut self, is_master: bool) -> Self {
        self.is_master = is_master;
        self
    }
}

/// Embedded picture bytes and their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Whether a browser-like renderer can draw this picture as is.
    pub fn is_displayable(&self) -> bool {
        is_displayable_mime(&self.mime)
    }

    /// Self-contained `data:` URI for the picture.
    ///
    /// ```
    /// use deckread::ImageData;
    /// let img = ImageData::new("image/png", vec![1, 2, 3]);
    /// assert_eq!(img.to_data_uri(), "data:image/png;base64,AQID");
    /// ```
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

impl Serialize for ImageData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ImageData", 2)?;
        state.serialize_field("src", &self.to_data_uri())?;
        state.serialize_field("mime", &self.mime)?;
        state.end()
    }
}

/// Aggregated chart data, enough to draw a simple bar chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartData {
    /// Series names
    pub headers: Vec<String>,
    pub categories: Vec<String>,
    /// `values[series][category]`
    pub values: Vec<Vec<f64>>,
}

/// A shape on a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Text {
        #[serde(flatten)]
        props: ShapeProps,
        #[serde(rename = "textData")]
        text: TextBody,
    },
    Image {
        #[serde(flatten)]
        props: ShapeProps,
        #[serde(flatten)]
        image: ImageData,
    },
    Shape {
        #[serde(flatten)]
        props: ShapeProps,
    },
    Table {
        #[serde(flatten)]
        props: ShapeProps,
        data: Vec<Vec<String>>,
    },
    Chart {
        #[serde(flatten)]
        props: ShapeProps,
        data: ChartData,
    },
}

impl Shape {
    pub fn props(&self) -> &ShapeProps {
        match self {
            Shape::Text { props, .. }
            | Shape::Image { props, .. }
            | Shape::Shape { props }
            | Shape::Table { props, .. }
            | Shape::Chart { props, .. } => props,
        }
    }

    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        self.props().bounds
    }

    #[inline]
    pub fn is_master(&self) -> bool {
        self.props().is_master
    }

    /// The serialized kind tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Text { .. } => "text",
            Shape::Image { .. } => "image",
            Shape::Shape { .. } => "shape",
            Shape::Table { .. } => "table",
            Shape::Chart { .. } => "chart",
        }
    }

    pub fn text_body(&self) -> Option<&TextBody> {
        match self {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageData> {
        match self {
            Shape::Image { image, .. } => Some(image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::text::{Paragraph, RunStyle};

    #[test]
    fn test_negative_extent_clamped() {
        let b = BoundingBox::new(5, 5, -3, 10);
        assert_eq!(b.cx, 0);
        assert_eq!(b.cy, 10);
    }

    #[test]
    fn test_text_shape_json() {
        let mut p = Paragraph::new();
        p.push_text("Hi", &RunStyle::default());
        let shape = Shape::Text {
            props: ShapeProps::new(BoundingBox::new(0, 0, 96, 96)),
            text: TextBody::new(vec![p]),
        };
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["box"], serde_json::json!({"x": 0, "y": 0, "cx": 96, "cy": 96}));
        assert_eq!(json["isMaster"], false);
        assert_eq!(json["textData"]["verticalAlign"], "top");
        assert_eq!(json["textData"]["paragraphs"][0]["runs"][0]["text"], "Hi");
        assert!(json.get("fill").is_none());
    }

    #[test]
    fn test_image_and_fill_json() {
        let shape = Shape::Image {
            props: ShapeProps {
                fill: Some(Fill::Solid {
                    color: RGBColor::new(255, 0, 0),
                }),
                geom: Some(Geometry::RoundRect),
                ..Default::default()
            },
            image: ImageData::new("image/gif", b"GIF89a".to_vec()),
        };
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["mime"], "image/gif");
        assert_eq!(json["src"], "data:image/gif;base64,R0lGODlh");
        assert_eq!(json["fill"], serde_json::json!({"type": "solid", "color": "#FF0000"}));
        assert_eq!(json["geom"], "roundRect");
    }

    #[test]
    fn test_geometry_keywords() {
        assert_eq!(Geometry::from_keyword("ellipse"), Some(Geometry::Ellipse));
        assert_eq!(Geometry::from_keyword("rect"), None);
    }
}
