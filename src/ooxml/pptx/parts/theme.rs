/// Theme parts for PowerPoint presentations.
///
/// Only the colour scheme and the major/minor latin fonts are read; they are
/// what `a:schemeClr` and `+mj-lt`/`+mn-lt` typefaces refer to.
use crate::common::RGBColor;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Theme information extracted from a theme part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    /// Scheme colours by name (`dk1`, `lt1`, `accent1`...)
    pub colors: HashMap<String, RGBColor>,
    /// Major (heading) latin typeface
    pub major_font: Option<String>,
    /// Minor (body) latin typeface
    pub minor_font: Option<String>,
}

const SCHEME_SLOTS: [&[u8]; 12] = [
    b"dk1", b"lt1", b"dk2", b"lt2", b"accent1", b"accent2", b"accent3", b"accent4", b"accent5",
    b"accent6", b"hlink", b"folHlink",
];

impl Theme {
    /// Parse a theme part.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deckread::ooxml::pptx::parts::Theme;
    /// use deckread::RGBColor;
    ///
    /// let xml = r#"<a:theme><a:themeElements><a:clrScheme name="Office">
    ///   <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
    ///   <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
    /// </a:clrScheme></a:themeElements></a:theme>"#;
    /// let theme = Theme::parse(xml);
    /// assert_eq!(theme.colors["accent1"], RGBColor::new(0x44, 0x72, 0xC4));
    /// assert_eq!(theme.colors["dk1"], RGBColor::BLACK);
    /// ```
    pub fn parse(xml: &str) -> Self {
        let mut theme = Theme::default();
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut in_color_scheme = false;
        let mut in_major_font = false;
        let mut in_minor_font = false;
        let mut current_slot: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let tag_name = e.local_name();
                    match tag_name.as_ref() {
                        b"clrScheme" => in_color_scheme = true,
                        b"majorFont" => in_major_font = true,
                        b"minorFont" => in_minor_font = true,
                        slot if in_color_scheme && SCHEME_SLOTS.contains(&slot) => {
                            current_slot = Some(String::from_utf8_lossy(slot).into_owned());
                        },
                        b"srgbClr" | b"sysClr" if current_slot.is_some() => {
                            let wanted: &[u8] = if tag_name.as_ref() == b"srgbClr" {
                                b"val"
                            } else {
                                b"lastClr"
                            };
                            let color = e
                                .attributes()
                                .flatten()
                                .find(|attr| attr.key.local_name().as_ref() == wanted)
                                .and_then(|attr| {
                                    RGBColor::from_hex(&String::from_utf8_lossy(&attr.value))
                                });
                            if let (Some(slot), Some(color)) = (current_slot.take(), color) {
                                theme.colors.insert(slot, color);
                            }
                        },
                        b"latin" if in_major_font || in_minor_font => {
                            let typeface = e
                                .attributes()
                                .flatten()
                                .find(|attr| attr.key.local_name().as_ref() == b"typeface")
                                .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
                                .filter(|t| !t.is_empty());
                            if in_major_font {
                                theme.major_font = typeface;
                            } else {
                                theme.minor_font = typeface;
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"clrScheme" => in_color_scheme = false,
                    b"majorFont" => in_major_font = false,
                    b"minorFont" => in_minor_font = false,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::warn!("Theme part is malformed: {}", e);
                    break;
                },
                _ => {},
            }
        }

        theme
    }

    /// Resolve a theme font reference such as `+mj-lt`.
    ///
    /// Plain typefaces are returned as they are.
    pub fn resolve_font<'a>(&'a self, typeface: &'a str) -> Option<&'a str> {
        match typeface {
            "+mj-lt" | "+mj-ea" | "+mj-cs" => self.major_font.as_deref(),
            "+mn-lt" | "+mn-ea" | "+mn-cs" => self.minor_font.as_deref(),
            "" => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fonts() {
        let xml = r#"<a:theme><a:fontScheme>
            <a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/></a:majorFont>
            <a:minorFont><a:latin typeface="Calibri"/></a:minorFont>
        </a:fontScheme></a:theme>"#;
        let theme = Theme::parse(xml);
        assert_eq!(theme.resolve_font("+mj-lt"), Some("Calibri Light"));
        assert_eq!(theme.resolve_font("+mn-lt"), Some("Calibri"));
        assert_eq!(theme.resolve_font("Arial"), Some("Arial"));
    }

    #[test]
    fn test_colors_outside_scheme_ignored() {
        let xml = r#"<a:theme><a:fmtScheme><a:srgbClr val="FF0000"/></a:fmtScheme>
            <a:clrScheme><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1></a:clrScheme></a:theme>"#;
        let theme = Theme::parse(xml);
        assert_eq!(theme.colors.len(), 1);
        assert_eq!(theme.colors["lt1"], RGBColor::WHITE);
    }
}
