/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package. Only the slide id
/// list and the slide size are read from it.
use quick_xml::Reader;
use quick_xml::events::Event;

/// What the presentation part declares about its slides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationInfo {
    /// Relationship IDs of `<p:sldId>` entries in presentation order
    pub slide_rids: Vec<String>,
    /// `<p:sldSz>` in EMU
    pub slide_size_emu: Option<(i64, i64)>,
}

impl PresentationInfo {
    /// Read the slide id list and slide size.
    ///
    /// Malformed XML ends the scan; whatever was read before is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use deckread::ooxml::pptx::parts::PresentationInfo;
    ///
    /// let xml = r#"<p:presentation xmlns:p="p" xmlns:r="r">
    ///   <p:sldIdLst><p:sldId id="256" r:id="rId7"/><p:sldId id="257" r:id="rId8"/></p:sldIdLst>
    ///   <p:sldSz cx="12192000" cy="6858000"/>
    /// </p:presentation>"#;
    /// let info = PresentationInfo::parse(xml);
    /// assert_eq!(info.slide_rids, ["rId7", "rId8"]);
    /// assert_eq!(info.slide_size_emu, Some((12192000, 6858000)));
    /// ```
    pub fn parse(xml: &str) -> Self {
        let mut info = Self::default();
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match e.local_name().as_ref() {
                        b"sldId" => {
                            // `r:id` rather than the numeric `id`
                            let rid = e.attributes().flatten().find(|attr| {
                                attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id"
                            });
                            if let Some(attr) = rid
                                && let Ok(value) = attr.unescape_value()
                            {
                                info.slide_rids.push(value.into_owned());
                            }
                        },
                        b"sldSz" => {
                            let mut cx = None;
                            let mut cy = None;
                            for attr in e.attributes().flatten() {
                                let value = atoi_simd::parse::<i64>(&attr.value).ok();
                                match attr.key.local_name().as_ref() {
                                    b"cx" => cx = value,
                                    b"cy" => cy = value,
                                    _ => {},
                                }
                            }
                            if let (Some(cx), Some(cy)) = (cx, cy)
                                && cx > 0
                                && cy > 0
                            {
                                info.slide_size_emu = Some((cx, cy));
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::warn!("presentation.xml is malformed: {}", e);
                    break;
                },
                _ => {},
            }
        }

        info
    }
}
