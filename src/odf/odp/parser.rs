//! Walks the drawing pages of an ODP package.

use super::frame::PageContext;
use crate::common::ZipPackage;
use crate::common::unit::length_to_px;
use crate::common::xml::{XmlDocument, XmlElement};
use crate::odf::lists::Numbering;
use crate::odf::styles::{self, StyleSheet};
use crate::presentation::{DecodeOptions, Slide, SlideSize};
use std::collections::HashMap;

/// The parts of a package needed to convert its pages.
pub(crate) struct OdpDocument<'p> {
    package: ZipPackage<'p>,
    content: XmlDocument,
    /// `styles.xml`, when present and well formed
    styles_doc: Option<XmlDocument>,
    styles: StyleSheet,
}

impl<'p> OdpDocument<'p> {
    /// Load the style table from `styles.xml` and then `content.xml`, so
    /// automatic styles of the content override same-named shared ones.
    pub fn new(package: ZipPackage<'p>, content: XmlDocument) -> Self {
        let styles_doc = package.read_xml("styles.xml");
        if styles_doc.is_none() {
            log::debug!("No readable styles.xml; using content styles only");
        }
        let mut styles = StyleSheet::new();
        if let Some(doc) = &styles_doc {
            styles.load(&doc.root);
        }
        styles.load(&content.root);
        Self {
            package,
            content,
            styles_doc,
            styles,
        }
    }

    /// `style:master-page` elements by name.
    fn master_pages(&self) -> HashMap<&str, &XmlElement> {
        let mut masters = HashMap::new();
        let roots = self.styles_doc.iter().map(|d| &d.root).chain([&self.content.root]);
        for root in roots {
            let Some(container) = root.child("master-styles") else {
                continue;
            };
            for master in container.children_named("master-page") {
                if let Some(name) = master.attr("style:name") {
                    masters.insert(name, master);
                }
            }
        }
        masters
    }

    fn pages(&self) -> Vec<&XmlElement> {
        self.content
            .root
            .child("body")
            .and_then(|body| body.child("presentation"))
            .map(|pres| pres.children_named("page").collect())
            .unwrap_or_default()
    }

    /// Convert every page, up to the caller's limit.
    pub fn slides(&self, options: &DecodeOptions) -> Vec<Slide> {
        let masters = self.master_pages();
        let limit = options.slide_limit(None);
        let mut numbering = Numbering::new();

        self.pages()
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, page)| {
                let master = page
                    .attr("draw:master-page-name")
                    .and_then(|name| {
                        let found = masters.get(name).copied();
                        if found.is_none() {
                            log::debug!("Master page {} is not defined", name);
                        }
                        found
                    });
                self.slide(index, page, master, options, &mut numbering)
            })
            .collect()
    }

    fn slide(
        &self,
        index: usize,
        page: &XmlElement,
        master: Option<&XmlElement>,
        options: &DecodeOptions,
        numbering: &mut Numbering,
    ) -> Slide {
        let path = page
            .attr("draw:name")
            .map(str::to_string)
            .unwrap_or_else(|| format!("page{}", index + 1));
        let size = self.page_size(page, master);
        let mut slide = Slide::new(path, size);

        slide.background = [Some(page), master]
            .into_iter()
            .flatten()
            .filter_map(|el| el.attr("draw:style-name"))
            .find_map(|name| styles::background(&self.styles.resolve(name)));

        if let Some(master) = master {
            let ctx = self.context(options, size, true);
            ctx.collect_shapes(master, &mut Numbering::new(), &mut slide.shapes);
        }
        let ctx = self.context(options, size, false);
        ctx.collect_shapes(page, numbering, &mut slide.shapes);
        slide
    }

    fn context<'a>(&'a self, options: &'a DecodeOptions, size: SlideSize, is_master: bool) -> PageContext<'a, 'p> {
        PageContext {
            package: &self.package,
            styles: &self.styles,
            options,
            size,
            is_master,
        }
    }

    /// The page's own dimensions, else its master's page layout.
    fn page_size(&self, page: &XmlElement, master: Option<&XmlElement>) -> SlideSize {
        let len = |name: &str| page.attr(name).and_then(length_to_px);
        if let (Some(w), Some(h)) = (len("svg:width"), len("svg:height"))
            && w > 0.0
            && h > 0.0
        {
            return SlideSize::new(w.round() as i64, h.round() as i64);
        }
        master
            .and_then(|m| m.attr("style:page-layout-name"))
            .and_then(|name| self.styles.page_layout(name))
            .unwrap_or_default()
    }
}
