/// The PackURI value type: part names inside a presentation package.
///
/// Part names always begin with a forward slash and use forward slashes as
/// separators. Relationship targets are relative to the directory of their
/// source part and are resolved into part names here.
use crate::common::{Error, Result};

/// A part name within a package, e.g. `/ppt/slides/slide1.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a PackURI from an absolute part name.
    ///
    /// Fails if the name does not begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(Error::InvalidFormat(format!(
                "Part name must begin with slash, got '{}'",
                uri
            )));
        }
        Ok(PackURI { uri })
    }

    /// Create a PackURI from a ZIP member name (no leading slash).
    pub fn from_member(member: &str) -> Self {
        PackURI {
            uri: format!("/{}", member.trim_start_matches('/')),
        }
    }

    /// Resolve a relationship target against the directory `base_uri`.
    ///
    /// Targets starting with a slash are already absolute.
    ///
    /// ```
    /// use deckread::ooxml::opc::PackURI;
    /// let uri = PackURI::from_rel_ref("/ppt/slides", "../media/image1.png");
    /// assert_eq!(uri.as_str(), "/ppt/media/image1.png");
    /// let uri = PackURI::from_rel_ref("/ppt", "/ppt/slides/./slide2.xml");
    /// assert_eq!(uri.as_str(), "/ppt/slides/slide2.xml");
    /// ```
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Self {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };
        PackURI {
            uri: normalize(&joined),
        }
    }

    /// Directory portion, e.g. `/ppt/slides` for `/ppt/slides/slide1.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// File name portion, e.g. `slide1.xml`.
    pub fn filename(&self) -> &str {
        self.uri
            .rfind('/')
            .map_or("", |pos| &self.uri[pos + 1..])
    }

    /// Extension without the period, e.g. `xml`.
    pub fn ext(&self) -> &str {
        self.filename()
            .rsplit_once('.')
            .map_or("", |(_, ext)| ext)
    }

    /// Numeric suffix of the file stem, e.g. 21 for `slide21.xml`.
    pub fn idx(&self) -> Option<u32> {
        let filename = self.filename();
        let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
        let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || digits == stem.len() {
            return None;
        }
        atoi_simd::parse::<u32>(&stem.as_bytes()[stem.len() - digits..]).ok()
    }

    /// The ZIP member name (leading slash stripped).
    #[inline]
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// The part name of this part's relationships, e.g.
    /// `/ppt/slides/_rels/slide1.xml.rels`.
    pub fn rels_uri(&self) -> PackURI {
        let base = self.base_uri();
        let uri = if base == "/" {
            format!("/_rels/{}.rels", self.filename())
        } else {
            format!("{}/_rels/{}.rels", base, self.filename())
        };
        PackURI { uri }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

/// Resolve `.` and `..` segments of an absolute path.
fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            _ => parts.push(part),
        }
    }
    format!("/{}", parts.join("/"))
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packuri_new() {
        assert!(PackURI::new("/ppt/presentation.xml").is_ok());
        assert!(PackURI::new("ppt/presentation.xml").is_err());
    }

    #[test]
    fn test_components() {
        let uri = PackURI::new("/ppt/slides/slide21.xml").unwrap();
        assert_eq!(uri.base_uri(), "/ppt/slides");
        assert_eq!(uri.filename(), "slide21.xml");
        assert_eq!(uri.ext(), "xml");
        assert_eq!(uri.idx(), Some(21));
        assert_eq!(uri.membername(), "ppt/slides/slide21.xml");
        assert_eq!(uri.rels_uri().as_str(), "/ppt/slides/_rels/slide21.xml.rels");

        let uri = PackURI::from_member("ppt/presentation.xml");
        assert_eq!(uri.idx(), None);
        assert_eq!(uri.rels_uri().as_str(), "/ppt/_rels/presentation.xml.rels");
    }

    #[test]
    fn test_parent_above_root_is_clamped() {
        let uri = PackURI::from_rel_ref("/ppt", "../../media/a.png");
        assert_eq!(uri.as_str(), "/media/a.png");
    }

    #[test]
    fn test_root_base() {
        let uri = PackURI::from_rel_ref("/", "ppt/presentation.xml");
        assert_eq!(uri.as_str(), "/ppt/presentation.xml");
        assert_eq!(PackURI::from_member("a.xml").base_uri(), "/");
    }
}
