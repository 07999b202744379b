//! The versioned API catalog: signature → introduced-version tables plus the
//! type-hierarchy adjacency index.
//!
//! The catalog ships as an XML database:
//!
//! ```xml
//! <api version="1">
//!   <class name="android/app/Activity" since="1">
//!     <extends name="android/view/ContextThemeWrapper"/>
//!     <implements name="android/view/Window$Callback"/>
//!     <method name="getActionBar()Landroid/app/ActionBar;" since="11"/>
//!     <field name="FOCUSED_STATE_SET" since="1"/>
//!   </class>
//!   <view name="GridLayout" since="14"/>
//! </api>
//! ```
//!
//! Once loaded the catalog is immutable and safe to share across scan
//! workers without synchronization.

use std::collections::HashMap;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Errors loading the catalog database. All fatal: a run cannot proceed
/// without a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed catalog XML: {0}")]
    Xml(String),

    #[error("catalog element <{element}> is missing its `{attribute}` attribute")]
    MissingAttribute {
        element: String,
        attribute: String,
    },

    #[error("invalid version number `{0}` in catalog")]
    BadVersion(String),

    #[error("member entry outside of a <class> element")]
    OrphanMember,
}

/// Immutable versioned map from element signature to introduced-version,
/// with supertype edges for inherited-member resolution.
///
/// Absence from any table means "no constraint" and is never a violation.
/// Class-level and member-level entries are independent: a member may be
/// introduced later than its owner and both remain separately checkable.
#[derive(Debug, Default)]
pub struct ApiCatalog {
    classes: HashMap<String, u32>,
    members: HashMap<(String, String), u32>,
    tags: HashMap<String, u32>,
    supertypes: HashMap<String, Vec<String>>,
}

impl ApiCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Load the XML database at `path`.
    pub fn load(path: &Path) -> Result<ApiCatalog, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse an XML database from a string.
    pub fn parse(content: &str) -> Result<ApiCatalog, CatalogError> {
        let mut reader = Reader::from_str(content);
        let mut builder = CatalogBuilder::default();
        // Name and introduced-version of the enclosing <class>, if any.
        let mut current_class: Option<(String, u32)> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| CatalogError::Xml(e.to_string()))?;
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let closes = matches!(event, Event::Empty(_));
                    match e.name().as_ref() {
                        b"class" => {
                            let name = required_attr(e, "name")?;
                            let since = since_attr(e)?.unwrap_or(1);
                            builder = builder.class(&name, since);
                            if !closes {
                                current_class = Some((name, since));
                            }
                        }
                        b"extends" | b"implements" => {
                            let (class, _) =
                                current_class.as_ref().ok_or(CatalogError::OrphanMember)?;
                            let name = required_attr(e, "name")?;
                            builder = builder.supertype(class, &name);
                        }
                        b"method" | b"field" => {
                            let (class, class_since) = current_class
                                .as_ref()
                                .cloned()
                                .ok_or(CatalogError::OrphanMember)?;
                            let key = required_attr(e, "name")?;
                            // A member introduced with its class adds no
                            // constraint beyond the class entry itself.
                            if let Some(since) = since_attr(e)? {
                                if since > class_since {
                                    builder = builder.member(&class, &key, since);
                                }
                            }
                        }
                        b"view" => {
                            let name = required_attr(e, "name")?;
                            let since = since_attr(e)?.unwrap_or(1);
                            builder = builder.tag(&name, since);
                        }
                        _ => {}
                    }
                }
                Event::End(ref e) => {
                    if e.name().as_ref() == b"class" {
                        current_class = None;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(builder.build())
    }

    /// Introduced-version of a class signature (internal form). Nested
    /// types are their own signatures, distinct from the enclosing type.
    pub fn lookup_class(&self, name: &str) -> Option<u32> {
        self.classes.get(name).copied()
    }

    /// Introduced-version of a member declared directly on `owner`.
    pub fn lookup_member(&self, owner: &str, key: &str) -> Option<u32> {
        self.members
            .get(&(owner.to_string(), key.to_string()))
            .copied()
    }

    /// Introduced-version of a UI element tag.
    pub fn lookup_tag(&self, tag: &str) -> Option<u32> {
        self.tags.get(tag).copied()
    }

    /// Declared supertypes of `name` in declaration order (extends first,
    /// then interfaces). Empty when the type is unknown to the catalog.
    pub fn supertypes_of(&self, name: &str) -> &[String] {
        self.supertypes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.members.is_empty() && self.tags.is_empty()
    }
}

fn required_attr(e: &BytesStart<'_>, name: &str) -> Result<String, CatalogError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| CatalogError::Xml(err.to_string()))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| CatalogError::Xml(err.to_string()))?;
            return Ok(value.into_owned());
        }
    }
    Err(CatalogError::MissingAttribute {
        element: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        attribute: name.to_string(),
    })
}

fn since_attr(e: &BytesStart<'_>) -> Result<Option<u32>, CatalogError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| CatalogError::Xml(err.to_string()))?;
        if attr.key.as_ref() == b"since" {
            let value = attr
                .unescape_value()
                .map_err(|err| CatalogError::Xml(err.to_string()))?;
            return value
                .parse::<u32>()
                .map(Some)
                .map_err(|_| CatalogError::BadVersion(value.into_owned()));
        }
    }
    Ok(None)
}

/// Builds an [`ApiCatalog`] entry by entry. Used by the XML loader and by
/// tests that assemble small catalogs directly.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: ApiCatalog,
}

impl CatalogBuilder {
    pub fn class(mut self, name: &str, since: u32) -> Self {
        self.catalog.classes.insert(name.to_string(), since);
        self
    }

    pub fn member(mut self, owner: &str, key: &str, since: u32) -> Self {
        self.catalog
            .members
            .insert((owner.to_string(), key.to_string()), since);
        self
    }

    pub fn tag(mut self, name: &str, since: u32) -> Self {
        self.catalog.tags.insert(name.to_string(), since);
        self
    }

    pub fn supertype(mut self, subtype: &str, supertype: &str) -> Self {
        self.catalog
            .supertypes
            .entry(subtype.to_string())
            .or_default()
            .push(supertype.to_string());
        self
    }

    pub fn build(self) -> ApiCatalog {
        self.catalog
    }
}
