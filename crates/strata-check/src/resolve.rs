//! Maps a reference to the platform version that introduced it.

use std::collections::{HashSet, VecDeque};

use strata_core::catalog::ApiCatalog;
use strata_core::types::{ApiKind, Reference};

/// Resolves references against a read-only catalog. Cheap to construct;
/// holds no state beyond the borrow.
pub struct VersionResolver<'a> {
    catalog: &'a ApiCatalog,
}

impl<'a> VersionResolver<'a> {
    pub fn new(catalog: &'a ApiCatalog) -> Self {
        Self { catalog }
    }

    /// Introduced-version of the element a reference names, or `None` when
    /// the catalog carries no constraint for it. An owner type absent from
    /// the hierarchy index is also "no constraint" — incomplete input must
    /// not produce false positives.
    pub fn required_version(&self, reference: &Reference) -> Option<u32> {
        match reference.kind {
            ApiKind::Class => self.catalog.lookup_class(&reference.owner),
            ApiKind::UiTag => self.catalog.lookup_tag(&reference.owner),
            ApiKind::Method | ApiKind::Field => {
                let key = reference.member.as_deref()?;
                self.resolve_member(&reference.owner, key)
            }
        }
    }

    /// Exact match on the owner, then a breadth-first walk up the hierarchy
    /// in declaration order. Nearest declaring ancestor wins, mirroring
    /// dispatch when the owner itself does not declare the member. The
    /// visited set bounds traversal against interface cycles.
    ///
    /// A member with no entry of its own inherits the owner class's
    /// constraint: touching any member of a late-introduced type requires
    /// that type to exist.
    fn resolve_member(&self, owner: &str, key: &str) -> Option<u32> {
        if let Some(version) = self.catalog.lookup_member(owner, key) {
            return Some(version);
        }

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(owner);
        let mut queue: VecDeque<&str> = self.catalog.supertypes_of(owner).iter().map(String::as_str).collect();

        while let Some(ancestor) = queue.pop_front() {
            if !visited.insert(ancestor) {
                continue;
            }
            if let Some(version) = self.catalog.lookup_member(ancestor, key) {
                return Some(version);
            }
            for next in self.catalog.supertypes_of(ancestor) {
                queue.push_back(next);
            }
        }

        self.catalog.lookup_class(owner)
    }
}
