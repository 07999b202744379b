use serde::{Deserialize, Serialize};

/// Check id carried by every diagnostic this subsystem emits. Persisted
/// suppression annotations name this id (or suppress everything).
pub const CHECK_ID: &str = "min-api";

/// Kinds of catalogued platform elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKind {
    Class,
    Method,
    Field,
    UiTag,
}

impl ApiKind {
    /// Label used in rendered diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            ApiKind::Class => "Class",
            ApiKind::Method => "Call",
            ApiKind::Field => "Field",
            ApiKind::UiTag => "View",
        }
    }
}

impl std::fmt::Display for ApiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The declaration that lexically encloses a reference in the compiled
/// unit. Suppression lookup keys on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enclosing {
    /// Internal name of the enclosing class (`foo/bar/Baz`).
    pub class: String,
    /// Member key of the enclosing method or field, when the reference sits
    /// inside one. Methods key as `name + descriptor`, fields as `name`.
    pub member: Option<String>,
}

/// A single detected usage of a platform element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub kind: ApiKind,
    /// Owner type in internal form (`android/app/Activity`), or the bare
    /// tag name for [`ApiKind::UiTag`].
    pub owner: String,
    /// Member key for method/field references, `None` for class and tag
    /// references.
    pub member: Option<String>,
    /// Originating source file, relative to the project root.
    pub file: String,
    /// 1-based source line. 0 when no debug line survived compilation.
    pub line: u32,
    /// Enclosing declaration, absent for UI documents.
    pub enclosing: Option<Enclosing>,
}

impl Reference {
    /// Human-readable signature. Classes render dotted with nested-type `$`
    /// folded to `.`; members render `owner#name` with the descriptor
    /// dropped and `$` kept; tags render `<Tag>`.
    pub fn display_signature(&self) -> String {
        match self.kind {
            ApiKind::UiTag => format!("<{}>", self.owner),
            ApiKind::Class => self.owner.replace(['/', '$'], "."),
            ApiKind::Method | ApiKind::Field => {
                let member = self.member.as_deref().unwrap_or("");
                let name = member.split('(').next().unwrap_or(member);
                format!("{}#{}", self.owner.replace('/', "."), name)
            }
        }
    }
}

/// A reference that resolved to a version above the declared minimum and
/// survived suppression. `required > declared_min` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub reference: Reference,
    pub required: u32,
    pub declared_min: u32,
}

/// A compiled unit or UI document that could not be scanned. Reported as a
/// distinct per-file diagnostic, never as an API violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub file: String,
    pub message: String,
}

/// A persisted suppression annotation on a class, method, or field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suppression {
    /// No annotation present.
    None,
    /// Annotation with no check ids: suppresses every check.
    All,
    /// Annotation naming specific check ids.
    Checks(Vec<String>),
}

impl Suppression {
    pub fn covers(&self, check_id: &str) -> bool {
        match self {
            Suppression::None => false,
            Suppression::All => true,
            Suppression::Checks(ids) => ids.iter().any(|id| id == check_id),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Suppression::None)
    }
}

/// Suppression annotations harvested from one compiled unit, keyed by the
/// declaration that carried them. Only class/method/field annotations exist
/// here: narrower source-level placements do not survive compilation, so
/// they can never be inserted.
#[derive(Debug, Clone, Default)]
pub struct SuppressionScope {
    entries: std::collections::HashMap<(String, Option<String>), Suppression>,
}

impl SuppressionScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the annotation persisted on `class` (member `None`) or on one
    /// of its members.
    pub fn insert(&mut self, class: &str, member: Option<&str>, suppression: Suppression) {
        if suppression.is_none() {
            return;
        }
        self.entries
            .insert((class.to_string(), member.map(str::to_string)), suppression);
    }

    /// Whether any annotation on the enclosing declaration chain covers
    /// `check_id`: the member's own annotation is consulted first, then the
    /// class's. Scopes union up the chain, so a member annotation naming
    /// only unrelated ids never cancels a broader class-level one.
    pub fn covers(&self, enclosing: &Enclosing, check_id: &str) -> bool {
        if enclosing.member.is_some() {
            let member_key = (enclosing.class.clone(), enclosing.member.clone());
            if self.entries.get(&member_key).is_some_and(|s| s.covers(check_id)) {
                return true;
            }
        }
        self.entries
            .get(&(enclosing.class.clone(), None))
            .is_some_and(|s| s.covers(check_id))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
