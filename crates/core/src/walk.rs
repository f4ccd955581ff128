//! Declaration tree walk: modules -> classes -> members.
//!
//! The walk flattens the nested extractor tree into independently addressable
//! records. A visibility filter runs at every level: names starting with `_`
//! are dropped and noted in the skip log, as are module children of kind
//! `Variable` and members of an unrecognized kind. Nothing in the walk fails;
//! every rejected node is a skip-log entry.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::input::{DeclarationNode, Document};
use crate::members::{
    comment_text, normalize_accessor, normalize_method, normalize_property, normalize_variable,
    public_flags, source_locations,
};
use crate::model::{NormalizedClass, NormalizedModule, SearchEntry};

/// Kind tag written on every module record and search row.
const MODULE_KIND: &str = "Module";

/// Module children of this kind are never treated as classes.
const VARIABLE_KIND: &str = "Variable";

/// Result of one normalization pass.
#[derive(Debug, Clone, Default)]
pub struct Normalization {
    /// Kept modules keyed by quote-stripped name.
    pub modules: IndexMap<String, NormalizedModule>,
    /// Kept classes keyed by `{module}_{class}`.
    pub classes: IndexMap<String, NormalizedClass>,
    /// One row per kept module and per kept class.
    pub search: Vec<SearchEntry>,
    /// Identifiers of every filtered node, in walk order.
    pub skipped: Vec<String>,
}

/// Whether a declaration name is hidden by the visibility filter.
pub fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// Fully-qualified class key.
pub fn class_key(module: &str, class: &str) -> String {
    format!("{module}_{class}")
}

/// Normalize a whole extractor document.
pub fn normalize(document: &Document) -> Normalization {
    let mut walker = Walker::default();
    for module in document.modules() {
        walker.visit_module(module);
    }
    let result = walker.finish();
    info!(
        modules = result.modules.len(),
        classes = result.classes.len(),
        skipped = result.skipped.len(),
        "Normalized documentation tree."
    );
    result
}

#[derive(Debug, Default)]
struct Walker {
    out: Normalization,
}

impl Walker {
    fn skip(&mut self, entry: String) {
        debug!(%entry, "Skipping declaration.");
        self.out.skipped.push(entry);
    }

    fn visit_module(&mut self, node: DeclarationNode<'_>) {
        let name = node.name().map(|n| n.replace('"', "")).unwrap_or_default();
        if name.is_empty() || is_private(&name) {
            self.skip(format!("{MODULE_KIND}.{name}"));
            return;
        }

        let mut module = NormalizedModule {
            name: name.clone(),
            source: source_locations(node),
            kind: MODULE_KIND,
            id: node.id(),
            comment: comment_text(node),
            classes: Vec::new(),
        };
        for child in node.children() {
            if let Some(class_name) = self.visit_class(&name, child) {
                module.classes.push(class_name);
            }
        }

        if let Some(existing) = self.out.modules.get_mut(&name) {
            existing.classes.append(&mut module.classes);
            return;
        }
        self.out.modules.insert(name.clone(), module);
        self.out
            .search
            .push(SearchEntry(name.clone(), name, MODULE_KIND.to_string()));
    }

    /// Returns the simple class name when the child is kept.
    fn visit_class(&mut self, module: &str, node: DeclarationNode<'_>) -> Option<String> {
        let kind = node.kind().unwrap_or_default();
        let name = node
            .name()
            .filter(|n| kind != VARIABLE_KIND && !is_private(n));
        let Some(name) = name else {
            self.skip(class_key(module, node.name().unwrap_or_default()));
            return None;
        };

        let key = class_key(module, name);
        let mut class = NormalizedClass {
            name: name.to_string(),
            source: source_locations(node),
            kind: kind.to_string(),
            id: node.id(),
            comment: comment_text(node),
            constructor: Vec::new(),
            accessors: Vec::new(),
            methods: Vec::new(),
            variables: Vec::new(),
            properties: Vec::new(),
            flags: public_flags(node),
            extends: node.extended_types(),
            implements: node.implemented_types(),
        };
        for member in node.children() {
            self.visit_member(&mut class, member);
        }

        // A repeated key (declaration merging) replaces the record in place.
        if self.out.classes.insert(key.clone(), class).is_some() {
            debug!(%key, "Replacing merged declaration.");
            if let Some(entry) = self.out.search.iter_mut().find(|entry| entry.0 == key) {
                entry.2 = kind.to_string();
            }
            return None;
        }
        self.out
            .search
            .push(SearchEntry(key, name.to_string(), kind.to_string()));
        Some(name.to_string())
    }

    fn visit_member(&mut self, class: &mut NormalizedClass, node: DeclarationNode<'_>) {
        let name = node.name().unwrap_or_default();
        if is_private(name) {
            self.skip(format!("{}.{name}", class.name));
            return;
        }
        match node.kind() {
            Some("Method") => class.methods.push(normalize_method(node)),
            Some("Accessor") => class.accessors.push(normalize_accessor(node)),
            Some("Variable") => class.variables.push(normalize_variable(node)),
            Some("Property") => class.properties.push(normalize_property(node)),
            Some("Constructor") => class.constructor.push(normalize_method(node)),
            _ => self.skip(format!("{}.{name}", class.name)),
        }
    }

    fn finish(self) -> Normalization {
        self.out
    }
}
