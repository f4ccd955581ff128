//! Table of contents: module name -> class simple names.
//!
//! Derived from the class keys alone by splitting on `_`. Keys are
//! `{module}_{class}`, so a module or class name that itself contains `_` is
//! attributed to the wrong module or truncated. Names with underscores are
//! unsupported.

use indexmap::IndexMap;

use crate::model::NormalizedClass;

/// Build the table of contents from the class lookup, in lookup order.
pub fn table_of_contents(
    classes: &IndexMap<String, NormalizedClass>,
) -> IndexMap<String, Vec<String>> {
    let mut toc: IndexMap<String, Vec<String>> = IndexMap::new();
    for key in classes.keys() {
        let mut parts = key.split('_');
        let module = parts.next().unwrap_or_default();
        let class = parts.next().unwrap_or_default();
        toc.entry(module.to_string())
            .or_default()
            .push(class.to_string());
    }
    toc
}
