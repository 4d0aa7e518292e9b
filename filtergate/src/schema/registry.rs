//! Ordered, key-unique registry of field declarations.

use super::field::FieldDef;

/// Registry of whitelisted fields.
///
/// Insertion-ordered and key-unique: re-registering a name replaces the
/// earlier declaration in place, so the last registration for a given name
/// wins. Pure data holder; validation behavior lives in the compiled schema.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDef>,
}

impl FieldRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Register a field, replacing any earlier declaration of the same name.
    pub fn insert(&mut self, field: FieldDef) {
        if let Some(slot) = self.fields.iter_mut().find(|f| f.name == field.name) {
            *slot = field;
        } else {
            self.fields.push(field);
        }
    }

    /// Look up a field declaration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate declarations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when at least one field declares a rewrite rule.
    #[must_use]
    pub fn has_rewrites(&self) -> bool {
        self.fields.iter().any(|f| f.rewrite.is_some())
    }

    pub(crate) fn into_fields(self) -> Vec<FieldDef> {
        self.fields
    }
}
