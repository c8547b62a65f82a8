use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::RowError;

/// The ordered, de-duplicated field names governing row layout for one
/// writer session. Once established the order and membership are fixed
/// until explicitly reset.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldSet {
    names: Vec<String>,
}

impl FieldSet {
    /// Collects names in order, keeping the first occurrence of any
    /// duplicate.
    pub(crate) fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // column counts are small, a linear scan beats a set here
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !unique.iter().any(|existing| existing == name) {
                unique.push(name.to_string());
            }
        }
        Self { names: unique }
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}

/// Maps the established field order onto each struct type's declared field
/// order, cached per type so the name lookups happen once instead of once
/// per row. Cleared whenever the field set is reset; entries are also
/// revalidated against each row's declared names, since serde attributes
/// like `skip_serializing_if` can change a type's emitted shape between
/// rows.
#[derive(Debug, Default)]
pub(crate) struct AccessorCache {
    by_type: HashMap<&'static str, TypeAccessors>,
}

#[derive(Debug)]
struct TypeAccessors {
    declared: Vec<&'static str>,
    indices: Vec<usize>,
}

impl TypeAccessors {
    fn build(
        display_name: &'static str,
        declared: &[&'static str],
        fields: &FieldSet,
    ) -> Result<Self, RowError> {
        let mut indices = Vec::with_capacity(fields.len());
        for name in fields.names() {
            let index = declared
                .iter()
                .position(|field| *field == name.as_str())
                .ok_or_else(|| RowError::FieldNotFound {
                    field: name.clone(),
                    type_name: display_name.to_string(),
                })?;
            indices.push(index);
        }
        Ok(Self {
            declared: declared.to_vec(),
            indices,
        })
    }
}

impl AccessorCache {
    pub(crate) fn clear(&mut self) {
        self.by_type.clear();
    }

    /// For each established field, the position of the matching declared
    /// field. Fails without caching if any established field is missing
    /// from `declared`.
    pub(crate) fn resolve(
        &mut self,
        type_key: &'static str,
        display_name: &'static str,
        declared: &[&'static str],
        fields: &FieldSet,
    ) -> Result<&[usize], RowError> {
        match self.by_type.entry(type_key) {
            Entry::Occupied(cached) if cached.get().declared.as_slice() == declared => {
                Ok(&cached.into_mut().indices)
            }
            Entry::Occupied(stale) => {
                let rebuilt = TypeAccessors::build(display_name, declared, fields)?;
                let slot = stale.into_mut();
                *slot = rebuilt;
                Ok(&slot.indices)
            }
            Entry::Vacant(vacant) => {
                let built = TypeAccessors::build(display_name, declared, fields)?;
                Ok(&vacant.insert(built).indices)
            }
        }
    }
}
