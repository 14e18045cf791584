//! Projections from generic value lists into keyed mappings.
//!
//! Record marshaling and the users file both describe records positionally;
//! these helpers give those tuples names without flattening nested lists.

use std::collections::BTreeMap;

use crate::error::StructureError;
use crate::value::Value;

/// Mapping from field name to value produced by [`structure`] and [`maplist`].
pub type Mapping = BTreeMap<String, Value>;

/// Zips `values` with `fields` into a named mapping.
///
/// Nested lists are kept intact as the mapped value.
///
/// # Errors
///
/// Returns [`StructureError::LengthMismatch`] when the two slices differ in
/// length.
///
/// # Example
///
/// ```
/// use vetclix_sexp::{Value, structure};
///
/// let tuple = [Value::from("client"), Value::from("Bobby Tables")];
/// let mapping = structure(&tuple, &["type", "name"])?;
/// assert_eq!(mapping["name"], Value::from("Bobby Tables"));
/// # Ok::<(), vetclix_sexp::StructureError>(())
/// ```
pub fn structure<S>(values: &[Value], fields: &[S]) -> Result<Mapping, StructureError>
where
    S: AsRef<str>,
{
    if values.len() != fields.len() {
        return Err(StructureError::LengthMismatch {
            expected: fields.len(),
            actual: values.len(),
        });
    }

    Ok(fields
        .iter()
        .zip(values)
        .map(|(field, value)| (field.as_ref().to_owned(), value.clone()))
        .collect())
}

/// Builds a mapping from `(key value...)` entries.
///
/// An entry with exactly one value maps to that value; any other number of
/// values maps to a list of them. Later entries overwrite earlier ones that
/// share a key.
///
/// # Errors
///
/// Returns [`StructureError::EntryNotList`] for atom entries and
/// [`StructureError::EmptyEntry`] for empty ones.
pub fn maplist(entries: &[Value]) -> Result<Mapping, StructureError> {
    let mut mapping = Mapping::new();
    for (index, entry) in entries.iter().enumerate() {
        let items = entry
            .as_list()
            .ok_or(StructureError::EntryNotList { index })?;
        let (key, rest) = items
            .split_first()
            .ok_or(StructureError::EmptyEntry { index })?;
        let value = match rest {
            [single] => single.clone(),
            many => Value::List(many.to_vec()),
        };
        mapping.insert(key_text(key), value);
    }
    Ok(mapping)
}

fn key_text(key: &Value) -> String {
    match key {
        Value::Text(text) => text.clone(),
        other => other.to_string(),
    }
}
