//! Code translation tables.
//!
//! A [`CodeMapping`] translates codes of one scheme into another. Tables are
//! derived from remote structure documents and may be corrected by manually
//! curated override tables; [`merge`] defines how the two combine.

use std::collections::BTreeMap;
use std::collections::btree_map;

use tracing::debug;

use crate::code::{Code, canonical_int};
use crate::error::{ModelError, Result};

/// How keys of a stored mapping are typed when it is loaded.
///
/// Stored documents always carry string keys, so integer-keyed tables (legacy
/// donor codes) must be coerced on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCoercion {
    /// Keep keys as stored.
    #[default]
    Keep,
    /// Every key must be the canonical text of an integer (`"801"`, not
    /// `"0801"` or `" 801"`); the first one that is not is an error.
    Integer,
    /// Keep only keys made of ASCII digits, converted to integers. Other keys are dropped.
    IntegerDigitsOnly,
}

/// A named mapping and the store location of its materialized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSpec {
    /// Stable logical name, e.g. `dac1_codes_area`.
    pub name: &'static str,
    /// Location resolved by the mapping store, e.g. `dac1_codes_area.json`.
    pub location: &'static str,
    /// Key typing applied on load.
    pub keys: KeyCoercion,
}

impl MappingSpec {
    pub const fn new(name: &'static str, location: &'static str, keys: KeyCoercion) -> Self {
        Self {
            name,
            location,
            keys,
        }
    }
}

/// A finite mapping from source code to target code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMapping {
    entries: BTreeMap<Code, Code>,
}

impl CodeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry, returning the previous target for `source` if any.
    pub fn insert(&mut self, source: impl Into<Code>, target: impl Into<Code>) -> Option<Code> {
        self.entries.insert(source.into(), target.into())
    }

    /// Exact-key lookup.
    pub fn get(&self, source: &Code) -> Option<&Code> {
        self.entries.get(source)
    }

    pub fn contains_key(&self, source: &Code) -> bool {
        self.entries.contains_key(source)
    }

    /// Lookup that also tries the alternate representation of `source`.
    ///
    /// A dataset column holding `801` as an integer matches a table whose keys
    /// were left as the string `"801"`, and the other way round.
    pub fn lookup(&self, source: &Code) -> Option<&Code> {
        self.entries.get(source).or_else(|| {
            source
                .alternate()
                .and_then(|alternate| self.entries.get(&alternate))
        })
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Code, Code> {
        self.entries.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Code, Code> {
        self.entries.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, Code, Code> {
        self.entries.values()
    }

    /// Swap keys and values.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AmbiguousInversion`] when two keys map to the
    /// same value, since that value cannot become a unique key.
    pub fn invert(&self) -> Result<CodeMapping> {
        let mut inverted: BTreeMap<Code, Code> = BTreeMap::new();
        for (source, target) in &self.entries {
            if let Some(first) = inverted.get(target) {
                return Err(ModelError::AmbiguousInversion {
                    value: target.clone(),
                    first: first.clone(),
                    second: source.clone(),
                });
            }
            inverted.insert(target.clone(), source.clone());
        }
        Ok(Self { entries: inverted })
    }

    /// Re-type keys according to `coercion`.
    ///
    /// # Errors
    ///
    /// With [`KeyCoercion::Integer`], returns [`ModelError::KeyCoercion`] for
    /// the first string key that is not a canonical integer, and
    /// [`ModelError::DuplicateKey`] when an integer key and its text form are
    /// both present.
    pub fn coerce_keys(self, coercion: KeyCoercion) -> Result<CodeMapping> {
        match coercion {
            KeyCoercion::Keep => Ok(self),
            KeyCoercion::Integer => {
                let mut entries = BTreeMap::new();
                for (key, value) in self.entries {
                    let key = match key {
                        Code::Int(_) => key,
                        Code::Text(text) => match canonical_int(&text) {
                            Some(parsed) => Code::Int(parsed),
                            None => return Err(ModelError::KeyCoercion { key: text }),
                        },
                    };
                    if entries.contains_key(&key) {
                        return Err(ModelError::DuplicateKey { key });
                    }
                    entries.insert(key, value);
                }
                Ok(Self { entries })
            }
            KeyCoercion::IntegerDigitsOnly => {
                let mut entries = BTreeMap::new();
                for (key, value) in self.entries {
                    match key {
                        Code::Int(_) => {
                            entries.insert(key, value);
                        }
                        Code::Text(text) => match digits_to_int(&text) {
                            Some(parsed) => {
                                entries.insert(Code::Int(parsed), value);
                            }
                            None => debug!(key = %text, "dropping non-numeric mapping key"),
                        },
                    }
                }
                Ok(Self { entries })
            }
        }
    }
}

fn digits_to_int(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

/// Merge a base mapping with an override mapping.
///
/// The result holds the union of both key sets. On a key present in both,
/// the override value wins.
pub fn merge(base: &CodeMapping, overrides: &CodeMapping) -> CodeMapping {
    let mut entries = base.entries.clone();
    for (source, target) in &overrides.entries {
        entries.insert(source.clone(), target.clone());
    }
    CodeMapping { entries }
}

impl<K, V> FromIterator<(K, V)> for CodeMapping
where
    K: Into<Code>,
    V: Into<Code>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        mapping.extend(iter);
        mapping
    }
}

impl<K, V> Extend<(K, V)> for CodeMapping
where
    K: Into<Code>,
    V: Into<Code>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (source, target) in iter {
            self.insert(source, target);
        }
    }
}

impl IntoIterator for CodeMapping {
    type Item = (Code, Code);
    type IntoIter = btree_map::IntoIter<Code, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CodeMapping {
    type Item = (&'a Code, &'a Code);
    type IntoIter = btree_map::Iter<'a, Code, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_alternate_representation() {
        let mapping: CodeMapping = [("801", "AUS")].into_iter().collect();
        assert_eq!(mapping.lookup(&Code::Int(801)), Some(&Code::from("AUS")));
        assert_eq!(mapping.get(&Code::Int(801)), None);
    }

    #[test]
    fn strict_coercion_rejects_non_numeric_keys() {
        let mapping: CodeMapping = [("1", "A"), ("ABC", "B")].into_iter().collect();
        let err = mapping.coerce_keys(KeyCoercion::Integer).unwrap_err();
        assert_eq!(
            err,
            ModelError::KeyCoercion {
                key: "ABC".to_string()
            }
        );
    }

    #[test]
    fn strict_coercion_rejects_padded_integers() {
        for key in ["0801", " 801", "+801"] {
            let mapping: CodeMapping = [("801", "AUS"), (key, "XXX")].into_iter().collect();
            assert_eq!(
                mapping.coerce_keys(KeyCoercion::Integer).unwrap_err(),
                ModelError::KeyCoercion {
                    key: key.to_string()
                }
            );
        }
    }

    #[test]
    fn strict_coercion_rejects_int_and_text_forms_of_one_key() {
        let mut mapping = CodeMapping::new();
        mapping.insert(801, "AUS");
        mapping.insert("801", "XXX");
        assert_eq!(
            mapping.coerce_keys(KeyCoercion::Integer).unwrap_err(),
            ModelError::DuplicateKey {
                key: Code::Int(801)
            }
        );
    }

    #[test]
    fn digits_only_coercion_drops_non_numeric_keys() {
        let mapping: CodeMapping = [("1", "A"), ("ABC", "B"), ("-2", "C")]
            .into_iter()
            .collect();
        let coerced = mapping
            .coerce_keys(KeyCoercion::IntegerDigitsOnly)
            .unwrap();
        assert_eq!(coerced.len(), 1);
        assert_eq!(coerced.get(&Code::Int(1)), Some(&Code::from("A")));
    }

    #[test]
    fn ambiguous_inversion_names_both_keys() {
        let mapping: CodeMapping = [("A", "x"), ("B", "x")].into_iter().collect();
        match mapping.invert() {
            Err(ModelError::AmbiguousInversion {
                value,
                first,
                second,
            }) => {
                assert_eq!(value, Code::from("x"));
                assert_eq!(first, Code::from("A"));
                assert_eq!(second, Code::from("B"));
            }
            other => panic!("expected ambiguous inversion, got {other:?}"),
        }
    }
}
