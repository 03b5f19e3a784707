use crate::types::RowValues;

/// Key a value is bound under: a 1-based position or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Index(usize),
    Name(String),
}

impl From<usize> for ParamKey {
    fn from(index: usize) -> Self {
        ParamKey::Index(index)
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        ParamKey::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        ParamKey::Name(name)
    }
}

/// Ordered parameter mapping.
///
/// Rebinding a key replaces its value in place, so iteration order is the
/// order in which keys were first bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    entries: Vec<(ParamKey, RowValues)>,
}

impl BoundParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: ParamKey, value: RowValues) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &ParamKey) -> Option<&RowValues> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &RowValues)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(ParamKey, RowValues)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_and_keeps_position() {
        let mut params = BoundParams::new();
        params.bind("a".into(), RowValues::Int(1));
        params.bind("b".into(), RowValues::Int(2));
        params.bind("a".into(), RowValues::Int(3));

        let seen: Vec<_> = params.iter().collect();
        assert_eq!(
            seen,
            vec![
                (&ParamKey::Name("a".into()), &RowValues::Int(3)),
                (&ParamKey::Name("b".into()), &RowValues::Int(2)),
            ]
        );
    }

    #[test]
    fn index_and_name_keys_are_distinct() {
        let mut params = BoundParams::new();
        params.bind(ParamKey::Index(1), RowValues::Int(1));
        params.bind("1".into(), RowValues::Int(2));
        assert_eq!(params.len(), 2);
        assert_eq!(params.get(&ParamKey::Index(1)), Some(&RowValues::Int(1)));
    }
}
