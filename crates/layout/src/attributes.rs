use indexmap::IndexMap;

/// The raw attributes of one element, in markup order. Names are lower-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The inline `style` attribute.
    pub fn style(&self) -> Option<&str> {
        self.get("style")
    }

    /// `data-*` attributes with the prefix stripped and values trimmed.
    pub fn data(&self) -> IndexMap<String, String> {
        self.values
            .iter()
            .filter_map(|(name, value)| {
                let key = name.strip_prefix("data-")?;
                (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}
