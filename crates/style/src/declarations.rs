//! Declaration lists (`property: value; ...`) and their resolution into a `StyleRecord`.
use crate::properties::rule_for;
use crate::record::StyleRecord;
use indexmap::IndexMap;

/// Property name (lower-cased) to raw value, in first-declaration order.
pub type Declarations = IndexMap<String, String>;

/// Splits a declaration list. Entries without a colon, or with an empty name or value,
/// are skipped. A repeated property keeps its first position and takes its last value.
pub fn parse_declarations(text: &str) -> Declarations {
    let mut declarations = Declarations::new();
    for entry in text.split(';') {
        let Some((name, value)) = entry.split_once(':') else {
            if !entry.trim().is_empty() {
                log::debug!("Skipping malformed declaration '{}'", entry.trim());
            }
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            log::debug!("Skipping incomplete declaration '{}'", entry.trim());
            continue;
        }
        declarations.insert(name.to_ascii_lowercase(), value.to_string());
    }
    declarations
}

/// Converts each known property and merges it into `record`. Unknown properties and
/// values with nothing to record are ignored.
pub fn resolve(declarations: &Declarations, mut record: StyleRecord) -> StyleRecord {
    for (property, raw) in declarations {
        let Some(rule) = rule_for(property) else {
            log::debug!("Ignoring unsupported property '{}'", property);
            continue;
        };
        match rule.converter.convert(raw) {
            Some(value) => record.apply(rule.key, value),
            None => log::debug!("Nothing to record for '{}: {}'", property, raw),
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::StyleToken;

    #[test]
    fn test_parse_declarations() {
        let parsed = parse_declarations(" Color : red ;font-size:12pt;; bogus; :x; margin-top: ");
        let pairs: Vec<_> = parsed.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("color", "red"), ("font-size", "12pt")]);
    }

    #[test]
    fn test_repeated_property_keeps_first_position_last_value() {
        let parsed = parse_declarations("color: red; top: 3; color: blue");
        let pairs: Vec<_> = parsed.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("color", "blue"), ("top", "3")]);
    }

    #[test]
    fn test_value_may_contain_colons() {
        let parsed = parse_declarations("href: https://example.com/a");
        assert_eq!(parsed["href"], "https://example.com/a");
    }

    #[test]
    fn test_resolve_skips_unknown_properties() {
        let record = resolve(
            &parse_declarations("border: 1px solid; font-weight: bold; font-style: normal"),
            StyleRecord::new(),
        );
        assert_eq!(record.styles, vec![StyleToken::Bold]);
    }

    #[test]
    fn test_resolve_accumulates_within_one_fragment() {
        let base = resolve(&parse_declarations("margin-left: 25"), StyleRecord::new());
        let record = resolve(&parse_declarations("margin-left: 10; padding-left: 2"), base);
        assert_eq!(record.margin_left, Some(35.0));
        assert_eq!(record.padding_left, Some(2.0));
    }
}
