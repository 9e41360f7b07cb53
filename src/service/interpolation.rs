// SPDX-License-Identifier: MIT OR Apache-2.0

//! `${key.path}` reference resolution.
//!
//! References are resolved against the same document they appear in. The
//! resolver keeps the chain of keys it is currently expanding, so a key that
//! (transitively) references itself fails with
//! [`ConfigError::UnresolvableReference`] instead of recursing forever. Chain
//! depth, the number of substitution passes over a single string and the
//! length of an expanded string are all capped.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of keys being expanded at once.
pub const MAX_REFERENCE_DEPTH: usize = 32;

/// Maximum number of substitution passes over one string.
pub const MAX_PASSES: usize = 32;

/// Maximum length in bytes of one expanded string.
pub const MAX_EXPANDED_LEN: usize = 1 << 20;

static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("reference pattern is valid"));

/// Returns `true` if the string contains at least one `${...}` reference.
pub fn has_references(value: &str) -> bool {
    REFERENCE_PATTERN.is_match(value)
}

/// Distinct reference names in order of first appearance.
fn reference_names(value: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in REFERENCE_PATTERN.captures_iter(value) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Walks `key` through `root`, one mapping level per segment.
pub(crate) fn walk<'a>(root: &'a ConfigValue, key: &ConfigKey) -> Result<&'a ConfigValue> {
    let mut node = root;
    for (i, part) in key.segments().enumerate() {
        match node {
            ConfigValue::Mapping(map) => match map.get(part) {
                Some(child) => node = child,
                None => {
                    return Err(ConfigError::ConfigKeyError {
                        key: key.to_string(),
                        reached: key.prefix(i + 1),
                        reason: "key is absent".to_string(),
                        available: map.keys().cloned().collect(),
                    })
                }
            },
            other => {
                let parent = key.prefix(i);
                let parent = if parent.is_empty() {
                    "<root>".to_string()
                } else {
                    parent
                };
                return Err(ConfigError::ConfigKeyError {
                    key: key.to_string(),
                    reached: parent.clone(),
                    reason: format!("'{}' is a {}, not a mapping", parent, other.kind()),
                    available: Vec::new(),
                });
            }
        }
    }
    Ok(node)
}

/// Resolves references against one document.
pub(crate) struct Resolver<'a> {
    root: &'a ConfigValue,
    chain: Vec<String>,
}

impl<'a> Resolver<'a> {
    /// A resolver with nothing on the chain, for free-standing strings.
    pub(crate) fn new(root: &'a ConfigValue) -> Self {
        Self {
            root,
            chain: Vec::new(),
        }
    }

    /// A resolver expanding the value stored under `key`.
    pub(crate) fn for_key(root: &'a ConfigValue, key: &ConfigKey) -> Self {
        Self {
            root,
            chain: vec![key.to_string()],
        }
    }

    /// Resolves every string reachable from `value`.
    pub(crate) fn resolve_value(&mut self, value: &ConfigValue) -> Result<ConfigValue> {
        match value {
            ConfigValue::String(s) => Ok(ConfigValue::String(self.resolve_str(s)?)),
            ConfigValue::Sequence(items) => Ok(ConfigValue::Sequence(
                items
                    .iter()
                    .map(|item| self.resolve_value(item))
                    .collect::<Result<_>>()?,
            )),
            ConfigValue::Mapping(map) => Ok(ConfigValue::Mapping(
                map.iter()
                    .map(|(k, v)| self.resolve_value(v).map(|r| (k.clone(), r)))
                    .collect::<Result<_>>()?,
            )),
            ConfigValue::Null
            | ConfigValue::Bool(_)
            | ConfigValue::Integer(_)
            | ConfigValue::Float(_) => Ok(value.clone()),
        }
    }

    /// Substitutes references in `value` until none remain.
    pub(crate) fn resolve_str(&mut self, value: &str) -> Result<String> {
        let mut current = value.to_string();

        for _ in 0..MAX_PASSES {
            let names = reference_names(&current);
            if names.is_empty() {
                return Ok(current);
            }

            let mut next = current.clone();
            for name in &names {
                if let Some(text) = self.lookup(name)? {
                    let token = format!("${{{}}}", name);
                    let count = next.matches(token.as_str()).count();
                    let grown = (next.len() - count * token.len())
                        .saturating_add(count.saturating_mul(text.len()));
                    if grown > MAX_EXPANDED_LEN {
                        return Err(self.unresolvable(
                            name,
                            &format!("expansion longer than {} bytes", MAX_EXPANDED_LEN),
                        ));
                    }
                    next = next.replace(&token, &text);
                }
            }

            if next == current {
                // every remaining reference points at a null node
                return Err(self.unresolvable(&names[0], "reference resolves to null"));
            }
            current = next;
        }

        let remaining = reference_names(&current);
        let reference = remaining.first().map(String::as_str).unwrap_or_default();
        Err(self.unresolvable(
            reference,
            &format!("still unresolved after {} passes", MAX_PASSES),
        ))
    }

    /// Fully resolves the node behind `name` and renders it as text.
    ///
    /// Returns `None` when the node is null.
    fn lookup(&mut self, name: &str) -> Result<Option<String>> {
        if self.chain.iter().any(|k| k == name) {
            return Err(self.unresolvable(name, "reference cycle"));
        }
        if self.chain.len() >= MAX_REFERENCE_DEPTH {
            return Err(self.unresolvable(
                name,
                &format!("reference chain deeper than {}", MAX_REFERENCE_DEPTH),
            ));
        }

        let node = walk(self.root, &ConfigKey::from(name))?;

        self.chain.push(name.to_string());
        let resolved = self.resolve_value(node);
        self.chain.pop();

        let resolved = resolved?;
        if resolved.is_null() {
            Ok(None)
        } else {
            Ok(Some(resolved.to_string()))
        }
    }

    fn unresolvable(&self, reference: &str, reason: &str) -> ConfigError {
        let mut chain = self.chain.clone();
        chain.push(reference.to_string());
        ConfigError::UnresolvableReference {
            reference: reference.to_string(),
            chain,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::YamlParser;
    use crate::ports::ConfigParser;

    fn doc(yaml: &str) -> ConfigValue {
        YamlParser::new().parse(yaml).unwrap()
    }

    #[test]
    fn test_reference_names_are_distinct_and_ordered() {
        let names = reference_names("${b}/${a}/${b}");
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_has_references() {
        assert!(has_references("x ${a.b} y"));
        assert!(!has_references("plain $a {b}"));
        assert!(!has_references("${}"));
    }

    #[test]
    fn test_walk_nested() {
        let root = doc("a:\n  b:\n    c: 1\n");
        let node = walk(&root, &ConfigKey::from("a.b.c")).unwrap();
        assert_eq!(node, &ConfigValue::Integer(1));
    }

    #[test]
    fn test_walk_absent_key_lists_siblings() {
        let root = doc("a:\n  x: 1\n  y: 2\n");
        match walk(&root, &ConfigKey::from("a.z")) {
            Err(ConfigError::ConfigKeyError {
                reached, available, ..
            }) => {
                assert_eq!(reached, "a.z");
                assert_eq!(available, vec!["x".to_string(), "y".to_string()]);
            }
            other => panic!("expected ConfigKeyError, got {:?}", other),
        }
    }

    #[test]
    fn test_walk_through_scalar() {
        let root = doc("a: 5\n");
        match walk(&root, &ConfigKey::from("a.b")) {
            Err(ConfigError::ConfigKeyError { reached, reason, .. }) => {
                assert_eq!(reached, "a");
                assert!(reason.contains("not a mapping"));
            }
            other => panic!("expected ConfigKeyError, got {:?}", other),
        }
    }

    #[test]
    fn test_walk_null_root() {
        let root = ConfigValue::Null;
        match walk(&root, &ConfigKey::from("a")) {
            Err(ConfigError::ConfigKeyError { reached, .. }) => assert_eq!(reached, "<root>"),
            other => panic!("expected ConfigKeyError, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_chained_references() {
        let root = doc("a: one\nb: ${a}-two\nc: ${b}-three\n");
        let mut resolver = Resolver::new(&root);
        assert_eq!(resolver.resolve_str("${c}").unwrap(), "one-two-three");
    }

    #[test]
    fn test_resolve_repeated_reference() {
        let root = doc("x: 7\n");
        let mut resolver = Resolver::new(&root);
        assert_eq!(resolver.resolve_str("${x}+${x}").unwrap(), "7+7");
    }

    #[test]
    fn test_resolve_scalar_renderings() {
        let root = doc("n: 3\nf: 0.5\nb: false\nl: [a, b]\n");
        let mut resolver = Resolver::new(&root);
        assert_eq!(
            resolver.resolve_str("${n} ${f} ${b} ${l}").unwrap(),
            "3 0.5 false [a, b]"
        );
    }

    #[test]
    fn test_whole_float_keeps_decimal_point() {
        let root = doc("x: 2.0\ny: \"v${x}\"\n");
        let mut resolver = Resolver::for_key(&root, &ConfigKey::from("y"));
        assert_eq!(resolver.resolve_str("v${x}").unwrap(), "v2.0");
    }

    #[test]
    fn test_assembled_references_hit_pass_limit() {
        let mut yaml = String::from("d: \"$\"\n");
        let mut text = String::from("${d}");
        for i in 1..=40 {
            yaml.push_str(&format!("k{}: \"$\"\n", i));
            text.push_str(&format!("{{k{}}}", i));
        }
        let root = doc(&yaml);
        let mut resolver = Resolver::new(&root);
        match resolver.resolve_str(&text) {
            Err(ConfigError::UnresolvableReference {
                reference, reason, ..
            }) => {
                assert_eq!(reason, format!("still unresolved after {} passes", MAX_PASSES));
                assert_eq!(reference, "k32");
            }
            other => panic!("expected UnresolvableReference, got {:?}", other),
        }
    }

    #[test]
    fn test_doubling_expansion_is_bounded() {
        let mut yaml = String::from("k0: abcdefgh\n");
        for i in 1..=30 {
            yaml.push_str(&format!("k{}: \"${{k{}}}${{k{}}}\"\n", i, i - 1, i - 1));
        }
        let root = doc(&yaml);
        let mut resolver = Resolver::new(&root);
        match resolver.resolve_str("${k30}") {
            Err(ConfigError::UnresolvableReference { reason, .. }) => {
                assert!(reason.starts_with("expansion longer than"));
            }
            other => panic!("expected UnresolvableReference, got {:?}", other),
        }
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let root = doc("a: ${a}\n");
        let mut resolver = Resolver::for_key(&root, &ConfigKey::from("a"));
        let err = resolver.resolve_str("${a}").unwrap_err();
        match err {
            ConfigError::UnresolvableReference { reason, chain, .. } => {
                assert_eq!(reason, "reference cycle");
                assert_eq!(chain, vec!["a".to_string(), "a".to_string()]);
            }
            other => panic!("expected UnresolvableReference, got {:?}", other),
        }
    }

    #[test]
    fn test_null_reference_fails() {
        let root = doc("a: null\n");
        let mut resolver = Resolver::new(&root);
        assert!(matches!(
            resolver.resolve_str("x${a}"),
            Err(ConfigError::UnresolvableReference { .. })
        ));
    }

    #[test]
    fn test_missing_reference_is_key_error() {
        let root = doc("a: 1\n");
        let mut resolver = Resolver::new(&root);
        assert!(matches!(
            resolver.resolve_str("${nope}"),
            Err(ConfigError::ConfigKeyError { .. })
        ));
    }

    #[test]
    fn test_deep_chain_is_bounded() {
        let mut yaml = String::from("k0: end\n");
        for i in 1..=(MAX_REFERENCE_DEPTH + 5) {
            yaml.push_str(&format!("k{}: ${{k{}}}\n", i, i - 1));
        }
        let root = doc(&yaml);
        let mut resolver = Resolver::new(&root);
        let top = format!("${{k{}}}", MAX_REFERENCE_DEPTH + 5);
        assert!(matches!(
            resolver.resolve_str(&top),
            Err(ConfigError::UnresolvableReference { .. })
        ));
    }

    #[test]
    fn test_resolve_value_through_containers() {
        let root = doc("base: /data\nsection:\n  dirs: [\"${base}/a\", 3]\n  nested: {p: \"${base}/b\"}\n");
        let section = walk(&root, &ConfigKey::from("section")).unwrap();
        let mut resolver = Resolver::for_key(&root, &ConfigKey::from("section"));
        let resolved = resolver.resolve_value(section).unwrap();
        assert_eq!(resolved.to_string(), "{dirs: [/data/a, 3], nested: {p: /data/b}}");
    }
}
