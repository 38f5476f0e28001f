//! Icon registry
//!
//! Single source of truth for which icons exist. Maps icon names to their
//! definitions and keeps an alias table that is consulted before the main
//! mapping on lookup. The registry lives only in memory; it is rebuilt from
//! the built-in table on every start.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::builtin;
use super::error::IconError;
use super::types::{IconCategory, IconDefinition};

/// Name → definition mapping in insertion order
pub type IconMap = IndexMap<String, IconDefinition>;

/// Result of [`IconRegistry::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Registry counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub total_icons: usize,
    pub category_counts: HashMap<IconCategory, usize>,
    pub type_distribution: HashMap<String, usize>,
}

/// Mutable icon registry with alias support
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    icons: IconMap,
    aliases: HashMap<String, String>,
}

impl IconRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in icon table
    pub fn builtin() -> Self {
        Self::from_definitions(builtin::definitions())
    }

    /// Registry keyed by each definition's own name
    pub fn from_definitions(definitions: impl IntoIterator<Item = IconDefinition>) -> Self {
        let mut registry = Self::new();
        registry.register_batch(definitions);
        registry
    }

    /// Insert or overwrite a definition under its own name
    pub fn register(&mut self, definition: IconDefinition) {
        debug!("Registering icon: {}", definition.name);
        self.icons.insert(definition.name.clone(), definition);
    }

    pub fn register_batch(&mut self, definitions: impl IntoIterator<Item = IconDefinition>) {
        for definition in definitions {
            self.register(definition);
        }
    }

    /// Look up a definition, resolving aliases first
    pub fn get(&self, name: &str) -> Option<&IconDefinition> {
        let actual = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.icons.get(actual)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Snapshot of every definition (aliases excluded)
    pub fn get_all(&self) -> IconMap {
        self.icons.clone()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Definitions in one category, in insertion order
    pub fn get_by_category(&self, category: IconCategory) -> Vec<&IconDefinition> {
        self.icons
            .values()
            .filter(|def| def.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name, keywords and category
    pub fn search(&self, query: &str) -> Vec<&IconDefinition> {
        let query = query.to_lowercase();
        self.icons.values().filter(|def| def.matches(&query)).collect()
    }

    /// Make `alias` resolve to `target`.
    ///
    /// Fails without touching the alias table when `target` does not resolve.
    /// Aliases of aliases are stored against the final icon name.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<(), IconError> {
        if !self.has(target) {
            return Err(IconError::AliasTargetMissing(target.to_string()));
        }
        let canonical = self
            .aliases
            .get(target)
            .cloned()
            .unwrap_or_else(|| target.to_string());
        debug!("Aliasing icon {} -> {}", alias, canonical);
        self.aliases.insert(alias.to_string(), canonical);
        Ok(())
    }

    /// Remove an icon by its registered name. Aliases pointing at it are kept
    /// and resolve to nothing afterwards.
    pub fn remove(&mut self, name: &str) -> bool {
        self.icons.shift_remove(name).is_some()
    }

    /// Distinct categories currently in use, in first-seen order
    pub fn get_categories(&self) -> Vec<IconCategory> {
        let mut seen = HashSet::new();
        self.icons
            .values()
            .map(|def| def.category)
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// All names, or the names within one category
    pub fn get_icon_names(&self, category: Option<IconCategory>) -> Vec<String> {
        match category {
            Some(category) => self
                .get_by_category(category)
                .into_iter()
                .map(|def| def.name.clone())
                .collect(),
            None => self.icons.keys().cloned().collect(),
        }
    }

    /// Report every structural problem without changing anything
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        for (key, def) in &self.icons {
            if *key != def.name {
                errors.push(format!(
                    "Icon name mismatch: registry key \"{}\" !== definition name \"{}\"",
                    key, def.name
                ));
            }

            if def.import_path.is_empty() {
                errors.push(format!("Icon \"{}\" missing import path", key));
            }

            if !def.kind.is_recognized() {
                errors.push(format!("Icon \"{}\" has invalid type: {}", key, def.kind));
            }
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Every definition, for persistence
    pub fn export(&self) -> Vec<IconDefinition> {
        self.icons.values().cloned().collect()
    }

    /// Replace the whole registry. Previous entries and all aliases are dropped.
    pub fn import(&mut self, definitions: impl IntoIterator<Item = IconDefinition>) {
        self.icons.clear();
        self.aliases.clear();
        self.register_batch(definitions);
    }

    /// Copy entries in under their given keys; incoming entries win on conflict
    pub fn merge(&mut self, other: IconMap) {
        self.icons.extend(other);
    }

    pub fn get_stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            total_icons: self.icons.len(),
            ..Default::default()
        };

        for def in self.icons.values() {
            *stats.category_counts.entry(def.category).or_insert(0) += 1;
            *stats
                .type_distribution
                .entry(def.kind.as_str().to_string())
                .or_insert(0) += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::types::IconKind;

    fn gear() -> IconDefinition {
        IconDefinition::new("gear", IconCategory::Actions, "mod/gear", IconKind::Tsx)
            .with_keywords(&["settings"])
    }

    fn def(name: &str, category: IconCategory) -> IconDefinition {
        IconDefinition::new(name, category, &format!("mod/{}", name), IconKind::Tsx)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = IconRegistry::new();
        registry.register(gear());

        assert_eq!(registry.get("gear"), Some(&gear()));
        assert!(registry.has("gear"));
        assert!(!registry.has("cog"));
        assert!(registry.get("cog").is_none());
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = IconRegistry::new();
        registry.register(gear());
        let replacement = IconDefinition::new("gear", IconCategory::Menu, "mod/gear2", IconKind::Svg);
        registry.register(replacement.clone());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("gear"), Some(&replacement));
    }

    #[test]
    fn test_register_batch_empty_is_noop() {
        let mut registry = IconRegistry::builtin();
        let before = registry.len();
        registry.register_batch(Vec::new());
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_remove() {
        let mut registry = IconRegistry::new();
        registry.register(gear());

        assert!(registry.remove("gear"));
        assert!(registry.get("gear").is_none());
        assert!(!registry.has("gear"));
        assert!(!registry.remove("gear"));
    }

    #[test]
    fn test_alias_missing_target_fails_without_mutation() {
        let mut registry = IconRegistry::new();
        registry.register(gear());
        registry.alias("cog", "gear").unwrap();

        let err = registry.alias("cog", "missing").unwrap_err();
        assert_eq!(err, IconError::AliasTargetMissing("missing".to_string()));
        assert_eq!(
            err.to_string(),
            "Cannot create alias: target icon \"missing\" does not exist"
        );
        // Previous alias survives
        assert_eq!(registry.get("cog"), registry.get("gear"));

        assert!(registry.alias("wheel", "missing").is_err());
        assert!(!registry.has("wheel"));
    }

    #[test]
    fn test_alias_resolves_to_target() {
        let mut registry = IconRegistry::new();
        registry.register(gear());
        registry.alias("cog", "gear").unwrap();

        assert!(registry.has("cog"));
        assert_eq!(registry.get("cog"), registry.get("gear"));
    }

    #[test]
    fn test_alias_of_alias() {
        let mut registry = IconRegistry::new();
        registry.register(gear());
        registry.alias("cog", "gear").unwrap();
        registry.alias("wheel", "cog").unwrap();

        assert_eq!(registry.get("wheel"), Some(&gear()));
    }

    #[test]
    fn test_alias_dangles_after_remove() {
        let mut registry = IconRegistry::new();
        registry.register(gear());
        registry.alias("cog", "gear").unwrap();
        registry.remove("gear");

        assert!(registry.get("cog").is_none());
        assert!(!registry.has("cog"));

        // Re-registering the target revives the alias
        registry.register(gear());
        assert!(registry.has("cog"));
    }

    #[test]
    fn test_get_by_category_keeps_insertion_order() {
        let mut registry = IconRegistry::new();
        registry.register(def("b", IconCategory::File));
        registry.register(def("a", IconCategory::File));
        registry.register(def("c", IconCategory::Alerts));

        let names: Vec<_> = registry
            .get_by_category(IconCategory::File)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(registry.get_by_category(IconCategory::Social).is_empty());
    }

    #[test]
    fn test_search_fields() {
        let mut registry = IconRegistry::new();
        registry.register(gear());
        registry.register(def("folder", IconCategory::File));

        // keyword
        assert_eq!(registry.search("SETTINGS"), vec![&gear()]);
        // name
        assert_eq!(registry.search("Fold").len(), 1);
        // category
        assert_eq!(registry.search("action"), vec![&gear()]);
        // nothing
        assert!(registry.search("zebra").is_empty());
    }

    #[test]
    fn test_gear_scenario() {
        let mut registry = IconRegistry::new();
        registry.register(gear());

        let hits = registry.search("settings");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], &gear());
        assert!(registry.get_by_category(IconCategory::Actions).contains(&&gear()));
        assert_eq!(registry.get_stats().type_distribution.get("tsx"), Some(&1));
    }

    #[test]
    fn test_empty_registry() {
        let registry = IconRegistry::new();
        assert!(registry.get_all().is_empty());
        assert!(registry.get_categories().is_empty());

        let stats = registry.get_stats();
        assert_eq!(stats.total_icons, 0);
        assert!(stats.category_counts.is_empty());
        assert!(stats.type_distribution.is_empty());
    }

    #[test]
    fn test_categories_and_names() {
        let mut registry = IconRegistry::new();
        registry.register(def("a", IconCategory::File));
        registry.register(def("b", IconCategory::Alerts));
        registry.register(def("c", IconCategory::File));

        let categories = registry.get_categories();
        assert_eq!(categories.len(), 2);
        assert!(categories.contains(&IconCategory::File));
        assert!(categories.contains(&IconCategory::Alerts));

        assert_eq!(registry.get_icon_names(None), vec!["a", "b", "c"]);
        assert_eq!(registry.get_icon_names(Some(IconCategory::File)), vec!["a", "c"]);
    }

    #[test]
    fn test_validate_clean_registry() {
        let report = IconRegistry::builtin().validate();
        assert_eq!(
            report,
            ValidationReport {
                valid: true,
                errors: vec![]
            }
        );
    }

    #[test]
    fn test_validate_reports_name_mismatch() {
        let mut registry = IconRegistry::new();
        let mut tampered = IndexMap::new();
        tampered.insert("gear".to_string(), def("cog", IconCategory::Actions));
        registry.merge(tampered);

        let report = registry.validate();
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec!["Icon name mismatch: registry key \"gear\" !== definition name \"cog\"".to_string()]
        );
    }

    #[test]
    fn test_validate_reports_path_and_type() {
        let mut registry = IconRegistry::new();
        registry.register(IconDefinition::new("blank", IconCategory::File, "", IconKind::Tsx));
        registry.register(IconDefinition::new("odd", IconCategory::File, "p", "png"));

        let report = registry.validate();
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Icon \"blank\" missing import path".to_string(),
                "Icon \"odd\" has invalid type: png".to_string(),
            ]
        );
        // Validation does not mutate
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_export_import_round_trip_drops_aliases() {
        let mut registry = IconRegistry::builtin();
        registry.register(gear());
        registry.alias("cog", "gear").unwrap();
        let originals = registry.get_all();

        let exported = registry.export();
        registry.import(exported);

        for (name, definition) in &originals {
            assert_eq!(registry.get(name), Some(definition));
        }
        assert!(!registry.has("cog"));
    }

    #[test]
    fn test_import_replaces_everything() {
        let mut registry = IconRegistry::builtin();
        registry.import(vec![gear()]);

        assert_eq!(registry.len(), 1);
        assert!(registry.has("gear"));
        assert!(!registry.has("business"));
    }

    #[test]
    fn test_merge_incoming_wins() {
        let mut registry = IconRegistry::new();
        registry.register(gear());
        registry.register(def("folder", IconCategory::File));

        let replacement = IconDefinition::new("gear", IconCategory::Menu, "other/gear", IconKind::Mui);
        let mut other = IndexMap::new();
        other.insert("gear".to_string(), replacement.clone());
        other.insert("bell".to_string(), def("bell", IconCategory::Alerts));
        registry.merge(other);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("gear"), Some(&replacement));
        assert!(registry.has("folder"));
        assert!(registry.has("bell"));
    }

    #[test]
    fn test_stats_counts() {
        let mut registry = IconRegistry::new();
        registry.register(def("a", IconCategory::File));
        registry.register(def("b", IconCategory::File));
        registry.register(IconDefinition::new("c", IconCategory::Alerts, "p", IconKind::Svg));

        let stats = registry.get_stats();
        assert_eq!(stats.total_icons, 3);
        assert_eq!(stats.category_counts[&IconCategory::File], 2);
        assert_eq!(stats.category_counts[&IconCategory::Alerts], 1);
        assert_eq!(stats.type_distribution["tsx"], 2);
        assert_eq!(stats.type_distribution["svg"], 1);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let mut registry = IconRegistry::new();
        registry.register(gear());
        let value = serde_json::to_value(registry.get_stats()).unwrap();

        assert_eq!(value["totalIcons"], 1);
        assert_eq!(value["categoryCounts"]["actions"], 1);
        assert_eq!(value["typeDistribution"]["tsx"], 1);
    }
}
