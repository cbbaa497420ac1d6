//! Section registry
//!
//! Maps the component name stored on a section to the kind the renderer
//! draws for it. The table is built once and never changes afterwards;
//! a name missing from it resolves to [`Resolution::NotFound`], which the
//! renderer turns into a visible placeholder.

use homestretch_sections::SectionKind;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static BUILTIN: LazyLock<SectionRegistry> =
    LazyLock::new(|| SectionRegistry::with_kinds(SectionKind::ALL));

// ============================================================================
// Resolution
// ============================================================================

/// Result of looking up a component name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The name is bound to a renderable kind
    Component(SectionKind),
    /// The name is not in the table
    NotFound,
}

impl Resolution {
    /// The resolved kind, if any
    pub fn kind(self) -> Option<SectionKind> {
        match self {
            Resolution::Component(kind) => Some(kind),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, Resolution::Component(_))
    }
}

// ============================================================================
// SectionRegistry
// ============================================================================

/// Immutable `component name -> kind` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    entries: BTreeMap<&'static str, SectionKind>,
}

impl SectionRegistry {
    /// Registry holding every built-in component
    pub fn builtin() -> &'static SectionRegistry {
        &BUILTIN
    }

    /// Registry holding only the given kinds
    pub fn with_kinds(kinds: impl IntoIterator<Item = SectionKind>) -> Self {
        let entries = kinds
            .into_iter()
            .map(|kind| (kind.component_name(), kind))
            .collect();
        Self { entries }
    }

    /// Look up a component name (exact, case-sensitive)
    pub fn resolve(&self, component: &str) -> Resolution {
        match self.entries.get(component) {
            Some(kind) => Resolution::Component(*kind),
            None => Resolution::NotFound,
        }
    }

    pub fn contains(&self, component: &str) -> bool {
        self.entries.contains_key(component)
    }

    /// Registered component names, sorted
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Registered kinds, sorted by component name
    pub fn kinds(&self) -> impl Iterator<Item = SectionKind> + '_ {
        self.entries.values().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_resolves_every_kind() {
        let registry = SectionRegistry::builtin();
        assert_eq!(registry.len(), SectionKind::ALL.len());

        for kind in SectionKind::ALL {
            assert_eq!(
                registry.resolve(kind.component_name()),
                Resolution::Component(kind)
            );
        }
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let registry = SectionRegistry::builtin();
        assert_eq!(registry.resolve("CarouselSection"), Resolution::NotFound);
        assert_eq!(registry.resolve(""), Resolution::NotFound);
        // lookups are exact
        assert_eq!(registry.resolve("herosection"), Resolution::NotFound);
    }

    #[test]
    fn test_subset_registry() {
        let registry = SectionRegistry::with_kinds([SectionKind::Hero, SectionKind::News]);
        assert!(registry.contains("HeroSection"));
        assert!(!registry.contains("CountdownTimer"));
        assert_eq!(registry.resolve("CountdownTimer").kind(), None);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["HeroSection", "NewsSection"]
        );
    }
}
