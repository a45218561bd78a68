//! Entity kinds and the tag spellings that select them.
//!
//! A tagged literal such as `` $items`…` `` names one entity kind and whether
//! the literal holds a single value or a comma-separated list.

use std::fmt;

/// One of the fixed categories of named game entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Character classes.
    Class,
    /// Status effects.
    Effect,
    /// Familiars.
    Familiar,
    /// Items.
    Item,
    /// Adventuring locations.
    Location,
    /// Monsters.
    Monster,
    /// Challenge paths.
    Path,
    /// Skills.
    Skill,
}

impl EntityKind {
    /// Every kind, in a stable order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Class,
        EntityKind::Effect,
        EntityKind::Familiar,
        EntityKind::Item,
        EntityKind::Location,
        EntityKind::Monster,
        EntityKind::Path,
        EntityKind::Skill,
    ];

    /// Singular tag name (without the `$`).
    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Class => "class",
            EntityKind::Effect => "effect",
            EntityKind::Familiar => "familiar",
            EntityKind::Item => "item",
            EntityKind::Location => "location",
            EntityKind::Monster => "monster",
            EntityKind::Path => "path",
            EntityKind::Skill => "skill",
        }
    }

    /// Plural tag name (without the `$`). Also the vocabulary file stem.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Class => "classes",
            EntityKind::Effect => "effects",
            EntityKind::Familiar => "familiars",
            EntityKind::Item => "items",
            EntityKind::Location => "locations",
            EntityKind::Monster => "monsters",
            EntityKind::Path => "paths",
            EntityKind::Skill => "skills",
        }
    }

    /// Whether the vocabulary can contain display names shared by several
    /// entities, and so needs the prefix/suffix index.
    #[must_use]
    pub fn requires_disambiguation(self) -> bool {
        matches!(
            self,
            EntityKind::Effect | EntityKind::Item | EntityKind::Monster | EntityKind::Skill
        )
    }

    /// Looks up a kind by its plural name.
    #[must_use]
    pub fn from_plural(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.plural() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Whether a tag expects one value or a comma-separated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// `$item`, `$effect`, …
    Single,
    /// `$items`, `$effects`, …
    List,
}

/// The resolved meaning of a recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpec {
    /// Which vocabulary the literal is checked against.
    pub kind: EntityKind,
    /// Whether the literal is split on separators.
    pub multiplicity: Multiplicity,
}

impl TagSpec {
    /// Returns `true` for list tags.
    #[must_use]
    pub fn is_list(self) -> bool {
        self.multiplicity == Multiplicity::List
    }
}

/// Resolves the full tag text (including the leading `$`) to a tag spec.
///
/// Anything other than `$<singular>` or `$<plural>` of a known kind, such as
/// a member expression or an unprefixed identifier, yields `None`.
#[must_use]
pub fn lookup(tag_text: &str) -> Option<TagSpec> {
    let name = tag_text.strip_prefix('$')?;
    EntityKind::ALL.into_iter().find_map(|kind| {
        if kind.singular() == name {
            Some(TagSpec { kind, multiplicity: Multiplicity::Single })
        } else if kind.plural() == name {
            Some(TagSpec { kind, multiplicity: Multiplicity::List })
        } else {
            None
        }
    })
}
