//! The server roster: which booths exist and which subsection owns them.

use std::collections::BTreeMap;

use cs_core::{Category, ServerId};

use crate::{ScheduleError, ScheduleResult};

/// One booth on the roster.
///
/// `rank` is the booth's position within its subsection when ordered by
/// `ServerId` (0 = lowest id).  A staffing plan of `n` servers for an hour
/// brings ranks `0..n` online.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerSpec {
    pub id:       ServerId,
    pub category: Category,
    pub rank:     u32,
}

/// All booths of the facility, grouped by subsection.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    by_category: BTreeMap<Category, Vec<ServerSpec>>,
}

impl Roster {
    /// Build from `(id, subsection)` pairs in any order.
    pub fn new(servers: impl IntoIterator<Item = (ServerId, Category)>) -> ScheduleResult<Self> {
        let mut by_category: BTreeMap<Category, Vec<ServerId>> = BTreeMap::new();
        let mut seen = std::collections::HashSet::new();
        for (id, category) in servers {
            if !seen.insert(id) {
                return Err(ScheduleError::DuplicateServer(id));
            }
            by_category.entry(category).or_default().push(id);
        }

        let by_category = by_category
            .into_iter()
            .map(|(category, mut ids)| {
                ids.sort_unstable();
                let specs = ids
                    .into_iter()
                    .enumerate()
                    .map(|(rank, id)| ServerSpec { id, category, rank: rank as u32 })
                    .collect();
                (category, specs)
            })
            .collect();

        Ok(Self { by_category })
    }

    /// Subsection categories present on the roster, in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.by_category.keys().copied()
    }

    /// Servers of one subsection ordered by id (empty if none).
    pub fn servers_in(&self, category: Category) -> &[ServerSpec] {
        self.by_category.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of booths in a subsection, which caps its staffing level.
    pub fn capacity(&self, category: Category) -> u32 {
        self.servers_in(category).len() as u32
    }

    pub fn has(&self, category: Category) -> bool {
        self.by_category.contains_key(&category)
    }

    /// Total booths across all subsections.
    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}
