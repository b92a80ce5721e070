//! Completion percentages. Everything here is recomputed from scratch on each
//! call; nothing is cached between mutations.

use st_types::{Catalog, CompletedSet, Section, Topic};

/// `round(100 * done / total)`, half-up, `0` for an empty universe.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (done * 200 + total) / (2 * total);
    rounded.min(100) as u8
}

fn count_done<'a>(topics: impl Iterator<Item = &'a Topic>, completed: &CompletedSet) -> (usize, usize) {
    topics.fold((0, 0), |(done, total), topic| {
        (done + usize::from(completed.contains(&topic.title)), total + 1)
    })
}

pub fn global_percent(catalog: &Catalog, completed: &CompletedSet) -> u8 {
    let (done, total) = count_done(catalog.topics(), completed);
    percent(done, total)
}

pub fn section_percent(section: &Section, completed: &CompletedSet) -> u8 {
    let (done, total) = count_done(section.topics(), completed);
    percent(done, total)
}

/// Every topic of a non-empty section is done.
pub fn section_complete(section: &Section, completed: &CompletedSet) -> bool {
    let (done, total) = count_done(section.topics(), completed);
    total > 0 && done == total
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub global: u8,
    pub sections: Vec<u8>,
}

impl CatalogStats {
    pub fn compute(catalog: &Catalog, completed: &CompletedSet) -> Self {
        Self {
            global: global_percent(catalog, completed),
            sections: catalog
                .sections()
                .iter()
                .map(|s| section_percent(s, completed))
                .collect(),
        }
    }
}
