//! # Section Store
//!
//! Flat, ordered list of resume sections plus the active section id.
//! Same identity discipline as the document tree, without nesting: reorders
//! arrive as a complete, already permuted sequence.

use pagecraft_model::{seed_section, seed_sections, IDGenerator, Section, SectionId, SectionType};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SectionError {
    #[error("Section not found: {0}")]
    NotFound(SectionId),

    #[error("Duplicate section id: {0}")]
    DuplicateId(SectionId),

    #[error("Section {id} is a {expected} section, not {found}")]
    TypeMismatch {
        id: SectionId,
        expected: SectionType,
        found: SectionType,
    },

    #[error("Invalid reorder: {0}")]
    InvalidReorder(String),
}

#[derive(Debug, Clone, Default)]
pub struct SectionStore {
    sections: Vec<Section>,
    active: Option<SectionId>,
}

impl SectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store initialized with the seed resume
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.reset_to_seed();
        store
    }

    /// Replace all sections
    pub fn set_all(&mut self, sections: Vec<Section>) -> Result<(), SectionError> {
        ensure_unique(&sections)?;

        self.sections = sections;
        if let Some(active) = &self.active {
            if self.get(active).is_none() {
                self.active = None;
            }
        }

        debug!(count = self.sections.len(), "Replaced sections");
        Ok(())
    }

    pub fn reset_to_seed(&mut self) {
        self.sections = seed_sections();
        self.active = None;
    }

    /// Append a section
    pub fn add(&mut self, section: Section) -> Result<(), SectionError> {
        if self.get(&section.id).is_some() {
            return Err(SectionError::DuplicateId(section.id));
        }

        debug!(section_id = %section.id, section_type = %section.section_type(), "Added section");
        self.sections.push(section);
        Ok(())
    }

    /// Append a copy of the seed section of `section_type` under an id not
    /// yet used in the store
    pub fn add_from_template(
        &mut self,
        section_type: SectionType,
        ids: &mut IDGenerator,
    ) -> Result<SectionId, SectionError> {
        let mut section = seed_section(section_type);
        section.id = ids.new_prefixed_id(section_type.as_str());
        while self.get(&section.id).is_some() {
            section.id = ids.new_prefixed_id(section_type.as_str());
        }

        let id = section.id.clone();
        self.add(section)?;
        Ok(id)
    }

    /// Replace the section with the same id. Its type cannot change.
    pub fn update(&mut self, section: Section) -> Result<(), SectionError> {
        let slot = self
            .sections
            .iter_mut()
            .find(|s| s.id == section.id)
            .ok_or_else(|| SectionError::NotFound(section.id.clone()))?;

        let found = section.section_type();
        if slot.section_type() != found {
            return Err(SectionError::TypeMismatch {
                id: section.id,
                expected: slot.section_type(),
                found,
            });
        }

        debug!(section_id = %section.id, "Updated section");
        *slot = section;
        Ok(())
    }

    /// Remove a section, clearing the active id if it pointed there
    pub fn remove(&mut self, id: &str) -> Result<Section, SectionError> {
        let index = self
            .position(id)
            .ok_or_else(|| SectionError::NotFound(id.to_string()))?;

        if self.active.as_deref() == Some(id) {
            self.active = None;
        }

        debug!(section_id = id, "Removed section");
        Ok(self.sections.remove(index))
    }

    pub fn set_active(&mut self, id: Option<&str>) -> Result<(), SectionError> {
        if let Some(id) = id {
            if self.get(id).is_none() {
                return Err(SectionError::NotFound(id.to_string()));
            }
        }
        self.active = id.map(str::to_string);
        Ok(())
    }

    /// Adopt a permuted sequence. It must hold exactly the current ids.
    pub fn reorder(&mut self, sections: Vec<Section>) -> Result<(), SectionError> {
        if sections.len() != self.sections.len() {
            return Err(SectionError::InvalidReorder(format!(
                "expected {} sections, got {}",
                self.sections.len(),
                sections.len()
            )));
        }
        ensure_unique(&sections)?;
        if let Some(unknown) = sections.iter().find(|s| self.get(&s.id).is_none()) {
            return Err(SectionError::InvalidReorder(format!(
                "unknown section {}",
                unknown.id
            )));
        }

        self.sections = sections;
        Ok(())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Section> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Sequence produced by dropping `active_id` onto `over_id`: the dragged
/// section is taken out and reinserted at the index `over_id` had.
/// `None` when both ids are equal or either is unknown.
pub fn drag_reorder(sections: &[Section], active_id: &str, over_id: &str) -> Option<Vec<Section>> {
    if active_id == over_id {
        return None;
    }

    let old_index = sections.iter().position(|s| s.id == active_id)?;
    let new_index = sections.iter().position(|s| s.id == over_id)?;

    let mut reordered = sections.to_vec();
    let moved = reordered.remove(old_index);
    reordered.insert(new_index, moved);
    Some(reordered)
}

fn ensure_unique(sections: &[Section]) -> Result<(), SectionError> {
    let mut seen = HashSet::new();
    for section in sections {
        if !seen.insert(section.id.as_str()) {
            return Err(SectionError::DuplicateId(section.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::SectionData;

    fn ids(store: &SectionStore) -> Vec<&str> {
        store.sections().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_seeded_store() {
        let store = SectionStore::seeded();
        assert_eq!(
            ids(&store),
            vec!["header", "summary", "experience", "education", "skills"]
        );
        assert_eq!(store.active_id(), None);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut store = SectionStore::seeded();
        let err = store.add(seed_section(SectionType::Skills)).unwrap_err();
        assert_eq!(err, SectionError::DuplicateId("skills".to_string()));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_add_from_template_uses_fresh_id() {
        let mut store = SectionStore::seeded();
        let mut gen = IDGenerator::from_seed("resume".to_string());

        let first = store.add_from_template(SectionType::Skills, &mut gen).unwrap();
        let second = store.add_from_template(SectionType::Skills, &mut gen).unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("skills-"));
        assert_eq!(store.len(), 7);
        assert_eq!(store.sections().last().unwrap().id, second);
    }

    #[test]
    fn test_add_from_template_skips_ids_in_use() {
        let mut store = SectionStore::new();
        let mut taken = seed_section(SectionType::Skills);
        taken.id = "skills-1".to_string();
        store.add(taken).unwrap();

        let mut gen = IDGenerator::from_seed("resume".to_string());
        let id = store.add_from_template(SectionType::Skills, &mut gen).unwrap();

        assert_eq!(id, "skills-2");
        assert_eq!(ids(&store), vec!["skills-1", "skills-2"]);
    }

    #[test]
    fn test_update_replaces_by_id() {
        let mut store = SectionStore::seeded();
        let mut summary = store.get("summary").unwrap().clone();
        summary.data = SectionData::Summary {
            content: "Rustacean".to_string(),
        };

        store.update(summary.clone()).unwrap();
        assert_eq!(store.get("summary"), Some(&summary));
        assert_eq!(store.position("summary"), Some(1));
    }

    #[test]
    fn test_update_cannot_change_type() {
        let mut store = SectionStore::seeded();
        let mut wrong = seed_section(SectionType::Skills);
        wrong.id = "summary".to_string();

        let err = store.update(wrong).unwrap_err();
        assert_eq!(
            err,
            SectionError::TypeMismatch {
                id: "summary".to_string(),
                expected: SectionType::Summary,
                found: SectionType::Skills,
            }
        );
        assert_eq!(store.get("summary").unwrap().section_type(), SectionType::Summary);
    }

    #[test]
    fn test_remove_clears_active() {
        let mut store = SectionStore::seeded();
        store.set_active(Some("education")).unwrap();

        store.remove("summary").unwrap();
        assert_eq!(store.active_id(), Some("education"));

        store.remove("education").unwrap();
        assert_eq!(store.active_id(), None);
        assert_eq!(ids(&store), vec!["header", "experience", "skills"]);

        assert!(store.remove("education").is_err());
    }

    #[test]
    fn test_set_active_unknown_is_rejected() {
        let mut store = SectionStore::seeded();
        assert!(store.set_active(Some("hobbies")).is_err());
        assert_eq!(store.active(), None);
    }

    #[test]
    fn test_reorder_requires_permutation() {
        let mut store = SectionStore::seeded();

        let mut shorter = store.sections().to_vec();
        shorter.pop();
        assert!(store.reorder(shorter).is_err());

        let mut foreign = store.sections().to_vec();
        foreign[0].id = "other".to_string();
        assert!(store.reorder(foreign).is_err());

        let mut reversed = store.sections().to_vec();
        reversed.reverse();
        store.reorder(reversed).unwrap();
        assert_eq!(
            ids(&store),
            vec!["skills", "education", "experience", "summary", "header"]
        );
    }

    #[test]
    fn test_drag_reorder_moves_down_and_up() {
        let sections = seed_sections();

        let down = drag_reorder(&sections, "header", "education").unwrap();
        let down_ids: Vec<&str> = down.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            down_ids,
            vec!["summary", "experience", "education", "header", "skills"]
        );

        let up = drag_reorder(&sections, "skills", "summary").unwrap();
        let up_ids: Vec<&str> = up.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            up_ids,
            vec!["header", "skills", "summary", "experience", "education"]
        );

        assert!(drag_reorder(&sections, "skills", "skills").is_none());
        assert!(drag_reorder(&sections, "skills", "ghost").is_none());
    }

    #[test]
    fn test_set_all_drops_stale_active() {
        let mut store = SectionStore::seeded();
        store.set_active(Some("skills")).unwrap();

        store.set_all(vec![seed_section(SectionType::Header)]).unwrap();
        assert_eq!(store.active_id(), None);

        let dupes = vec![seed_section(SectionType::Header), seed_section(SectionType::Header)];
        assert!(store.set_all(dupes).is_err());
        assert_eq!(store.len(), 1);
    }
}
