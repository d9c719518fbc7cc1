//! Persistence records.
//!
//! Flat serde-friendly mirrors of the catalog for host applications that
//! store it. Co-requisite references are structured [`SectionRef`]s rather
//! than delimiter-joined strings, and are resolved to handles once, at
//! load time.
//!
//! # Symmetry
//! Loading links each resolved reference in both directions, so a record
//! that stores only one side of a pair still produces a symmetric graph.
//! Saving always writes both sides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Catalog, Course, Section, SectionId, SectionKey, SectionKind, TimeSlot};
use crate::corequisite;

/// A persisted reference to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum SectionRef {
    /// Course and section code only.
    Legacy {
        course_id: String,
        section_code: String,
    },
    /// Course, code, instructor and slots: pins one section even when codes
    /// repeat.
    Full {
        course_id: String,
        section_code: String,
        instructor: String,
        slots: Vec<TimeSlot>,
    },
}

impl SectionRef {
    /// Parses the legacy `"COURSE-CODE"` form, splitting on the first `-`.
    pub fn parse_legacy(raw: &str) -> Option<Self> {
        let (course_id, section_code) = raw.trim().split_once('-')?;
        if course_id.is_empty() || section_code.is_empty() {
            return None;
        }
        Some(Self::Legacy {
            course_id: course_id.to_string(),
            section_code: section_code.to_string(),
        })
    }

    /// Full reference to an existing section.
    pub fn full(section: &Section) -> Self {
        Self::Full {
            course_id: section.course_id.clone(),
            section_code: section.section_code.clone(),
            instructor: section.instructor.clone(),
            slots: section.time_slots.clone(),
        }
    }

    /// Natural key named by this reference.
    pub fn key(&self) -> SectionKey {
        match self {
            Self::Legacy {
                course_id,
                section_code,
            }
            | Self::Full {
                course_id,
                section_code,
                ..
            } => SectionKey::new(course_id, section_code),
        }
    }

    /// Resolves to a live section for `owner`.
    ///
    /// A full reference first looks for an exact field match; otherwise
    /// both forms fall back to the key-based tie-break.
    pub fn resolve(&self, catalog: &Catalog, owner: SectionId) -> Option<SectionId> {
        if let Self::Full {
            instructor, slots, ..
        } = self
        {
            let exact = catalog.find_by_key(&self.key()).into_iter().find(|&id| {
                id != owner
                    && catalog
                        .section(id)
                        .is_some_and(|s| &s.instructor == instructor && &s.time_slots == slots)
            });
            if exact.is_some() {
                return exact;
            }
        }
        corequisite::resolve_target(catalog, owner, &self.key())
    }
}

/// Persisted section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub section_code: String,
    pub instructor: String,
    #[serde(default)]
    pub kind: SectionKind,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub corequisites: Vec<SectionRef>,
}

/// Persisted course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub prerequisites: BTreeSet<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionRecord>,
}

/// Persisted catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub courses: Vec<CourseRecord>,
}

impl Catalog {
    /// Rebuilds a catalog from its record, resolving every reference.
    ///
    /// Duplicate courses are skipped. Sections sharing a key are kept as
    /// distinct sections, since edits can legitimately produce them, and
    /// full references tell them apart. Sections with invalid slots and
    /// unresolvable references are dropped.
    pub fn from_record(record: &CatalogRecord) -> Self {
        let mut catalog = Catalog::new();
        let mut pending: Vec<(SectionId, &[SectionRef])> = Vec::new();

        for cr in &record.courses {
            let mut course = Course::new(&cr.id, &cr.name);
            course.prerequisites = cr.prerequisites.clone();
            if let Some(color) = &cr.color {
                course.default_color = color.clone();
            }
            if !catalog.add_course(course) {
                log::debug!("duplicate course {} in record; skipped", cr.id);
                continue;
            }

            for sr in &cr.sections {
                let section = Section::new(&cr.id, &sr.section_code, &sr.instructor)
                    .with_kind(sr.kind)
                    .with_slots(sr.time_slots.clone());
                if let Some(id) = catalog.insert_section(section) {
                    pending.push((id, sr.corequisites.as_slice()));
                }
            }
        }

        for (owner, refs) in pending {
            for r in refs {
                match r.resolve(&catalog, owner) {
                    Some(partner) => {
                        corequisite::link_ids(&mut catalog, owner, partner);
                    }
                    None => log::debug!("unresolved co-requisite {} on {owner}", r.key()),
                }
            }
        }
        catalog
    }

    /// Snapshot of the catalog as a record with two-sided full references.
    pub fn to_record(&self) -> CatalogRecord {
        let courses = self
            .courses()
            .map(|c| CourseRecord {
                id: c.id.clone(),
                name: c.name.clone(),
                prerequisites: c.prerequisites.clone(),
                color: Some(c.default_color.clone()),
                sections: self
                    .sections_of(&c.id)
                    .map(|s| SectionRecord {
                        section_code: s.section_code.clone(),
                        instructor: s.instructor.clone(),
                        kind: s.kind,
                        time_slots: s.time_slots.clone(),
                        corequisites: s
                            .corequisites()
                            .iter()
                            .filter_map(|&id| self.section(id))
                            .map(SectionRef::full)
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        CatalogRecord { courses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corequisite;
    use crate::models::{SectionEdit, MONDAY, TUESDAY};

    fn one_sided_record() -> CatalogRecord {
        CatalogRecord {
            courses: vec![CourseRecord {
                id: "PH1110".into(),
                name: "Physics 1".into(),
                prerequisites: BTreeSet::new(),
                color: None,
                sections: vec![
                    SectionRecord {
                        section_code: "LT1".into(),
                        instructor: "Hoang".into(),
                        kind: SectionKind::Lecture,
                        time_slots: vec![TimeSlot::new(MONDAY, 1, 3)],
                        corequisites: vec![SectionRef::parse_legacy("PH1110-BT1").unwrap()],
                    },
                    SectionRecord {
                        section_code: "BT1".into(),
                        instructor: "Vu".into(),
                        kind: SectionKind::Lab,
                        time_slots: vec![TimeSlot::new(TUESDAY, 1, 2)],
                        corequisites: Vec::new(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_parse_legacy() {
        assert_eq!(
            SectionRef::parse_legacy("IT1110-L01"),
            Some(SectionRef::Legacy {
                course_id: "IT1110".into(),
                section_code: "L01".into()
            })
        );
        // Only the first delimiter splits.
        assert_eq!(
            SectionRef::parse_legacy("IT1110-L-01").map(|r| r.key()),
            Some(SectionKey::new("IT1110", "L-01"))
        );
        assert_eq!(SectionRef::parse_legacy("nodash"), None);
        assert_eq!(SectionRef::parse_legacy("-L01"), None);
    }

    #[test]
    fn test_load_reconstructs_symmetry() {
        let catalog = Catalog::from_record(&one_sided_record());
        let lt = catalog.find_by_key(&SectionKey::new("PH1110", "LT1"))[0];
        let bt = catalog.find_by_key(&SectionKey::new("PH1110", "BT1"))[0];
        assert!(catalog.section(lt).unwrap().lists(bt));
        assert!(catalog.section(bt).unwrap().lists(lt));
    }

    #[test]
    fn test_save_writes_both_sides() {
        let record = Catalog::from_record(&one_sided_record()).to_record();
        let sections = &record.courses[0].sections;
        assert_eq!(sections[0].corequisites.len(), 1);
        assert_eq!(sections[1].corequisites.len(), 1);
        assert!(matches!(sections[1].corequisites[0], SectionRef::Full { .. }));
        assert_eq!(sections[1].corequisites[0].key(), SectionKey::new("PH1110", "LT1"));
    }

    #[test]
    fn test_json_round_trip_preserves_fields() {
        let saved = Catalog::from_record(&one_sided_record())
            .to_record();
        let json = serde_json::to_string(&saved).unwrap();
        let restored: CatalogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, saved);

        let catalog = Catalog::from_record(&restored);
        assert_eq!(catalog.section_count(), 2);
        assert_eq!(catalog.to_record(), saved);
    }

    #[test]
    fn test_reload_keeps_sections_sharing_a_key() {
        let mut catalog = Catalog::from_record(&CatalogRecord {
            courses: vec![CourseRecord {
                sections: Vec::new(),
                ..one_sided_record().courses[0].clone()
            }],
        });
        let lt = catalog
            .add_section(Section::new("PH1110", "LT1", "Hoang").with_slot(MONDAY, 1, 3))
            .unwrap();
        let bt1 = catalog
            .add_section(Section::new("PH1110", "BT1", "Vu").with_slot(MONDAY, 1, 2))
            .unwrap();
        let bt2 = catalog
            .add_section(Section::new("PH1110", "BT2", "Do").with_slot(TUESDAY, 5, 6))
            .unwrap();
        catalog.update_section(bt2, SectionEdit::new("BT1", "Do").with_slot(TUESDAY, 5, 6));
        assert!(corequisite::link_ids(&mut catalog, lt, bt2));
        assert_eq!(catalog.find_by_key(&SectionKey::new("PH1110", "BT1")), vec![bt1, bt2]);

        let saved = catalog.to_record();
        let reloaded = Catalog::from_record(&saved);
        assert_eq!(reloaded.section_count(), 3);
        assert_eq!(reloaded.to_record(), saved);

        let ids = reloaded.find_by_key(&SectionKey::new("PH1110", "BT1"));
        assert_eq!(ids.len(), 2);
        let lt = reloaded.find_by_key(&SectionKey::new("PH1110", "LT1"))[0];
        let partners: Vec<&str> = reloaded
            .section(lt)
            .unwrap()
            .corequisites()
            .iter()
            .map(|&id| reloaded.section(id).unwrap().instructor.as_str())
            .collect();
        assert_eq!(partners, vec!["Do"]);
        assert!(reloaded.section(ids[0]).unwrap().corequisites().is_empty());
        assert!(reloaded.section(ids[1]).unwrap().lists(lt));
    }

    #[test]
    fn test_invalid_slot_section_dropped_on_load() {
        let mut record = one_sided_record();
        record.courses[0].sections[1].time_slots = vec![TimeSlot::new(TUESDAY, 4, 2)];
        let catalog = Catalog::from_record(&record);
        assert_eq!(catalog.section_count(), 1);
        let lt = catalog.find_by_key(&SectionKey::new("PH1110", "LT1"))[0];
        assert!(catalog.section(lt).unwrap().corequisites().is_empty());
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{"courses":[{"id":"MI1111","name":"Calculus 1",
            "sections":[{"section_code":"L05","instructor":"Le Van C"}]}]}"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        let catalog = Catalog::from_record(&record);
        let s = catalog.sections_of("MI1111").next().unwrap();
        assert_eq!(s.kind, SectionKind::Generic);
        assert!(s.time_slots.is_empty());
    }

    #[test]
    fn test_unresolved_reference_dropped() {
        let mut record = one_sided_record();
        record.courses[0].sections[1]
            .corequisites
            .push(SectionRef::parse_legacy("XX9999-Z1").unwrap());
        let catalog = Catalog::from_record(&record);
        let bt = catalog.find_by_key(&SectionKey::new("PH1110", "BT1"))[0];
        assert_eq!(catalog.section(bt).unwrap().corequisites().len(), 1);
    }

    #[test]
    fn test_tagged_ref_format() {
        let r = SectionRef::parse_legacy("IT1110-L01").unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["format"], "legacy");
        assert_eq!(json["course_id"], "IT1110");
    }
}
