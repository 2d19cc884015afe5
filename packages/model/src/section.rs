//! Resume sections: a flat, ordered list of typed records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque section identifier
pub type SectionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
}

impl SectionType {
    pub const ALL: [SectionType; 5] = [
        SectionType::Header,
        SectionType::Summary,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderData {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceItem {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub year: String,
}

/// Type-specific payload of a section. The variant is the section's type.
///
/// Serialized adjacently tagged, so a section reads
/// `{ "id", "title", "type": "skills", "data": { "items": [...] } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum SectionData {
    Header(HeaderData),
    Summary {
        #[serde(default)]
        content: String,
    },
    Experience {
        #[serde(default)]
        items: Vec<ExperienceItem>,
    },
    Education {
        #[serde(default)]
        items: Vec<EducationItem>,
    },
    Skills {
        #[serde(default)]
        items: Vec<String>,
    },
}

impl SectionData {
    pub fn section_type(&self) -> SectionType {
        match self {
            SectionData::Header(_) => SectionType::Header,
            SectionData::Summary { .. } => SectionType::Summary,
            SectionData::Experience { .. } => SectionType::Experience,
            SectionData::Education { .. } => SectionType::Education,
            SectionData::Skills { .. } => SectionType::Skills,
        }
    }
}

/// One block of the resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    #[serde(flatten)]
    pub data: SectionData,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>, data: SectionData) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            data,
        }
    }

    pub fn section_type(&self) -> SectionType {
        self.data.section_type()
    }
}
