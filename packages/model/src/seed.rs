//! Default resume content used to (re)initialize the section store.

use crate::section::{
    EducationItem, ExperienceItem, HeaderData, Section, SectionData, SectionType,
};

pub fn seed_sections() -> Vec<Section> {
    SectionType::ALL.iter().map(|ty| seed_section(*ty)).collect()
}

/// Seed record for one section type. Its id equals the type name.
pub fn seed_section(section_type: SectionType) -> Section {
    let data = match section_type {
        SectionType::Header => SectionData::Header(HeaderData {
            name: "John Doe".to_string(),
            title: "Software Engineer".to_string(),
            email: "john@example.com".to_string(),
            phone: "(123) 456-7890".to_string(),
            address: "San Francisco, CA".to_string(),
        }),
        SectionType::Summary => SectionData::Summary {
            content: "Experienced software engineer with 5+ years of experience in building web applications."
                .to_string(),
        },
        SectionType::Experience => SectionData::Experience {
            items: vec![ExperienceItem {
                id: "exp1".to_string(),
                job_title: "Senior Developer".to_string(),
                company: "Tech Corp".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "Present".to_string(),
                description: "Lead a team of developers to build scalable web applications."
                    .to_string(),
            }],
        },
        SectionType::Education => SectionData::Education {
            items: vec![EducationItem {
                id: "edu1".to_string(),
                degree: "B.S. Computer Science".to_string(),
                institution: "University of California".to_string(),
                location: "Berkeley, CA".to_string(),
                year: "2018".to_string(),
            }],
        },
        SectionType::Skills => SectionData::Skills {
            items: ["JavaScript", "React", "Node.js", "HTML/CSS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
    };

    Section::new(section_type.as_str(), title_for(section_type), data)
}

fn title_for(section_type: SectionType) -> &'static str {
    match section_type {
        SectionType::Header => "Header",
        SectionType::Summary => "Summary",
        SectionType::Experience => "Experience",
        SectionType::Education => "Education",
        SectionType::Skills => "Skills",
    }
}
