//! The static image catalog: templates, sections, prompts, target counts.
//!
//! This is pure data plus a few deterministic helpers. The catalog never
//! changes at runtime; editing it means editing this file and re-running the
//! batch. Two invariants hold for every section:
//!
//! - `count` may be zero (the section is skipped by the batch loop)
//! - `prompts` is non-empty whenever `count > 0`
//!
//! Prompts are intentionally fewer than the target count. The batch reuses
//! them round-robin ([`prompt_at`]), so a 26-image section with 5 prompts
//! produces 5 visual themes with natural variation from the model.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("section '{0}' has a target count but no prompts")]
    EmptyPrompts(String),
    #[error("duplicate section id '{0}'")]
    DuplicateSection(String),
}

/// A curriculum template: a named group of sections.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Directory-safe identifier, used in paths and filenames.
    pub id: &'static str,
    /// Human-readable display name, used in the manifest and console output.
    pub name: &'static str,
    pub sections: &'static [Section],
}

/// The unit of grouping: target counts are defined per section.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub id: &'static str,
    pub name: &'static str,
    /// How many images this section must end up with.
    pub count: u32,
    /// Cycled when `count` exceeds the list length.
    pub prompts: &'static [&'static str],
}

impl Template {
    /// Sum of section target counts for this template.
    pub fn image_count(&self) -> u32 {
        self.sections.iter().map(|s| s.count).sum()
    }
}

/// Select the prompt for a 0-based image index, cycling through the list.
pub fn prompt_at(section: &Section, index: u32) -> &'static str {
    section.prompts[index as usize % section.prompts.len()]
}

/// Deterministic output filename for an image.
///
/// `index` is 1-based and zero-padded to two digits, matching the largest
/// section (33 images). Re-running the batch reproduces identical names.
///
/// ```text
/// image_filename("template_1_pollution", "soil_contamination", 3)
///     → "template_1_pollution_soil_contamination_03.png"
/// ```
pub fn image_filename(template_id: &str, section_id: &str, index: u32) -> String {
    format!("{}_{}_{:02}.png", template_id, section_id, index)
}

/// Total number of images the catalog calls for.
pub fn total_images(catalog: &[Template]) -> u32 {
    catalog.iter().map(|t| t.image_count()).sum()
}

/// Check the catalog invariants. Run once at startup; a violation is a
/// programming error in the data above, not a runtime condition.
pub fn validate(catalog: &[Template]) -> Result<(), CatalogError> {
    let mut seen = std::collections::HashSet::new();
    for template in catalog {
        for section in template.sections {
            if section.count > 0 && section.prompts.is_empty() {
                return Err(CatalogError::EmptyPrompts(section.id.to_string()));
            }
            if !seen.insert((template.id, section.id)) {
                return Err(CatalogError::DuplicateSection(section.id.to_string()));
            }
        }
    }
    Ok(())
}

/// The full production catalog: 260 images across 2 templates and 9 sections.
pub fn catalog() -> &'static [Template] {
    CATALOG
}

const CATALOG: &[Template] = &[
    Template {
        id: "template_1_pollution",
        name: "Environmental Pollution",
        sections: &[
            Section {
                id: "soil_contamination",
                name: "Soil Contamination",
                count: 26,
                prompts: &[
                    "Close-up of soil mixed with broken plastic bottles and trash",
                    "Open-air landfill with garbage and birds flying overhead",
                    "Soil stained with motor oil spill environmental damage",
                    "Agricultural field being sprayed intensively with pesticides from an airplane",
                    "Corroded batteries and electronic waste scattered on ground",
                ],
            },
            Section {
                id: "water_pollution",
                name: "Water Pollution",
                count: 26,
                prompts: &[
                    "Sea turtle swimming near a plastic bag in ocean",
                    "Industrial pipe expelling black murky water into a river",
                    "Floating island of plastic bottles garbage in the ocean",
                    "Dead fish washed up on a polluted beach with tar",
                    "Glass of murky brown water flowing from tap environmental issue",
                ],
            },
            Section {
                id: "air_pollution",
                name: "Air Pollution",
                count: 26,
                prompts: &[
                    "Industrial factory chimneys expelling thick gray and orange smoke",
                    "Heavy traffic jam with cars emitting exhaust fumes pollution",
                    "City skyline covered in thick smog haze atmospheric pollution",
                    "Person wearing respiratory mask on a heavily polluted street",
                    "Forest fire creating massive columns of smoke in sky",
                ],
            },
            Section {
                id: "deforestation",
                name: "Deforestation",
                count: 26,
                prompts: &[
                    "Landscape full of tree stumps where forest used to be",
                    "Heavy machinery bulldozers cutting down trees forest destruction",
                    "Logging truck loaded with giant logs environmental damage",
                    "Aerial view of burned Amazon rainforest for cattle grazing",
                    "Single lonely tree surrounded by cleared deforested land",
                ],
            },
            Section {
                id: "desertification",
                name: "Desertification",
                count: 26,
                prompts: &[
                    "Close-up of extremely dry cracked earth desertification",
                    "Sand dunes advancing over abandoned village and roads",
                    "Dry dead tree skeletons in arid barren landscape",
                    "Starving emaciated livestock grazing on bare soil overgrazing",
                    "Dried up completely empty riverbed showing environmental damage",
                ],
            },
        ],
    },
    Template {
        id: "template_2_hygiene",
        name: "Hygiene Types",
        sections: &[
            Section {
                id: "personal_hygiene",
                name: "Personal Hygiene",
                count: 32,
                prompts: &[
                    "Hands being soaped and washed under running water",
                    "Person brushing teeth with toothpaste hygiene routine",
                    "Person showering with shampoo in hair clean water",
                    "Hands with clean cut nails manicure",
                    "Person applying deodorant personal care",
                    "Clean and folded clothes fresh laundry",
                ],
            },
            Section {
                id: "home_hygiene",
                name: "Home Hygiene",
                count: 32,
                prompts: &[
                    "Mop cleaning shiny ceramic floor clean home",
                    "Person dusting furniture with cloth removing dust",
                    "Clean and disinfected bathroom toilet and sink",
                    "Taking out garbage bag to exterior bin",
                    "Window open ventilating fresh air home",
                    "Person sweeping clean floor with broom",
                ],
            },
            Section {
                id: "food_hygiene",
                name: "Food Hygiene",
                count: 33,
                prompts: &[
                    "Washing fresh fruits and vegetables under running water",
                    "Lettuce and apples being cleaned properly",
                    "Raw meat and vegetables on separate cutting boards food safety",
                    "Clean organized refrigerator with food stored properly",
                    "Raw vegetables and herbs fresh food",
                    "Cooking meat at high temperature in pan",
                    "Clean utensils and cooking equipment dry storage",
                ],
            },
            Section {
                id: "community_hygiene",
                name: "Community and Environmental Hygiene",
                count: 33,
                prompts: &[
                    "Colored recycling bins for paper plastic glass waste sorting",
                    "Street cleaning with municipal sweeper machine clean streets",
                    "Clean public park with green grass no litter paper baskets",
                    "Water treatment plant wastewater processing facility",
                    "Clean public restroom facilities hygiene",
                    "Person collecting pet waste with bag responsible pet owner",
                    "Community group cleaning beach removing litter together",
                ],
            },
        ],
    },
];
