use serde::{Deserialize, Serialize};

/// The fixed disability-category vocabulary shared by job postings,
/// job-seeker registration, and the search filter. Postings and filter
/// selections must come from this one list or tag matching would
/// silently never intersect; the enum makes that unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisabilityCategory {
    #[serde(rename = "Visual Impairment")]
    VisualImpairment,
    #[serde(rename = "Hearing Impairment")]
    HearingImpairment,
    #[serde(rename = "Physical Disability")]
    PhysicalDisability,
    #[serde(rename = "Cognitive Disability")]
    CognitiveDisability,
    #[serde(rename = "Speech Impairment")]
    SpeechImpairment,
    #[serde(rename = "Multiple Disabilities")]
    MultipleDisabilities,
}

impl DisabilityCategory {
    pub const ALL: [DisabilityCategory; 6] = [
        DisabilityCategory::VisualImpairment,
        DisabilityCategory::HearingImpairment,
        DisabilityCategory::PhysicalDisability,
        DisabilityCategory::CognitiveDisability,
        DisabilityCategory::SpeechImpairment,
        DisabilityCategory::MultipleDisabilities,
    ];

    /// The display string, identical to the stored form.
    pub fn label(&self) -> &'static str {
        match self {
            DisabilityCategory::VisualImpairment => "Visual Impairment",
            DisabilityCategory::HearingImpairment => "Hearing Impairment",
            DisabilityCategory::PhysicalDisability => "Physical Disability",
            DisabilityCategory::CognitiveDisability => "Cognitive Disability",
            DisabilityCategory::SpeechImpairment => "Speech Impairment",
            DisabilityCategory::MultipleDisabilities => "Multiple Disabilities",
        }
    }
}

impl std::fmt::Display for DisabilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
