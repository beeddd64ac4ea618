use serde::{Deserialize, Serialize};

/// A wizard screen. Persisted as the kebab-case strings the storefront
/// has always written (`"phone-selector"`, `"final-summary"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    Onboarding,
    PhoneSelector,
    ComboSelector,
    MicaSelector,
    CaseSelector,
    ImageSelector,
    ContactForm,
    FinalSummary,
}

impl StepId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::PhoneSelector => "phone-selector",
            Self::ComboSelector => "combo-selector",
            Self::MicaSelector => "mica-selector",
            Self::CaseSelector => "case-selector",
            Self::ImageSelector => "image-selector",
            Self::ContactForm => "contact-form",
            Self::FinalSummary => "final-summary",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Onboarding => "Bienvenido",
            Self::PhoneSelector => "Selecciona tu equipo",
            Self::ComboSelector => "Selecciona tu combo",
            Self::MicaSelector => "Selecciona tu mica",
            Self::CaseSelector => "Selecciona tu funda",
            Self::ImageSelector => "Selecciona tu imagen",
            Self::ContactForm => "Datos de contacto",
            Self::FinalSummary => "Resumen final",
        }
    }
}

/// Bundle identifier. Every combo maps to a fixed step path; see
/// [`steps_for_combo`]. `Combo1` is the designated default: it is the
/// first table entry and the fallback whenever a persisted value does
/// not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComboId {
    #[default]
    Combo1,
    Combo2,
    Combo3,
    Combo4,
    Combo5,
}

impl ComboId {
    pub const ALL: [ComboId; 5] = [
        Self::Combo1,
        Self::Combo2,
        Self::Combo3,
        Self::Combo4,
        Self::Combo5,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Combo1 => "combo1",
            Self::Combo2 => "combo2",
            Self::Combo3 => "combo3",
            Self::Combo4 => "combo4",
            Self::Combo5 => "combo5",
        }
    }

    /// Lenient parse for persisted values: an unrecognized id degrades
    /// to the default bundle instead of failing the whole selection.
    pub fn from_persisted(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|combo| combo.as_str() == raw)
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for ComboId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_persisted(&raw))
    }
}

const COMBO1_PATH: [StepId; 8] = [
    StepId::Onboarding,
    StepId::PhoneSelector,
    StepId::ComboSelector,
    StepId::MicaSelector,
    StepId::CaseSelector,
    StepId::ImageSelector,
    StepId::ContactForm,
    StepId::FinalSummary,
];

const COMBO2_PATH: [StepId; 7] = [
    StepId::Onboarding,
    StepId::PhoneSelector,
    StepId::ComboSelector,
    StepId::MicaSelector,
    StepId::CaseSelector,
    StepId::ContactForm,
    StepId::FinalSummary,
];

const COMBO3_PATH: [StepId; 7] = [
    StepId::Onboarding,
    StepId::PhoneSelector,
    StepId::ComboSelector,
    StepId::CaseSelector,
    StepId::ImageSelector,
    StepId::ContactForm,
    StepId::FinalSummary,
];

const COMBO4_PATH: [StepId; 6] = [
    StepId::Onboarding,
    StepId::PhoneSelector,
    StepId::ComboSelector,
    StepId::MicaSelector,
    StepId::ContactForm,
    StepId::FinalSummary,
];

const COMBO5_PATH: [StepId; 6] = [
    StepId::Onboarding,
    StepId::PhoneSelector,
    StepId::ComboSelector,
    StepId::CaseSelector,
    StepId::ContactForm,
    StepId::FinalSummary,
];

/// The ordered step path for a bundle. Pure and total: every path
/// starts at `Onboarding`, ends at `FinalSummary`, and lists whatever
/// accessory steps the bundle includes in canonical order (mica,
/// case, image).
pub fn steps_for_combo(combo: ComboId) -> &'static [StepId] {
    match combo {
        ComboId::Combo1 => &COMBO1_PATH,
        ComboId::Combo2 => &COMBO2_PATH,
        ComboId::Combo3 => &COMBO3_PATH,
        ComboId::Combo4 => &COMBO4_PATH,
        ComboId::Combo5 => &COMBO5_PATH,
    }
}

/// Number of coarse user-facing progress buckets, exclusive of the
/// onboarding bucket 0.
pub const VISUAL_TOTAL: u8 = 4;

/// Derived progress. Recomputed from (path, pointer) on every read;
/// never a source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Coarse 0..=4 bucket shown in the step header. All accessory
    /// steps collapse into bucket 3.
    pub visual: u8,
    pub total: u8,
    /// Fine-grained index of the pointer within the path. `None` when
    /// the pointer has drifted outside the path.
    pub position: Option<usize>,
    pub previous: StepId,
    pub next: StepId,
}

impl Progress {
    /// Index safe for display purposes: a drifted pointer clamps to 0.
    pub fn display_position(&self) -> usize {
        self.position.unwrap_or(0)
    }
}

pub fn visual_bucket(step: StepId) -> u8 {
    match step {
        StepId::Onboarding => 0,
        StepId::PhoneSelector => 1,
        StepId::ComboSelector => 2,
        StepId::MicaSelector | StepId::CaseSelector | StepId::ImageSelector => 3,
        StepId::ContactForm | StepId::FinalSummary => 4,
    }
}

/// Computes current/previous/next and the visual bucket. Never
/// panics: a pointer that is not a member of `path` yields
/// `position = None` with `previous`/`next` degrading to the entry
/// and terminal steps.
pub fn compute_progress(path: &[StepId], current: StepId) -> Progress {
    let position = path.iter().position(|step| *step == current);

    let previous = match position {
        Some(index) if index > 0 => path[index - 1],
        _ => StepId::Onboarding,
    };

    let next = match position {
        Some(index) if index + 1 < path.len() => path[index + 1],
        _ => StepId::FinalSummary,
    };

    Progress {
        visual: visual_bucket(current),
        total: VISUAL_TOTAL,
        position,
        previous,
        next,
    }
}
