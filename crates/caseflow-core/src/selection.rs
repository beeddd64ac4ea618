use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::steps::ComboId;

/// Placement of an image on the case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotate: f32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotate: 0.0,
        }
    }
}

/// The image printed on the case. A tagged union: a chosen source
/// always carries its asset id or url, so "source set but id missing"
/// is not representable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum ImageSource {
    #[default]
    None,
    #[serde(rename_all = "camelCase")]
    Brand {
        asset_id: String,
        license_tag: String,
        config: ImageConfig,
    },
    #[serde(rename_all = "camelCase")]
    Custom { url: String, config: ImageConfig },
}

impl ImageSource {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// The canonical record of every choice in one in-progress order.
/// Serialized camelCase to match the persisted storefront layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub combo_id: ComboId,
    pub mica_id: Option<String>,
    pub case_id: Option<String>,
    pub case_type: String,
    pub case_color: String,
    pub image: ImageSource,
    pub contact: Contact,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            brand: None,
            model: None,
            combo_id: ComboId::default(),
            mica_id: None,
            case_id: None,
            case_type: catalog::DEFAULT_CASE_TYPE.to_string(),
            case_color: catalog::DEFAULT_CASE_COLOR.to_string(),
            image: ImageSource::None,
            contact: Contact::default(),
        }
    }
}

impl Selection {
    /// Combo base price plus the selected mica surcharge.
    pub fn total_price(&self) -> u32 {
        let base = catalog::combo(self.combo_id).price;
        let mica = self
            .mica_id
            .as_deref()
            .map(catalog::mica_surcharge)
            .unwrap_or(0);
        base + mica
    }

    /// Shallow merge: only fields present in the patch replace the
    /// current value; nested values such as an [`ImageConfig`] are
    /// replaced wholesale. No validation happens here; invariants
    /// like "model requires brand" are the caller's responsibility.
    pub fn apply(&mut self, patch: &SelectionPatch) {
        if let Some(value) = &patch.brand {
            self.brand = value.clone();
        }
        if let Some(value) = &patch.model {
            self.model = value.clone();
        }
        if let Some(value) = patch.combo_id {
            self.combo_id = value;
        }
        if let Some(value) = &patch.mica_id {
            self.mica_id = value.clone();
        }
        if let Some(value) = &patch.case_id {
            self.case_id = value.clone();
        }
        if let Some(value) = &patch.case_type {
            self.case_type = value.clone();
        }
        if let Some(value) = &patch.case_color {
            self.case_color = value.clone();
        }
        if let Some(value) = &patch.image {
            self.image = value.clone();
        }
        if let Some(value) = &patch.contact {
            self.contact = value.clone();
        }
    }
}

/// A partial update. `Some(None)` on an optional field clears it;
/// an absent field leaves the selection untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionPatch {
    pub brand: Option<Option<String>>,
    pub model: Option<Option<String>>,
    pub combo_id: Option<ComboId>,
    pub mica_id: Option<Option<String>>,
    pub case_id: Option<Option<String>>,
    pub case_type: Option<String>,
    pub case_color: Option<String>,
    pub image: Option<ImageSource>,
    pub contact: Option<Contact>,
}

impl SelectionPatch {
    pub fn combo(combo_id: ComboId) -> Self {
        Self {
            combo_id: Some(combo_id),
            ..Self::default()
        }
    }

    /// Brand change resets the model in the same patch; the cascade
    /// is the caller's choice, never the store's.
    pub fn phone(brand: Option<&str>, model: Option<&str>) -> Self {
        Self {
            brand: Some(brand.map(str::to_string)),
            model: Some(model.map(str::to_string)),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
