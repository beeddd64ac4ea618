//! Fixed product data for the storefront. Static and I/O-free: the
//! wizard screens read it, nothing mutates it.

use crate::steps::ComboId;

pub const DEFAULT_CASE_TYPE: &str = "Flexi";
pub const DEFAULT_CASE_COLOR: &str = "Naranja";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combo {
    pub id: ComboId,
    pub name: &'static str,
    pub price: u32,
    pub description: &'static str,
    pub includes_mica: bool,
    pub includes_case: bool,
    pub includes_image: bool,
}

pub const COMBOS: [Combo; 5] = [
    Combo {
        id: ComboId::Combo1,
        name: "Combo Completo",
        price: 899,
        description: "Mica, funda y diseño personalizado en un solo paquete.",
        includes_mica: true,
        includes_case: true,
        includes_image: true,
    },
    Combo {
        id: ComboId::Combo2,
        name: "Combo Protección",
        price: 699,
        description: "Mica y funda para proteger tu equipo desde el primer día.",
        includes_mica: true,
        includes_case: true,
        includes_image: false,
    },
    Combo {
        id: ComboId::Combo3,
        name: "Combo Diseño",
        price: 599,
        description: "Funda con la imagen que tú elijas.",
        includes_mica: false,
        includes_case: true,
        includes_image: true,
    },
    Combo {
        id: ComboId::Combo4,
        name: "Combo Mica",
        price: 299,
        description: "Solo la mica, instalada al momento.",
        includes_mica: true,
        includes_case: false,
        includes_image: false,
    },
    Combo {
        id: ComboId::Combo5,
        name: "Combo Funda",
        price: 399,
        description: "Solo la funda, en el estilo que prefieras.",
        includes_mica: false,
        includes_case: true,
        includes_image: false,
    },
];

pub fn combo(id: ComboId) -> &'static Combo {
    match id {
        ComboId::Combo1 => &COMBOS[0],
        ComboId::Combo2 => &COMBOS[1],
        ComboId::Combo3 => &COMBOS[2],
        ComboId::Combo4 => &COMBOS[3],
        ComboId::Combo5 => &COMBOS[4],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mica {
    pub id: &'static str,
    pub name: &'static str,
    pub surcharge: u32,
}

pub const MICAS: [Mica; 3] = [
    Mica {
        id: "m1",
        name: "Mica clásica",
        surcharge: 0,
    },
    Mica {
        id: "m2",
        name: "Mica antirreflejante",
        surcharge: 150,
    },
    Mica {
        id: "m3",
        name: "Mica privacidad",
        surcharge: 200,
    },
];

/// Surcharge for a mica id; unknown ids carry none.
pub fn mica_surcharge(id: &str) -> u32 {
    MICAS
        .iter()
        .find(|mica| mica.id == id)
        .map(|mica| mica.surcharge)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

pub const CASE_TYPES: [&str; 2] = ["Flexi", "Rígida"];

pub const CASE_STYLES: [CaseStyle; 5] = [
    CaseStyle {
        id: "1",
        name: "Funda Artística Abstracta",
        colors: &["Morado", "Azul", "Rojo"],
    },
    CaseStyle {
        id: "2",
        name: "Funda Negra Elegante",
        colors: &["Negro", "Grafito"],
    },
    CaseStyle {
        id: "3",
        name: "Funda Transparente Pro",
        colors: &["Transparente", "Blanco"],
    },
    CaseStyle {
        id: "4",
        name: "Funda Gaming RGB",
        colors: &["Rojo", "Turquesa", "Morado"],
    },
    CaseStyle {
        id: "7",
        name: "Funda Roja Pasión",
        colors: &["Naranja", "Rojo", "Coral"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneBrand {
    pub name: &'static str,
    pub models: &'static [&'static str],
}

pub const PHONE_BRANDS: [PhoneBrand; 4] = [
    PhoneBrand {
        name: "Samsung",
        models: &["Galaxy S24 Ultra", "Galaxy A54", "Galaxy S23"],
    },
    PhoneBrand {
        name: "Apple - iPhone",
        models: &["17 Pro", "16 Plus", "iPhone 15 Pro Max"],
    },
    PhoneBrand {
        name: "Motorola",
        models: &["Moto G84", "Edge 40 Neo"],
    },
    PhoneBrand {
        name: "Xiaomi",
        models: &["Redmi Note 13 Pro", "Xiaomi 14"],
    },
];

pub fn models_for_brand(brand: &str) -> &'static [&'static str] {
    PHONE_BRANDS
        .iter()
        .find(|entry| entry.name == brand)
        .map(|entry| entry.models)
        .unwrap_or(&[])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicensedAsset {
    pub id: &'static str,
    pub license_tag: &'static str,
    pub name: &'static str,
}

pub const LICENSED_ASSETS: [LicensedAsset; 6] = [
    LicensedAsset {
        id: "d1",
        license_tag: "Disney",
        name: "Castillo clásico",
    },
    LicensedAsset {
        id: "d2",
        license_tag: "Disney",
        name: "Amigos del bosque",
    },
    LicensedAsset {
        id: "d3",
        license_tag: "Disney",
        name: "Noche estrellada",
    },
    LicensedAsset {
        id: "f1",
        license_tag: "FIFA",
        name: "Balón mundialista",
    },
    LicensedAsset {
        id: "f2",
        license_tag: "FIFA",
        name: "Trofeo dorado",
    },
    LicensedAsset {
        id: "e1",
        license_tag: "EA Sports",
        name: "Jugada maestra",
    },
];
