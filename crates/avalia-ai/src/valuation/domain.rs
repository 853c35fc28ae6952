use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    Warehouse,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 3] {
        [Self::House, Self::Apartment, Self::Warehouse]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Warehouse => "warehouse",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::House => "Casa",
            Self::Apartment => "Apartamento",
            Self::Warehouse => "Galpão",
        }
    }

    /// Label of the subtype selector once this type is chosen.
    pub const fn subtype_prompt(self) -> &'static str {
        match self {
            Self::House => "Tipo de Casa",
            Self::Apartment => "Tipo de Apartamento",
            Self::Warehouse => "Tipo de Galpão",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "house" | "casa" => Some(Self::House),
            "apartment" | "apartamento" => Some(Self::Apartment),
            "warehouse" | "galpao" | "galpão" => Some(Self::Warehouse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertySubtype {
    Sobrado,
    Assobradado,
    CasaTerrea,
    CasaGeminada,
    Palafita,
    Flat,
    Loft,
    Kitnet,
    Studio,
    Cobertura,
    ApartamentoTradicional,
    GalpaoIndustrial,
    GalpaoComercial,
    GalpaoLogistico,
    GalpaoUrbano,
}

impl PropertySubtype {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Sobrado => "sobrado",
            Self::Assobradado => "assobradado",
            Self::CasaTerrea => "casa-terrea",
            Self::CasaGeminada => "casa-geminada",
            Self::Palafita => "palafita",
            Self::Flat => "flat",
            Self::Loft => "loft",
            Self::Kitnet => "kitnet",
            Self::Studio => "studio",
            Self::Cobertura => "cobertura",
            Self::ApartamentoTradicional => "apartamento-tradicional",
            Self::GalpaoIndustrial => "galpao-industrial",
            Self::GalpaoComercial => "galpao-comercial",
            Self::GalpaoLogistico => "galpao-logistico",
            Self::GalpaoUrbano => "galpao-urbano",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sobrado => "Sobrado",
            Self::Assobradado => "Assobradado",
            Self::CasaTerrea => "Casa Térrea",
            Self::CasaGeminada => "Casa Geminada",
            Self::Palafita => "Palafita",
            Self::Flat => "Flat",
            Self::Loft => "Loft",
            Self::Kitnet => "Kitnet",
            Self::Studio => "Studio",
            Self::Cobertura => "Cobertura",
            Self::ApartamentoTradicional => "Apartamento Tradicional",
            Self::GalpaoIndustrial => "Galpão Industrial",
            Self::GalpaoComercial => "Galpão Comercial/Armazenamento Convencional",
            Self::GalpaoLogistico => "Galpão Logístico",
            Self::GalpaoUrbano => "Galpão Urbano",
        }
    }

    pub const fn parent(self) -> PropertyType {
        match self {
            Self::Sobrado
            | Self::Assobradado
            | Self::CasaTerrea
            | Self::CasaGeminada
            | Self::Palafita => PropertyType::House,
            Self::Flat
            | Self::Loft
            | Self::Kitnet
            | Self::Studio
            | Self::Cobertura
            | Self::ApartamentoTradicional => PropertyType::Apartment,
            Self::GalpaoIndustrial
            | Self::GalpaoComercial
            | Self::GalpaoLogistico
            | Self::GalpaoUrbano => PropertyType::Warehouse,
        }
    }

    /// Accepts canonical slugs and the short values of the single-page form.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase();
        let alias = match needle.as_str() {
            "asobradado" => Some(Self::Assobradado),
            "terrea" | "térrea" => Some(Self::CasaTerrea),
            "geminada" => Some(Self::CasaGeminada),
            "industrial" => Some(Self::GalpaoIndustrial),
            "comercial" => Some(Self::GalpaoComercial),
            "logistico" | "logístico" => Some(Self::GalpaoLogistico),
            "urbano" => Some(Self::GalpaoUrbano),
            _ => None,
        };
        alias.or_else(|| {
            super::catalog::ALL_SUBTYPES
                .iter()
                .copied()
                .find(|subtype| subtype.slug() == needle)
        })
    }
}

/// Ordinal 1–5 score shared by the paint, pool, and furniture selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating must be between 1 and 5, got {value}"))
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single canonical record behind both the stepped and the single-page form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyData {
    pub property_type: Option<PropertyType>,
    pub property_subtype: Option<PropertySubtype>,

    pub cep: String,
    pub number: String,
    pub address: String,
    pub price_per_sqm: String,

    pub bedrooms: u32,
    pub suites: u32,
    pub bathrooms: u32,
    pub bathrooms_with_shower: u32,
    pub living_rooms: u32,
    pub kitchens: u32,
    pub parking_spaces: u32,

    pub has_pool: bool,
    pub pool_size_sqm: u32,
    pub pool_heated: bool,
    pub pool_lighting: bool,
    pub pool_condition: Option<Rating>,
    pub pool_purchase_weight: Option<Rating>,

    pub decor_modern: bool,
    pub decor_classic: bool,
    pub decor_minimalist: bool,
    pub decor_industrial: bool,
    pub decor_rustic: bool,

    pub exterior_paint: Option<Rating>,
    pub interior_paint: Option<Rating>,

    pub furnished: bool,
    pub furniture_condition: Option<Rating>,
}

impl PropertyData {
    /// Location sent alongside the record to the estimation endpoint.
    ///
    /// The free-form address wins; otherwise the CEP and street number are
    /// combined. `None` when neither is filled in.
    pub fn location(&self) -> Option<String> {
        let address = self.address.trim();
        if !address.is_empty() {
            return Some(address.to_string());
        }

        let cep = self.cep.trim();
        if cep.is_empty() {
            return None;
        }
        match self.number.trim() {
            "" => Some(cep.to_string()),
            number => Some(format!("{cep}, {number}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtype_slugs_round_trip_through_parse() {
        for subtype in super::super::catalog::ALL_SUBTYPES {
            assert_eq!(PropertySubtype::parse(subtype.slug()), Some(subtype));
        }
        assert_eq!(PropertySubtype::parse("mansao"), None);
    }

    #[test]
    fn subtype_accepts_single_page_values() {
        let cases = [
            ("asobradado", PropertySubtype::Assobradado),
            ("terrea", PropertySubtype::CasaTerrea),
            ("geminada", PropertySubtype::CasaGeminada),
            ("industrial", PropertySubtype::GalpaoIndustrial),
            ("logistico", PropertySubtype::GalpaoLogistico),
            ("comercial", PropertySubtype::GalpaoComercial),
            ("urbano", PropertySubtype::GalpaoUrbano),
        ];
        for (raw, expected) in cases {
            assert_eq!(PropertySubtype::parse(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn property_type_accepts_portuguese_aliases() {
        assert_eq!(PropertyType::parse("Casa"), Some(PropertyType::House));
        assert_eq!(PropertyType::parse("galpao"), Some(PropertyType::Warehouse));
        assert_eq!(PropertyType::parse(""), None);
    }

    #[test]
    fn rating_rejects_out_of_scale_values() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert_eq!(Rating::new(3).map(Rating::value), Some(3));
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn location_prefers_address_then_cep() {
        let mut data = PropertyData {
            cep: "01310-100".to_string(),
            number: "123".to_string(),
            ..PropertyData::default()
        };
        assert_eq!(data.location().as_deref(), Some("01310-100, 123"));

        data.address = "  Rua A, 123 ".to_string();
        assert_eq!(data.location().as_deref(), Some("Rua A, 123"));

        assert_eq!(PropertyData::default().location(), None);
    }

    #[test]
    fn serializes_camel_case_wire_names() {
        let data = PropertyData {
            property_type: Some(PropertyType::House),
            property_subtype: Some(PropertySubtype::CasaTerrea),
            has_pool: true,
            ..PropertyData::default()
        };
        let json = serde_json::to_value(&data).expect("serializes");
        assert_eq!(json["propertyType"], "house");
        assert_eq!(json["propertySubtype"], "casa-terrea");
        assert_eq!(json["hasPool"], true);
        assert_eq!(json["bathroomsWithShower"], 0);
    }
}
