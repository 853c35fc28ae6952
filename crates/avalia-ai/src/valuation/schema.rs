//! Declarative description of every form field: where it lives, what it
//! accepts, and when it is shown.

use serde::{Deserialize, Serialize};

use super::clamp::CountBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    PropertyType,
    PropertySubtype,
    Cep,
    Number,
    Address,
    PricePerSqm,
    Bedrooms,
    Suites,
    Bathrooms,
    BathroomsWithShower,
    LivingRooms,
    Kitchens,
    ParkingSpaces,
    HasPool,
    PoolSizeSqm,
    PoolHeated,
    PoolLighting,
    PoolCondition,
    PoolPurchaseWeight,
    DecorModern,
    DecorClassic,
    DecorMinimalist,
    DecorIndustrial,
    DecorRustic,
    ExteriorPaint,
    InteriorPaint,
    Furnished,
    FurnitureCondition,
}

/// Form sections. In the stepped layout each section is one wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    Identification,
    Pricing,
    Structure,
    Details,
}

impl FormSection {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Identification,
            Self::Pricing,
            Self::Structure,
            Self::Details,
        ]
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Identification => "Tipo do Imóvel",
            Self::Pricing => "Valor do Metro Quadrado",
            Self::Structure => "Estrutura do Imóvel",
            Self::Details => "Detalhes e Condições",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Identification => "Selecione o tipo e localização do imóvel",
            Self::Pricing => "Informe o valor do metro quadrado na região",
            Self::Structure => "Descreva a estrutura interna do imóvel",
            Self::Details => "Informe os detalhes adicionais e condições",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingScale {
    Condition,
    PoolPurchaseWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Select,
    Text,
    Count(CountBounds),
    /// Count bounded above by the current value of another count.
    DependentCount { parent: FieldId },
    Flag,
    Rating(RatingScale),
}

impl FieldKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Text => "text",
            Self::Count(_) => "count",
            Self::DependentCount { .. } => "dependent_count",
            Self::Flag => "flag",
            Self::Rating(_) => "rating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Always,
    WhenTypeSelected,
    WhenPositive(FieldId),
    WhenFlag(FieldId),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub section: FormSection,
    pub kind: FieldKind,
    pub visibility: Visibility,
}

const fn field(
    id: FieldId,
    label: &'static str,
    section: FormSection,
    kind: FieldKind,
    visibility: Visibility,
) -> FieldSpec {
    FieldSpec {
        id,
        label,
        section,
        kind,
        visibility,
    }
}

use FieldId as F;
use FieldKind as K;
use FormSection as S;
use Visibility as V;

pub const BEDROOM_BOUNDS: CountBounds = CountBounds::up_to(20);
pub const BATHROOM_BOUNDS: CountBounds = CountBounds::up_to(10);
const OPEN_COUNT: CountBounds = CountBounds::non_negative();
const CONDITION: K = K::Rating(RatingScale::Condition);

/// Every field in display order.
pub static FIELDS: [FieldSpec; 28] = [
    field(F::PropertyType, "Tipo do Imóvel", S::Identification, K::Select, V::Always),
    field(F::PropertySubtype, "Subtipo do Imóvel", S::Identification, K::Select, V::WhenTypeSelected),
    field(F::Cep, "CEP", S::Identification, K::Text, V::Always),
    field(F::Number, "Número", S::Identification, K::Text, V::Always),
    field(F::Address, "Endereço do Imóvel", S::Identification, K::Text, V::Always),
    field(F::PricePerSqm, "Valor do Metro Quadrado (R$)", S::Pricing, K::Text, V::Always),
    field(F::Bedrooms, "Número de Quartos", S::Structure, K::Count(BEDROOM_BOUNDS), V::Always),
    field(
        F::Suites,
        "Quantos são Suítes?",
        S::Structure,
        K::DependentCount { parent: F::Bedrooms },
        V::WhenPositive(F::Bedrooms),
    ),
    field(F::Bathrooms, "Número de Banheiros", S::Structure, K::Count(BATHROOM_BOUNDS), V::Always),
    field(
        F::BathroomsWithShower,
        "Quantos têm Chuveiro?",
        S::Structure,
        K::DependentCount { parent: F::Bathrooms },
        V::WhenPositive(F::Bathrooms),
    ),
    field(F::LivingRooms, "Número de Salas de Estar", S::Structure, K::Count(OPEN_COUNT), V::Always),
    field(F::Kitchens, "Número de Cozinhas", S::Structure, K::Count(OPEN_COUNT), V::Always),
    field(F::ParkingSpaces, "Vagas de Garagem", S::Structure, K::Count(OPEN_COUNT), V::Always),
    field(F::HasPool, "Possui Piscina?", S::Details, K::Flag, V::Always),
    field(F::PoolSizeSqm, "Tamanho da Piscina (m²)", S::Details, K::Count(OPEN_COUNT), V::WhenFlag(F::HasPool)),
    field(F::PoolHeated, "Possui Aquecimento", S::Details, K::Flag, V::WhenFlag(F::HasPool)),
    field(F::PoolLighting, "Possui Iluminação", S::Details, K::Flag, V::WhenFlag(F::HasPool)),
    field(F::PoolCondition, "Condição Estética da Piscina", S::Details, CONDITION, V::WhenFlag(F::HasPool)),
    field(
        F::PoolPurchaseWeight,
        "Qual o valor da piscina para a compra?",
        S::Details,
        K::Rating(RatingScale::PoolPurchaseWeight),
        V::WhenFlag(F::HasPool),
    ),
    field(F::DecorModern, "Moderno", S::Details, K::Flag, V::Always),
    field(F::DecorClassic, "Clássico", S::Details, K::Flag, V::Always),
    field(F::DecorMinimalist, "Minimalista", S::Details, K::Flag, V::Always),
    field(F::DecorIndustrial, "Industrial", S::Details, K::Flag, V::Always),
    field(F::DecorRustic, "Rústico", S::Details, K::Flag, V::Always),
    field(F::ExteriorPaint, "Condição da Pintura Externa", S::Details, CONDITION, V::Always),
    field(F::InteriorPaint, "Condição da Pintura Interna", S::Details, CONDITION, V::Always),
    field(F::Furnished, "O Imóvel está Mobiliado?", S::Details, K::Flag, V::Always),
    field(F::FurnitureCondition, "Condição da Mobília", S::Details, CONDITION, V::WhenFlag(F::Furnished)),
];

pub fn spec(id: FieldId) -> &'static FieldSpec {
    FIELDS
        .iter()
        .find(|spec| spec.id == id)
        .unwrap_or_else(|| unreachable!("every FieldId has a FIELDS entry"))
}

pub fn section_fields(section: FormSection) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |spec| spec.section == section)
}

/// Serializable rendering of the schema for API clients.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSchemaEntry {
    pub field: FieldId,
    pub label: &'static str,
    pub section: FormSection,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounded_by: Option<FieldId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<RatingScale>,
    pub visible_when: String,
}

impl From<&FieldSpec> for FieldSchemaEntry {
    fn from(spec: &FieldSpec) -> Self {
        let (min, max) = match spec.kind {
            FieldKind::Count(bounds) => (Some(bounds.min), bounds.max),
            FieldKind::DependentCount { .. } => (Some(0), None),
            FieldKind::Rating(_) => (Some(1), Some(5)),
            _ => (None, None),
        };
        let bounded_by = match spec.kind {
            FieldKind::DependentCount { parent } => Some(parent),
            _ => None,
        };
        let scale = match spec.kind {
            FieldKind::Rating(scale) => Some(scale),
            _ => None,
        };
        let visible_when = match spec.visibility {
            Visibility::Always => "always".to_string(),
            Visibility::WhenTypeSelected => "propertyType is set".to_string(),
            Visibility::WhenPositive(parent) => format!("{} > 0", wire_name(parent)),
            Visibility::WhenFlag(flag) => format!("{} is true", wire_name(flag)),
        };

        Self {
            field: spec.id,
            label: spec.label,
            section: spec.section,
            kind: spec.kind.name(),
            min,
            max,
            bounded_by,
            scale,
            visible_when,
        }
    }
}

pub fn schema() -> Vec<FieldSchemaEntry> {
    FIELDS.iter().map(FieldSchemaEntry::from).collect()
}

fn wire_name(id: FieldId) -> String {
    serde_json::to_value(id)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}
