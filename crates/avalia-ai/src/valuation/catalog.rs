use serde::Serialize;

use super::domain::{PropertySubtype, PropertyType};

const HOUSE_SUBTYPES: [PropertySubtype; 5] = [
    PropertySubtype::Sobrado,
    PropertySubtype::Assobradado,
    PropertySubtype::CasaTerrea,
    PropertySubtype::CasaGeminada,
    PropertySubtype::Palafita,
];

const APARTMENT_SUBTYPES: [PropertySubtype; 6] = [
    PropertySubtype::Flat,
    PropertySubtype::Loft,
    PropertySubtype::Kitnet,
    PropertySubtype::Studio,
    PropertySubtype::Cobertura,
    PropertySubtype::ApartamentoTradicional,
];

const WAREHOUSE_SUBTYPES: [PropertySubtype; 4] = [
    PropertySubtype::GalpaoIndustrial,
    PropertySubtype::GalpaoComercial,
    PropertySubtype::GalpaoLogistico,
    PropertySubtype::GalpaoUrbano,
];

pub const ALL_SUBTYPES: [PropertySubtype; 15] = [
    PropertySubtype::Sobrado,
    PropertySubtype::Assobradado,
    PropertySubtype::CasaTerrea,
    PropertySubtype::CasaGeminada,
    PropertySubtype::Palafita,
    PropertySubtype::Flat,
    PropertySubtype::Loft,
    PropertySubtype::Kitnet,
    PropertySubtype::Studio,
    PropertySubtype::Cobertura,
    PropertySubtype::ApartamentoTradicional,
    PropertySubtype::GalpaoIndustrial,
    PropertySubtype::GalpaoComercial,
    PropertySubtype::GalpaoLogistico,
    PropertySubtype::GalpaoUrbano,
];

pub const CONDITION_LABELS: [&str; 5] = [
    "1 - Mal estado",
    "2 - Precisa de reparos",
    "3 - Condição média",
    "4 - Boa condição",
    "5 - Completamente novo",
];

pub const POOL_WEIGHT_LABELS: [&str; 5] = [
    "Tem piscina, mas não influencia na decisão de compra.",
    "Tem piscina, mas não é um diferencial decisivo.",
    "A piscina é um bom atrativo, mas não essencial.",
    "A piscina é um diferencial importante na decisão.",
    "Piscina é um dos principais motivos da compra.",
];

/// Subtypes offered for a property type, in display order.
pub fn subtypes_of(property_type: PropertyType) -> &'static [PropertySubtype] {
    match property_type {
        PropertyType::House => &HOUSE_SUBTYPES,
        PropertyType::Apartment => &APARTMENT_SUBTYPES,
        PropertyType::Warehouse => &WAREHOUSE_SUBTYPES,
    }
}

pub fn subtype_description(subtype: PropertySubtype) -> Option<&'static str> {
    match subtype {
        PropertySubtype::Sobrado => Some(
            "Um sobrado é uma casa com dois ou mais andares (pavimentos), caracterizada por \
             sua construção vertical que otimiza o espaço, sendo ideal para terrenos menores \
             em áreas urbanas. Geralmente, as áreas sociais (sala, cozinha) ficam no térreo, \
             e as áreas íntimas (quartos, banheiros) no andar superior, proporcionando mais \
             privacidade, e historicamente surgiu no Brasil Colônia para moradias de senhores \
             nas cidades, aproveitando o espaço sob o piso principal.",
        ),
        PropertySubtype::Flat => Some(
            "Um flat é um tipo de apartamento que combina características residenciais e \
             hoteleiras, oferecendo comodidades como serviços de limpeza, recepção e, \
             frequentemente, áreas comuns como piscinas e academias. Geralmente, os flats são \
             mobiliados e projetados para estadias de curto a médio prazo, sendo ideais para \
             profissionais em viagens de negócios ou turistas que buscam conveniência e \
             conforto durante sua estadia.",
        ),
        PropertySubtype::GalpaoIndustrial => Some(
            "Um galpão industrial é uma estrutura ampla e funcional projetada para abrigar \
             atividades industriais, como fabricação, montagem e armazenamento de produtos. \
             Caracteriza-se por sua construção robusta, com grandes vãos livres, pé-direito \
             elevado e sistemas de ventilação adequados para suportar operações industriais. \
             Esses galpões são essenciais para empresas que necessitam de espaços amplos e \
             adaptáveis para suas operações produtivas.",
        ),
        _ => None,
    }
}

/// One entry of a select input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn property_type_options() -> Vec<SelectOption> {
    PropertyType::ordered()
        .into_iter()
        .map(|kind| SelectOption::new(kind.slug(), kind.label()))
        .collect()
}

pub fn subtype_options(property_type: PropertyType) -> Vec<SelectOption> {
    subtypes_of(property_type)
        .iter()
        .map(|subtype| SelectOption::new(subtype.slug(), subtype.label()))
        .collect()
}

pub fn rating_options(labels: &[&str; 5]) -> Vec<SelectOption> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| SelectOption::new((index + 1).to_string(), *label))
        .collect()
}

/// Choices `0..=max` for a count bounded by its parent field.
pub fn range_options(max: u32) -> Vec<SelectOption> {
    (0..=max)
        .map(|value| SelectOption::new(value.to_string(), value.to_string()))
        .collect()
}
