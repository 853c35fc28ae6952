use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::clamp::{clamp_to_parent, parse_flag, parse_rating, CountBounds};
use super::domain::{PropertyData, PropertySubtype, PropertyType, Rating};
use super::schema::{self, FieldId, FieldKind, FIELDS};

/// Raw value submitted for a field, as a browser would send it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Flag(bool),
    Number(i64),
    Decimal(f64),
    Text(String),
    Empty,
}

impl FieldInput {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn as_text(&self) -> String {
        match self {
            Self::Flag(flag) => flag.to_string(),
            Self::Number(number) => number.to_string(),
            Self::Decimal(number) => number.to_string(),
            Self::Text(text) => text.clone(),
            Self::Empty => String::new(),
        }
    }

    fn as_flag(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Number(number) => *number != 0,
            Self::Decimal(number) => *number != 0.0,
            Self::Text(text) => parse_flag(text),
            Self::Empty => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEdit {
    pub field: FieldId,
    #[serde(default = "empty_input")]
    pub value: FieldInput,
}

fn empty_input() -> FieldInput {
    FieldInput::Empty
}

impl FieldEdit {
    pub fn new(field: FieldId, value: FieldInput) -> Self {
        Self { field, value }
    }

    pub fn text(field: FieldId, value: impl Into<String>) -> Self {
        Self::new(field, FieldInput::text(value))
    }

    pub fn flag(field: FieldId, value: bool) -> Self {
        Self::new(field, FieldInput::Flag(value))
    }
}

/// Produce the record that results from one edit. The input is untouched.
pub fn apply_edit(current: &PropertyData, edit: &FieldEdit) -> PropertyData {
    let mut next = current.clone();
    let spec = schema::spec(edit.field);

    match spec.kind {
        FieldKind::Select => apply_select(&mut next, edit),
        FieldKind::Text => {
            if let Some(slot) = next.text_mut(edit.field) {
                *slot = edit.value.as_text();
            }
        }
        FieldKind::Count(bounds) => {
            let value = count_from(&edit.value, bounds);
            if let Some(slot) = next.count_mut(edit.field) {
                *slot = value;
            }
            reclamp_dependents(&mut next, edit.field);
        }
        FieldKind::DependentCount { parent } => {
            let ceiling = next.count(parent).unwrap_or(0);
            let value = count_from(&edit.value, CountBounds::up_to(ceiling));
            if let Some(slot) = next.count_mut(edit.field) {
                *slot = value;
            }
        }
        FieldKind::Flag => {
            if let Some(slot) = next.flag_mut(edit.field) {
                *slot = edit.value.as_flag();
            }
        }
        FieldKind::Rating(_) => {
            if let Some(slot) = next.rating_mut(edit.field) {
                *slot = parse_rating(&edit.value.as_text());
            }
        }
    }

    next
}

fn count_from(input: &FieldInput, bounds: CountBounds) -> u32 {
    match input {
        FieldInput::Number(number) => bounds.clamp(*number),
        other => bounds.clamp_input(&other.as_text()),
    }
}

fn apply_select(data: &mut PropertyData, edit: &FieldEdit) {
    let raw = edit.value.as_text();
    match edit.field {
        FieldId::PropertyType => {
            let selected = PropertyType::parse(&raw);
            if selected != data.property_type {
                data.property_subtype = None;
            }
            data.property_type = selected;
        }
        FieldId::PropertySubtype => {
            data.property_subtype = PropertySubtype::parse(&raw)
                .filter(|subtype| Some(subtype.parent()) == data.property_type);
        }
        _ => {}
    }
}

fn reclamp_dependents(data: &mut PropertyData, parent: FieldId) {
    let ceiling = data.count(parent).unwrap_or(0);
    for spec in FIELDS.iter() {
        if spec.kind == (FieldKind::DependentCount { parent }) {
            if let Some(slot) = data.count_mut(spec.id) {
                *slot = clamp_to_parent(*slot, ceiling);
            }
        }
    }
}

impl PropertyData {
    pub fn count(&self, field: FieldId) -> Option<u32> {
        let value = match field {
            FieldId::Bedrooms => self.bedrooms,
            FieldId::Suites => self.suites,
            FieldId::Bathrooms => self.bathrooms,
            FieldId::BathroomsWithShower => self.bathrooms_with_shower,
            FieldId::LivingRooms => self.living_rooms,
            FieldId::Kitchens => self.kitchens,
            FieldId::ParkingSpaces => self.parking_spaces,
            FieldId::PoolSizeSqm => self.pool_size_sqm,
            _ => return None,
        };
        Some(value)
    }

    fn count_mut(&mut self, field: FieldId) -> Option<&mut u32> {
        match field {
            FieldId::Bedrooms => Some(&mut self.bedrooms),
            FieldId::Suites => Some(&mut self.suites),
            FieldId::Bathrooms => Some(&mut self.bathrooms),
            FieldId::BathroomsWithShower => Some(&mut self.bathrooms_with_shower),
            FieldId::LivingRooms => Some(&mut self.living_rooms),
            FieldId::Kitchens => Some(&mut self.kitchens),
            FieldId::ParkingSpaces => Some(&mut self.parking_spaces),
            FieldId::PoolSizeSqm => Some(&mut self.pool_size_sqm),
            _ => None,
        }
    }

    pub fn flag(&self, field: FieldId) -> Option<bool> {
        let value = match field {
            FieldId::HasPool => self.has_pool,
            FieldId::PoolHeated => self.pool_heated,
            FieldId::PoolLighting => self.pool_lighting,
            FieldId::DecorModern => self.decor_modern,
            FieldId::DecorClassic => self.decor_classic,
            FieldId::DecorMinimalist => self.decor_minimalist,
            FieldId::DecorIndustrial => self.decor_industrial,
            FieldId::DecorRustic => self.decor_rustic,
            FieldId::Furnished => self.furnished,
            _ => return None,
        };
        Some(value)
    }

    fn flag_mut(&mut self, field: FieldId) -> Option<&mut bool> {
        match field {
            FieldId::HasPool => Some(&mut self.has_pool),
            FieldId::PoolHeated => Some(&mut self.pool_heated),
            FieldId::PoolLighting => Some(&mut self.pool_lighting),
            FieldId::DecorModern => Some(&mut self.decor_modern),
            FieldId::DecorClassic => Some(&mut self.decor_classic),
            FieldId::DecorMinimalist => Some(&mut self.decor_minimalist),
            FieldId::DecorIndustrial => Some(&mut self.decor_industrial),
            FieldId::DecorRustic => Some(&mut self.decor_rustic),
            FieldId::Furnished => Some(&mut self.furnished),
            _ => None,
        }
    }

    pub fn rating(&self, field: FieldId) -> Option<Rating> {
        match field {
            FieldId::PoolCondition => self.pool_condition,
            FieldId::PoolPurchaseWeight => self.pool_purchase_weight,
            FieldId::ExteriorPaint => self.exterior_paint,
            FieldId::InteriorPaint => self.interior_paint,
            FieldId::FurnitureCondition => self.furniture_condition,
            _ => None,
        }
    }

    fn rating_mut(&mut self, field: FieldId) -> Option<&mut Option<Rating>> {
        match field {
            FieldId::PoolCondition => Some(&mut self.pool_condition),
            FieldId::PoolPurchaseWeight => Some(&mut self.pool_purchase_weight),
            FieldId::ExteriorPaint => Some(&mut self.exterior_paint),
            FieldId::InteriorPaint => Some(&mut self.interior_paint),
            FieldId::FurnitureCondition => Some(&mut self.furniture_condition),
            _ => None,
        }
    }

    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::Cep => Some(&self.cep),
            FieldId::Number => Some(&self.number),
            FieldId::Address => Some(&self.address),
            FieldId::PricePerSqm => Some(&self.price_per_sqm),
            _ => None,
        }
    }

    fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::Cep => Some(&mut self.cep),
            FieldId::Number => Some(&mut self.number),
            FieldId::Address => Some(&mut self.address),
            FieldId::PricePerSqm => Some(&mut self.price_per_sqm),
            _ => None,
        }
    }

    /// Current value of `field` as it is rendered in a form view.
    pub fn value_of(&self, field: FieldId) -> Value {
        match field {
            FieldId::PropertyType => self
                .property_type
                .map_or(Value::Null, |kind| Value::from(kind.slug())),
            FieldId::PropertySubtype => self
                .property_subtype
                .map_or(Value::Null, |subtype| Value::from(subtype.slug())),
            other => {
                if let Some(count) = self.count(other) {
                    Value::from(count)
                } else if let Some(flag) = self.flag(other) {
                    Value::from(flag)
                } else if let Some(text) = self.text(other) {
                    Value::from(text)
                } else {
                    self.rating(other)
                        .map_or(Value::Null, |rating| Value::from(rating.value()))
                }
            }
        }
    }
}
