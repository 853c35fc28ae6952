//! Derives visible fields and select options from the current record.

use super::catalog::{
    self, property_type_options, range_options, rating_options, SelectOption,
    CONDITION_LABELS, POOL_WEIGHT_LABELS,
};
use super::domain::{PropertyData, PropertyType};
use super::schema::{FieldId, FieldKind, FieldSpec, FormSection, RatingScale, Visibility, FIELDS};

pub fn is_visible(spec: &FieldSpec, data: &PropertyData) -> bool {
    match spec.visibility {
        Visibility::Always => true,
        Visibility::WhenTypeSelected => data.property_type.is_some(),
        Visibility::WhenPositive(parent) => data.count(parent).unwrap_or(0) > 0,
        Visibility::WhenFlag(flag) => data.flag(flag).unwrap_or(false),
    }
}

pub fn visible_fields(data: &PropertyData) -> Vec<&'static FieldSpec> {
    FIELDS.iter().filter(|spec| is_visible(spec, data)).collect()
}

pub fn visible_in_section(section: FormSection, data: &PropertyData) -> Vec<&'static FieldSpec> {
    FIELDS
        .iter()
        .filter(|spec| spec.section == section && is_visible(spec, data))
        .collect()
}

/// Subtype choices for the selected type; empty when no type is selected.
pub fn subtypes_for(property_type: Option<PropertyType>) -> Vec<SelectOption> {
    property_type.map(catalog::subtype_options).unwrap_or_default()
}

/// Choices for a select-like field. Free inputs have none.
pub fn options(spec: &FieldSpec, data: &PropertyData) -> Vec<SelectOption> {
    match spec.kind {
        FieldKind::Select => match spec.id {
            FieldId::PropertyType => property_type_options(),
            FieldId::PropertySubtype => subtypes_for(data.property_type),
            _ => Vec::new(),
        },
        FieldKind::DependentCount { parent } => range_options(data.count(parent).unwrap_or(0)),
        FieldKind::Rating(RatingScale::Condition) => rating_options(&CONDITION_LABELS),
        FieldKind::Rating(RatingScale::PoolPurchaseWeight) => rating_options(&POOL_WEIGHT_LABELS),
        FieldKind::Text | FieldKind::Count(_) | FieldKind::Flag => Vec::new(),
    }
}

/// Explanatory text shown under a field, if any applies right now.
pub fn help_text(spec: &FieldSpec, data: &PropertyData) -> Option<&'static str> {
    match spec.id {
        FieldId::PropertySubtype => {
            data.property_subtype.and_then(catalog::subtype_description)
        }
        _ => None,
    }
}

/// Label for a field, specialised by the current record where relevant.
pub fn label_for(spec: &FieldSpec, data: &PropertyData) -> &'static str {
    match (spec.id, data.property_type) {
        (FieldId::PropertySubtype, Some(kind)) => kind.subtype_prompt(),
        _ => spec.label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::domain::PropertySubtype;
    use crate::valuation::edit::{apply_edit, FieldEdit};
    use crate::valuation::schema::spec;

    fn ids(fields: &[&FieldSpec]) -> Vec<FieldId> {
        fields.iter().map(|spec| spec.id).collect()
    }

    const POOL_FIELDS: [FieldId; 5] = [
        FieldId::PoolSizeSqm,
        FieldId::PoolHeated,
        FieldId::PoolLighting,
        FieldId::PoolCondition,
        FieldId::PoolPurchaseWeight,
    ];

    #[test]
    fn subtype_list_tracks_selected_type() {
        assert!(subtypes_for(None).is_empty());
        for kind in PropertyType::ordered() {
            let values: Vec<_> = subtypes_for(Some(kind))
                .into_iter()
                .map(|option| option.value)
                .collect();
            let expected: Vec<_> = catalog::subtypes_of(kind)
                .iter()
                .map(|subtype| subtype.slug().to_string())
                .collect();
            assert_eq!(values, expected);
        }
    }

    #[test]
    fn subtype_field_hidden_until_type_selected() {
        let data = PropertyData::default();
        assert!(!is_visible(spec(FieldId::PropertySubtype), &data));

        let data = apply_edit(&data, &FieldEdit::text(FieldId::PropertyType, "house"));
        assert!(is_visible(spec(FieldId::PropertySubtype), &data));
        assert_eq!(label_for(spec(FieldId::PropertySubtype), &data), "Tipo de Casa");
    }

    #[test]
    fn pool_toggle_reveals_exactly_pool_fields() {
        let closed = PropertyData::default();
        let base = ids(&visible_fields(&closed));

        let open = apply_edit(&closed, &FieldEdit::flag(FieldId::HasPool, true));
        let revealed: Vec<_> = ids(&visible_fields(&open))
            .into_iter()
            .filter(|id| !base.contains(id))
            .collect();
        assert_eq!(revealed, POOL_FIELDS);

        let open = apply_edit(&open, &FieldEdit::text(FieldId::PoolSizeSqm, "30"));
        let closed_again = apply_edit(&open, &FieldEdit::flag(FieldId::HasPool, false));
        assert_eq!(ids(&visible_fields(&closed_again)), base);
        assert_eq!(closed_again.pool_size_sqm, 30);
    }

    #[test]
    fn dependent_selectors_offer_zero_to_parent() {
        let data = apply_edit(
            &PropertyData::default(),
            &FieldEdit::text(FieldId::Bedrooms, "3"),
        );
        let suites = spec(FieldId::Suites);
        assert!(is_visible(suites, &data));
        let values: Vec<_> = options(suites, &data)
            .into_iter()
            .map(|option| option.value)
            .collect();
        assert_eq!(values, ["0", "1", "2", "3"]);

        assert!(!is_visible(spec(FieldId::BathroomsWithShower), &data));
    }

    #[test]
    fn furniture_condition_follows_furnished_flag() {
        let data = PropertyData::default();
        assert!(!is_visible(spec(FieldId::FurnitureCondition), &data));
        let data = apply_edit(&data, &FieldEdit::text(FieldId::Furnished, "sim"));
        assert!(is_visible(spec(FieldId::FurnitureCondition), &data));
        assert_eq!(options(spec(FieldId::FurnitureCondition), &data).len(), 5);
    }

    #[test]
    fn described_subtypes_surface_help_text() {
        let data = PropertyData {
            property_type: Some(PropertyType::Apartment),
            property_subtype: Some(PropertySubtype::Flat),
            ..PropertyData::default()
        };
        assert!(help_text(spec(FieldId::PropertySubtype), &data).is_some());

        let data = PropertyData {
            property_subtype: Some(PropertySubtype::Loft),
            ..data
        };
        assert!(help_text(spec(FieldId::PropertySubtype), &data).is_none());
    }

    #[test]
    fn section_filter_respects_visibility() {
        let data = PropertyData::default();
        let identification = ids(&visible_in_section(FormSection::Identification, &data));
        assert_eq!(
            identification,
            [FieldId::PropertyType, FieldId::Cep, FieldId::Number, FieldId::Address]
        );
    }
}
