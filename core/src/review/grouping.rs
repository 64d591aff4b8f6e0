use super::model::Field;
use super::state::ReviewState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub fields: Vec<&'a Field>,
}

impl<'a> CategoryGroup<'a> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn accepted_count(&self, state: &ReviewState) -> usize {
        self.fields
            .iter()
            .filter(|f| state.is_accepted(&f.id))
            .count()
    }

    pub fn badge_label(&self) -> String {
        format!("{} fields", self.len())
    }
}

/// Categories come out in first-seen order; fields keep their input order
/// within each category.
pub fn group_by_category(fields: &[Field]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for field in fields {
        match groups.iter_mut().find(|g| g.category == field.category) {
            Some(group) => group.fields.push(field),
            None => groups.push(CategoryGroup {
                category: &field.category,
                fields: vec![field],
            }),
        }
    }
    groups
}
