/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    type Id: PartialEq + Clone;

    fn id(&self) -> &Self::Id;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Finds an entity by identifier in a slice.
pub fn find_by_id<'a, T: Identifiable>(items: &'a [T], id: &T::Id) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Finds an entity by name, ignoring ASCII case and surrounding whitespace.
pub fn find_by_name<'a, T: NamedEntity>(items: &'a [T], name: &str) -> Option<&'a T> {
    let needle = name.trim();
    items
        .iter()
        .find(|item| item.name().trim().eq_ignore_ascii_case(needle))
}
