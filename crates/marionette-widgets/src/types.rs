//! Widget type tags and their inheritance chain.

use std::fmt;

/// A widget type. Every type except the root `Widget` names a base type;
/// following `base` always ends at [`WIDGET`].
#[derive(Debug, PartialEq, Eq)]
pub struct WidgetType {
    pub name: &'static str,
    pub base: Option<&'static WidgetType>,
    /// Whether widgets of this type may hold children.
    pub composite: bool,
}

pub static WIDGET: WidgetType = WidgetType {
    name: "Widget",
    base: None,
    composite: false,
};

pub static COMPOSITE: WidgetType = WidgetType {
    name: "Composite",
    base: Some(&WIDGET),
    composite: true,
};

pub static PAGE: WidgetType = WidgetType {
    name: "Page",
    base: Some(&COMPOSITE),
    composite: true,
};

pub static SCROLL_VIEW: WidgetType = WidgetType {
    name: "ScrollView",
    base: Some(&COMPOSITE),
    composite: true,
};

pub static BUTTON: WidgetType = WidgetType {
    name: "Button",
    base: Some(&WIDGET),
    composite: false,
};

pub static TEXT_VIEW: WidgetType = WidgetType {
    name: "TextView",
    base: Some(&WIDGET),
    composite: false,
};

pub static TEXT_INPUT: WidgetType = WidgetType {
    name: "TextInput",
    base: Some(&WIDGET),
    composite: false,
};

pub static IMAGE_VIEW: WidgetType = WidgetType {
    name: "ImageView",
    base: Some(&WIDGET),
    composite: false,
};

/// Every built-in type, root first.
pub static BUILT_IN_TYPES: [&WidgetType; 8] = [
    &WIDGET,
    &COMPOSITE,
    &PAGE,
    &SCROLL_VIEW,
    &BUTTON,
    &TEXT_VIEW,
    &TEXT_INPUT,
    &IMAGE_VIEW,
];

impl WidgetType {
    /// Look up a built-in type by its exact name.
    pub fn lookup(name: &str) -> Option<&'static WidgetType> {
        BUILT_IN_TYPES.iter().copied().find(|t| t.name == name)
    }

    /// True if `self` is `other` or derives from it.
    pub fn is_a(&self, other: &WidgetType) -> bool {
        self.chain().any(|t| std::ptr::eq(t, other))
    }

    /// This type followed by its bases, ending at the root.
    pub fn chain(&self) -> impl Iterator<Item = &WidgetType> {
        std::iter::successors(Some(self), |t| t.base)
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
