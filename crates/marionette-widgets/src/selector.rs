//! Match criteria for selecting widgets.
//!
//! String selectors support exactly four forms, tried in this order:
//! `*`, `#id`, `.class`, and a bare type name. There are no combinators
//! and no escaping.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::SelectorError;
use crate::types::WidgetType;
use crate::widget::Widget;

#[derive(Clone)]
pub enum Selector {
    /// `*`: every widget.
    Wildcard,
    /// `#id`: the `id` attribute equals the name exactly.
    ById(String),
    /// `.class`: the class list contains the name.
    ByClass(String),
    /// Bare name: the widget's own type name equals it exactly.
    ByTypeName(String),
    /// The widget's type is this type or derives from it.
    ByType(&'static WidgetType),
    /// Arbitrary test.
    Predicate(Rc<dyn Fn(&Widget) -> bool>),
}

impl Selector {
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        if selector.is_empty() {
            return Err(SelectorError::Empty);
        }
        if selector == "*" {
            return Ok(Selector::Wildcard);
        }
        if let Some(id) = selector.strip_prefix('#') {
            return named(selector, id).map(Selector::ById);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return named(selector, class).map(Selector::ByClass);
        }
        Ok(Selector::ByTypeName(selector.to_string()))
    }

    pub fn predicate(test: impl Fn(&Widget) -> bool + 'static) -> Self {
        Selector::Predicate(Rc::new(test))
    }

    pub fn matches(&self, widget: &Widget) -> bool {
        match self {
            Selector::Wildcard => true,
            Selector::ById(id) => widget.id() == Some(id.as_str()),
            Selector::ByClass(class) => widget.has_class(class),
            Selector::ByTypeName(name) => widget.type_name() == name,
            Selector::ByType(ty) => widget.widget_type().is_a(ty),
            Selector::Predicate(test) => test(widget),
        }
    }
}

fn named(selector: &str, name: &str) -> Result<String, SelectorError> {
    if name.is_empty() {
        Err(SelectorError::MissingName(selector.to_string()))
    } else {
        Ok(name.to_string())
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl From<&'static WidgetType> for Selector {
    fn from(ty: &'static WidgetType) -> Self {
        Selector::ByType(ty)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Wildcard => f.write_str("Wildcard"),
            Selector::ById(id) => f.debug_tuple("ById").field(id).finish(),
            Selector::ByClass(class) => f.debug_tuple("ByClass").field(class).finish(),
            Selector::ByTypeName(name) => f.debug_tuple("ByTypeName").field(name).finish(),
            Selector::ByType(ty) => f.debug_tuple("ByType").field(&ty.name).finish(),
            Selector::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Wildcard => f.write_str("*"),
            Selector::ById(id) => write!(f, "#{id}"),
            Selector::ByClass(class) => write!(f, ".{class}"),
            Selector::ByTypeName(name) => f.write_str(name),
            Selector::ByType(ty) => write!(f, "<{}>", ty.name),
            Selector::Predicate(_) => f.write_str("<predicate>"),
        }
    }
}
