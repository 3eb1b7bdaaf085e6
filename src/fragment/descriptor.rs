use std::fmt;

use super::Placeholder;
use crate::dom::Dom;

/// Plain description of a piece of UI, materialized into nodes by a [`super::Builder`].
pub enum Descriptor<D: Dom> {
    Element(Element<D>),
    Text(String),
    Placeholder(Placeholder<D>),
}

/// Description of an element: its type (eg `p`, `div`), attributes and children.
pub struct Element<D: Dom> {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<Descriptor<D>>,
}

impl<D: Dom> Element<D> {
    pub fn new<S>(tag: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn class<V>(self, class: V) -> Self
    where
        V: Into<String>,
    {
        self.attr("class", class)
    }

    pub fn child<C>(mut self, child: C) -> Self
    where
        C: Into<Descriptor<D>>,
    {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Descriptor<D>>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Shorthand for appending a text child.
    pub fn text<S>(self, content: S) -> Self
    where
        S: Into<String>,
    {
        self.child(Descriptor::Text(content.into()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Create a text descriptor.
pub fn text<D, S>(content: S) -> Descriptor<D>
where
    D: Dom,
    S: Into<String>,
{
    Descriptor::Text(content.into())
}

impl<D: Dom> From<Element<D>> for Descriptor<D> {
    fn from(element: Element<D>) -> Self {
        Self::Element(element)
    }
}

impl<D: Dom> From<Placeholder<D>> for Descriptor<D> {
    fn from(placeholder: Placeholder<D>) -> Self {
        Self::Placeholder(placeholder)
    }
}

impl<D: Dom> From<String> for Descriptor<D> {
    fn from(content: String) -> Self {
        Self::Text(content)
    }
}

impl<D: Dom> From<&str> for Descriptor<D> {
    fn from(content: &str) -> Self {
        Self::Text(content.to_string())
    }
}

impl<D: Dom> fmt::Debug for Descriptor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => element.fmt(f),
            Self::Text(content) => f.debug_tuple("Text").field(content).finish(),
            Self::Placeholder(placeholder) => placeholder.fmt(f),
        }
    }
}

impl<D: Dom> fmt::Debug for Element<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("children", &self.children)
            .finish()
    }
}
