use std::{borrow::Cow, fmt, rc::Rc};

use serde_json::Value;

use crate::{
    dom::Dom,
    fragment::{placeholder, Layout, Mount, Placeholder, RenderFn, Updater},
    host::{Host, SourceKind},
    reactive::{truthy, Store},
};

/// Render callback of a conditional atom, run with the watched value and the host.
pub type AtomFn<D> = Rc<dyn Fn(&Value, &Host) -> Layout<D>>;

/// Decides whether a watched value is handed to the render callback, or to the fallback.
#[derive(Debug, Clone, PartialEq)]
enum Filter {
    PassThrough,
    Equals(Value),
    Truthy,
}

impl Filter {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::PassThrough => true,
            Self::Equals(expected) => value == expected,
            Self::Truthy => truthy(value),
        }
    }
}

/// Configuration for a conditional atom: which reactive object and property to watch, and which
/// values to render.
///
/// Each family has its own constructor. Leaving out [`Conditional::source()`] resolves the source
/// from the host when the placeholder is realized.
///
/// ```ignore
/// let panel = Conditional::on_load()
///     .source(store)
///     .fallback(|_, _| Layout::render(text("loading")))
///     .render(|_, _| Layout::render(div().text("ready")));
/// ```
pub struct Conditional<D: Dom> {
    kind: Cow<'static, str>,
    source_kind: SourceKind,
    source: Option<Store>,
    property: String,
    filter: Filter,
    fallback: Option<AtomFn<D>>,
}

impl<D: Dom> Conditional<D> {
    fn new<P>(kind: &'static str, source_kind: SourceKind, property: P, filter: Filter) -> Self
    where
        P: Into<String>,
    {
        Self {
            kind: Cow::Borrowed(kind),
            source_kind,
            source: None,
            property: property.into(),
            filter,
            fallback: None,
        }
    }

    /// Render every value of a property of the host's data.
    pub fn on<P: Into<String>>(property: P) -> Self {
        Self::new("on", SourceKind::Parent, property, Filter::PassThrough)
    }

    /// Render every value of a property of the host's state.
    pub fn on_state<P: Into<String>>(property: P) -> Self {
        Self::new("on-state", SourceKind::State, property, Filter::PassThrough)
    }

    /// Render every value of a property of the route.
    pub fn on_route<P: Into<String>>(property: P) -> Self {
        Self::new("on-route", SourceKind::Route, property, Filter::PassThrough)
    }

    /// Render only while a property of the host's data equals `expected`.
    pub fn if_eq<P, V>(property: P, expected: V) -> Self
    where
        P: Into<String>,
        V: Into<Value>,
    {
        Self::new("if", SourceKind::Parent, property, Filter::Equals(expected.into()))
    }

    /// Render only while a property of the host's state equals `expected`.
    pub fn if_state<P, V>(property: P, expected: V) -> Self
    where
        P: Into<String>,
        V: Into<Value>,
    {
        Self::new("if-state", SourceKind::State, property, Filter::Equals(expected.into()))
    }

    /// Render while `loaded` of the host's data is truthy.
    pub fn on_load() -> Self {
        Self::new("on-load", SourceKind::Parent, "loaded", Filter::Truthy)
    }

    /// Render while `loaded` of the host's state is truthy.
    pub fn on_state_load() -> Self {
        Self::new("on-state-load", SourceKind::State, "loaded", Filter::Truthy)
    }

    /// Render while `open` of the host's data is truthy.
    pub fn on_open() -> Self {
        Self::new("on-open", SourceKind::Parent, "open", Filter::Truthy)
    }

    /// Render while `open` of the host's state is truthy.
    pub fn on_state_open() -> Self {
        Self::new("on-state-open", SourceKind::State, "open", Filter::Truthy)
    }

    /// Watch this reactive object instead of resolving one from the host.
    pub fn source(mut self, source: Store) -> Self {
        self.source = Some(source);
        self
    }

    /// Watch a different property than the family's default.
    pub fn property<P: Into<String>>(mut self, property: P) -> Self {
        self.property = property.into();
        self
    }

    pub(crate) fn labelled<K: Into<Cow<'static, str>>>(mut self, kind: K) -> Self {
        self.kind = kind.into();
        self
    }

    /// Rendered in place of the atom whenever a value is rejected by the family's filter. Without
    /// one, rejected values clear the content.
    pub fn fallback<F>(mut self, fallback: F) -> Self
    where
        F: 'static + Fn(&Value, &Host) -> Layout<D>,
    {
        self.fallback = Some(Rc::new(fallback));
        self
    }

    /// Finish the atom. The returned placeholder installs a single watch when it is realized, and
    /// re-renders its sibling on every write to the watched property.
    pub fn render<F>(self, render: F) -> Placeholder<D>
    where
        F: 'static + Fn(&Value, &Host) -> Layout<D>,
    {
        let Self {
            kind,
            source_kind,
            source,
            property,
            filter,
            fallback,
        } = self;

        let filtered: RenderFn<D> = Rc::new(move |value: &Value, _: &D::Node, host: &Host| {
            if filter.accepts(value) {
                render(value, host)
            } else {
                fallback
                    .as_ref()
                    .map_or(Layout::Clear, |fallback| fallback(value, host))
            }
        });

        placeholder(kind, move |mount: &Mount<D>| {
            let Some(builder) = mount.builder() else {
                return;
            };

            let source = source.or_else(|| mount.host().resolve(source_kind));
            let updater = Updater::new(mount, filtered);

            builder.binder().watch(
                mount.anchor(),
                source.as_ref(),
                &property,
                Rc::new(move |value: &Value| updater.update(value)),
            );
        })
    }
}

impl<D: Dom> fmt::Debug for Conditional<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("kind", &self.kind)
            .field("source_kind", &self.source_kind)
            .field("source", &self.source)
            .field("property", &self.property)
            .field("filter", &self.filter)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

/// Render every value of a property of the host's data.
pub fn on<D, P, F>(property: P, render: F) -> Placeholder<D>
where
    D: Dom,
    P: Into<String>,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::on(property).render(render)
}

/// Render every value of a property of the host's state.
pub fn on_state<D, P, F>(property: P, render: F) -> Placeholder<D>
where
    D: Dom,
    P: Into<String>,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::on_state(property).render(render)
}

/// Render every value of a property of the route.
pub fn on_route<D, P, F>(property: P, render: F) -> Placeholder<D>
where
    D: Dom,
    P: Into<String>,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::on_route(property).render(render)
}

/// Render only while a property of the host's data equals `expected`.
pub fn if_eq<D, P, V, F>(property: P, expected: V, render: F) -> Placeholder<D>
where
    D: Dom,
    P: Into<String>,
    V: Into<Value>,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::if_eq(property, expected).render(render)
}

/// Render only while a property of the host's state equals `expected`.
pub fn if_state<D, P, V, F>(property: P, expected: V, render: F) -> Placeholder<D>
where
    D: Dom,
    P: Into<String>,
    V: Into<Value>,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::if_state(property, expected).render(render)
}

/// Render while `loaded` of the host's data is truthy.
pub fn on_load<D, F>(render: F) -> Placeholder<D>
where
    D: Dom,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::on_load().render(render)
}

/// Render while `loaded` of the host's state is truthy.
pub fn on_state_load<D, F>(render: F) -> Placeholder<D>
where
    D: Dom,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::on_state_load().render(render)
}

/// Render while `open` of the host's data is truthy.
pub fn on_open<D, F>(render: F) -> Placeholder<D>
where
    D: Dom,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::on_open().render(render)
}

/// Render while `open` of the host's state is truthy.
pub fn on_state_open<D, F>(render: F) -> Placeholder<D>
where
    D: Dom,
    F: 'static + Fn(&Value, &Host) -> Layout<D>,
{
    Conditional::on_state_open().render(render)
}
