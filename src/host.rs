use crate::reactive::Store;

/// Which reactive object a conditional atom watches when it is not given one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Component data, falling back to context data, then to component state.
    Parent,

    /// Component state.
    State,

    /// The route object.
    Route,
}

/// Data shared down from an enclosing context.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub data: Option<Store>,
}

/// The enclosing component instance. Supplies the reactive objects that atoms rendered within it
/// bind to.
#[derive(Debug, Clone, Default)]
pub struct Host {
    pub data: Option<Store>,
    pub context: Option<Context>,
    pub state: Option<Store>,
    pub route: Option<Store>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: Store) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_context_data(mut self, data: Store) -> Self {
        self.context = Some(Context { data: Some(data) });
        self
    }

    pub fn with_state(mut self, state: Store) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_route(mut self, route: Store) -> Self {
        self.route = Some(route);
        self
    }

    /// Resolve the reactive object for the given kind of source.
    pub fn resolve(&self, kind: SourceKind) -> Option<Store> {
        let source = match kind {
            SourceKind::Parent => self
                .data
                .as_ref()
                .or_else(|| self.context.as_ref().and_then(|context| context.data.as_ref()))
                .or(self.state.as_ref()),
            SourceKind::State => self.state.as_ref(),
            SourceKind::Route => self.route.as_ref(),
        };

        tracing::debug!(?kind, resolved = source.is_some(), "resolving data source");

        source.cloned()
    }
}
