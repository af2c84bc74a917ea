use crate::error::MarkerError;
use crate::marker::{find_marked, Action, ActionKind, MarkerTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// A matched route. The listener always prevents the default action of a
/// matched click and stops propagation when the route asks for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatched {
    pub kind: ActionKind,
    pub propagation: Propagation,
    /// Set when the marker was found but its data attributes were incomplete;
    /// the handler was not invoked.
    pub error: Option<MarkerError>,
}

struct Route {
    propagation: Propagation,
    handler: Box<dyn Fn(Action)>,
}

/// Maps each action kind to one handler. Built once at install time.
pub struct DispatchTable {
    routes: [Option<Route>; 3],
}

impl DispatchTable {
    pub fn new() -> Self {
        Self {
            routes: [None, None, None],
        }
    }

    /// Registers (or replaces) the handler for `kind`.
    pub fn route<F>(mut self, kind: ActionKind, propagation: Propagation, handler: F) -> Self
    where
        F: Fn(Action) + 'static,
    {
        self.routes[kind.index()] = Some(Route {
            propagation,
            handler: Box::new(handler),
        });
        self
    }

    pub fn has_route(&self, kind: ActionKind) -> bool {
        self.routes[kind.index()].is_some()
    }

    /// Classifies the click target and runs the first matching handler.
    pub fn dispatch<T: MarkerTarget>(&self, target: &T) -> Option<Dispatched> {
        for kind in ActionKind::ALL {
            let Some(route) = self.routes[kind.index()].as_ref() else {
                continue;
            };
            let Some(element) = find_marked(target, kind) else {
                continue;
            };
            let error = match Action::read(kind, &element) {
                Ok(action) => {
                    (route.handler)(action);
                    None
                }
                Err(err) => Some(err),
            };
            return Some(Dispatched {
                kind,
                propagation: route.propagation,
                error,
            });
        }
        None
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}
