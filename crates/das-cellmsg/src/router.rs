//! Cell-message handler routing. Handlers are registered per column and
//! globally; dispatch
//! runs column handlers in registration order, then global handlers, and
//! short-circuits on the first error while reporting how many handlers ran.

use std::collections::HashMap;
use std::fmt;

use crate::codec::CellMessageEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError(pub String);

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for HandlerError {}

pub trait CellHandler: Send + Sync {
    fn handle(&self, msg: &CellMessageEntry) -> Result<(), HandlerError>;
}

/// Outcome of one `route_message` dispatch: how many handlers ran before
/// the first failure (or all of them, on success), and the failure itself
/// if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    pub invoked: usize,
    pub error: Option<HandlerError>,
}

impl RouteOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Default)]
pub struct CellMessageRouter {
    per_column: HashMap<u16, Vec<Box<dyn CellHandler>>>,
    global: Vec<Box<dyn CellHandler>>,
}

impl CellMessageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_column_handler(&mut self, column_idx: u16, handler: Box<dyn CellHandler>) {
        self.per_column.entry(column_idx).or_default().push(handler);
    }

    pub fn register_global_handler(&mut self, handler: Box<dyn CellHandler>) {
        self.global.push(handler);
    }

    pub fn route_message(&self, msg: &CellMessageEntry) -> RouteOutcome {
        let mut invoked = 0usize;

        if let Some(handlers) = self.per_column.get(&msg.column_idx) {
            for handler in handlers {
                invoked += 1;
                if let Err(err) = handler.handle(msg) {
                    return RouteOutcome {
                        invoked,
                        error: Some(err),
                    };
                }
            }
        }

        for handler in &self.global {
            invoked += 1;
            if let Err(err) = handler.handle(msg) {
                return RouteOutcome {
                    invoked,
                    error: Some(err),
                };
            }
        }

        RouteOutcome { invoked, error: None }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    struct CountingHandler(Arc<AtomicUsize>);
    impl CellHandler for CountingHandler {
        fn handle(&self, _msg: &CellMessageEntry) -> Result<(), HandlerError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHandler;
    impl CellHandler for FailingHandler {
        fn handle(&self, _msg: &CellMessageEntry) -> Result<(), HandlerError> {
            Err(HandlerError("boom".into()))
        }
    }

    fn msg() -> CellMessageEntry {
        CellMessageEntry::new(1, 3, 0, vec![1, 2, 3], vec![])
    }

    #[test]
    fn runs_column_handlers_before_global_handlers() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut router = CellMessageRouter::new();
        router.register_column_handler(3, Box::new(CountingHandler(counter.clone())));
        router.register_global_handler(Box::new(CountingHandler(counter.clone())));

        let outcome = router.route_message(&msg());
        assert!(outcome.is_ok());
        assert_eq!(outcome.invoked, 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn short_circuits_on_first_error_and_reports_invoked_count() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut router = CellMessageRouter::new();
        router.register_column_handler(3, Box::new(CountingHandler(counter.clone())));
        router.register_column_handler(3, Box::new(FailingHandler));
        router.register_global_handler(Box::new(CountingHandler(counter)));

        let outcome = router.route_message(&msg());
        assert_eq!(outcome.invoked, 2);
        assert_eq!(outcome.error, Some(HandlerError("boom".into())));
    }

    #[test]
    fn unregistered_column_only_runs_globals() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut router = CellMessageRouter::new();
        router.register_global_handler(Box::new(CountingHandler(counter.clone())));

        let outcome = router.route_message(&msg());
        assert!(outcome.is_ok());
        assert_eq!(outcome.invoked, 1);
    }
}
