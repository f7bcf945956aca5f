//! Routing collaborator.
//!
//! When a detail panel opens, the host is offered the open item so it can
//! reflect it in the shareable location without a full reload; `None` on
//! close. No other routing behavior is in scope for the engine.

use crate::modal::machine::RouteTarget;

pub trait RoutingSink {
    fn reflect(&mut self, target: Option<RouteTarget>);
}
