//! Typed publish/subscribe dispatcher
//!
//! Two kinds of hooks:
//! - **Actions** are observers. Publishers emit an event value, every subscriber
//!   sees it by reference, nothing is returned.
//! - **Filters** transform a value. Each subscriber receives the output of the
//!   previous one.
//!
//! Hooks are keyed by the event type, so a subscriber can only be registered
//! against the payload shape its publisher declares. Ordering between
//! subscribers of the same hook is unspecified.

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::prelude::*;

/// Observer event
pub trait Action: Send + Sync + 'static {
	const NAME: &'static str;
}

/// Value-transforming hook
pub trait Filter: 'static {
	const NAME: &'static str;
	type Value: 'static;
}

type ActionFn<A> = Arc<dyn Fn(&A) + Send + Sync>;
type FilterFn<F> = Arc<dyn Fn(<F as Filter>::Value) -> <F as Filter>::Value + Send + Sync>;
type Subscribers = HashMap<TypeId, Vec<Box<dyn Any + Send + Sync>>>;

#[derive(Default)]
pub struct Hooks {
	actions: RwLock<Subscribers>,
	filters: RwLock<Subscribers>,
}

impl std::fmt::Debug for Hooks {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Hooks")
			.field("actions", &self.actions.read().len())
			.field("filters", &self.filters.read().len())
			.finish()
	}
}

impl Hooks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Subscribe to an action
	pub fn on<A: Action>(&self, f: impl Fn(&A) + Send + Sync + 'static) {
		let f: ActionFn<A> = Arc::new(f);
		debug!("Subscribing to action: {}", A::NAME);
		self.actions.write().entry(TypeId::of::<A>()).or_default().push(Box::new(f));
	}

	/// Emit an action to every subscriber. Returns the number of subscribers notified.
	///
	/// Subscribers are collected before the first one runs, so a subscriber may
	/// emit further actions or subscribe new handlers.
	pub fn emit<A: Action>(&self, event: &A) -> usize {
		let subscribers: Vec<ActionFn<A>> = self
			.actions
			.read()
			.get(&TypeId::of::<A>())
			.map(|list| list.iter().filter_map(|s| s.downcast_ref::<ActionFn<A>>().cloned()).collect())
			.unwrap_or_default();

		debug!("Emitting action {} to {} subscriber(s)", A::NAME, subscribers.len());
		for subscriber in &subscribers {
			subscriber(event);
		}
		subscribers.len()
	}

	/// Register a filter
	pub fn add_filter<F: Filter>(
		&self,
		f: impl Fn(F::Value) -> F::Value + Send + Sync + 'static,
	) {
		let f: FilterFn<F> = Arc::new(f);
		debug!("Adding filter: {}", F::NAME);
		self.filters.write().entry(TypeId::of::<F>()).or_default().push(Box::new(f));
	}

	/// Run a value through every registered filter
	pub fn apply<F: Filter>(&self, value: F::Value) -> F::Value {
		let filters: Vec<FilterFn<F>> = self
			.filters
			.read()
			.get(&TypeId::of::<F>())
			.map(|list| list.iter().filter_map(|s| s.downcast_ref::<FilterFn<F>>().cloned()).collect())
			.unwrap_or_default();

		filters.iter().fold(value, |value, filter| filter(value))
	}

	pub fn has_action<A: Action>(&self) -> bool {
		self.actions.read().get(&TypeId::of::<A>()).is_some_and(|list| !list.is_empty())
	}

	pub fn has_filter<F: Filter>(&self) -> bool {
		self.filters.read().get(&TypeId::of::<F>()).is_some_and(|list| !list.is_empty())
	}
}


// vim: ts=4
