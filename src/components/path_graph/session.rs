//! Named-key session storage handed to the view at construction.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::warn;

/// Key under which the spotlight/full-map choice is kept.
pub const VISIBILITY_MODE_KEY: &str = "frontier.path.visibility";

/// String key/value store scoped to one view session.
pub trait SessionStore {
	/// Stored value, if any.
	fn get(&self, key: &str) -> Option<String>;
	/// Overwrites `key`. Failures are logged, not returned.
	fn set(&self, key: &str, value: &str);
	/// Forgets `key`.
	fn remove(&self, key: &str);
}

/// Shared store handle passed to the canvas.
pub type SessionHandle = Rc<dyn SessionStore>;

/// In-process store; used by tests and when the browser refuses storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: RefCell<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.values.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
	}

	fn remove(&self, key: &str) {
		self.values.borrow_mut().remove(key);
	}
}

/// `window.localStorage`, with every key prefixed by `namespace`.
pub struct BrowserStore {
	storage: web_sys::Storage,
	namespace: String,
}

impl BrowserStore {
	/// `None` when there is no window or storage is disabled.
	pub fn open(namespace: impl Into<String>) -> Option<Self> {
		let storage = web_sys::window()?.local_storage().ok()??;
		Some(Self {
			storage,
			namespace: namespace.into(),
		})
	}

	fn key(&self, key: &str) -> String {
		format!("{}:{}", self.namespace, key)
	}
}

impl SessionStore for BrowserStore {
	fn get(&self, key: &str) -> Option<String> {
		self.storage.get_item(&self.key(key)).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) {
		if self.storage.set_item(&self.key(key), value).is_err() {
			warn!("session store: failed to write {key}");
		}
	}

	fn remove(&self, key: &str) {
		let _ = self.storage.remove_item(&self.key(key));
	}
}

/// Browser storage when available, otherwise memory.
pub fn default_store(namespace: &str) -> SessionHandle {
	match BrowserStore::open(namespace) {
		Some(store) => Rc::new(store),
		None => {
			warn!("localStorage unavailable; session state will not persist");
			Rc::new(MemoryStore::default())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_store_round_trip() {
		let store = MemoryStore::default();
		assert_eq!(store.get(VISIBILITY_MODE_KEY), None);
		store.set(VISIBILITY_MODE_KEY, "full-map");
		assert_eq!(store.get(VISIBILITY_MODE_KEY).as_deref(), Some("full-map"));
		store.remove(VISIBILITY_MODE_KEY);
		assert_eq!(store.get(VISIBILITY_MODE_KEY), None);
	}
}
