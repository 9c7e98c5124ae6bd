// This test file only compiles and runs when the "local" feature is enabled.
#![cfg(feature = "local")]

use fibre_locator::{capability, Capability, Catalog, LocalContainer, Locator, LocatorConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Fixtures ---

/// Neither `Send` nor `Sync`.
type Buffer = Rc<RefCell<Vec<String>>>;

capability! {
  /// A per-thread scratch buffer.
  Scratch: Provider<Buffer>
}

capability! {
  Prefill: Mapping<Buffer>
}

fn catalog(produced: Arc<AtomicUsize>) -> Catalog {
  let catalog = Catalog::new();
  catalog.add::<Scratch>("Empty", 0, move || {
    let produced = Arc::clone(&produced);
    Arc::new(move || {
      produced.fetch_add(1, Ordering::SeqCst);
      Rc::new(RefCell::new(Vec::new()))
    })
  });
  catalog.add::<Scratch>("Seeded", -5, || {
    Arc::new(|| Rc::new(RefCell::new(vec!["seed".to_string()])))
  });
  catalog.add::<Prefill>("Header", 0, || {
    Arc::new(|buffer: Buffer| {
      buffer.borrow_mut().push("header".to_string());
      buffer
    })
  });
  catalog
}

// --- Local Container Tests ---

#[test]
fn test_local_container_holds_non_send_product() {
  // Arrange
  let produced = Arc::new(AtomicUsize::new(0));
  let locator = Locator::new(catalog(Arc::clone(&produced)));
  let container = locator.local_container::<Scratch>().unwrap();
  assert!(!container.is_populated());

  // Act
  container.get().borrow_mut().push("first".to_string());
  container.get().borrow_mut().push("second".to_string());

  // Assert
  assert_eq!(produced.load(Ordering::SeqCst), 1);
  assert!(Rc::ptr_eq(container.get(), container.cached().unwrap()));
  assert_eq!(*container.get().borrow(), vec!["first", "second"]);
}

#[test]
fn test_local_container_applies_mappings_once() {
  let produced = Arc::new(AtomicUsize::new(0));
  let locator = Locator::new(catalog(produced));
  let container = locator.local_container_with::<Scratch, Prefill>().unwrap();

  container.get();
  container.get();

  assert_eq!(*container.get().borrow(), vec!["header"]);
}

#[test]
fn test_local_container_respects_overrides() {
  let produced = Arc::new(AtomicUsize::new(0));
  let config = LocatorConfig::new().with_override(Scratch::NAME, "Seeded");
  let locator = Locator::with_config(catalog(Arc::clone(&produced)), config);

  let container = locator.local_container_with::<Scratch, Prefill>().unwrap();

  assert_eq!(container.chosen().implementation(), "Seeded");
  assert_eq!(*container.get().borrow(), vec!["seed", "header"]);
  assert_eq!(produced.load(Ordering::SeqCst), 0);
}

#[test]
fn test_local_containers_are_independent() {
  let locator = Locator::new(catalog(Arc::new(AtomicUsize::new(0))));
  let a = locator.local_container::<Scratch>().unwrap();
  let b = locator.local_container::<Scratch>().unwrap();

  a.get().borrow_mut().push("only in a".to_string());

  assert!(!Rc::ptr_eq(a.get(), b.get()));
  assert!(b.get().borrow().is_empty());
}

#[test]
fn test_local_container_rejects_empty_provider_list() {
  let err = LocalContainer::<Buffer>::new(Vec::new(), Vec::new()).unwrap_err();
  assert!(matches!(err, fibre_locator::LocatorError::InvalidArgument(_)));
}
